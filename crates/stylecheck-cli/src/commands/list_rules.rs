//! List rules command implementation.

use anyhow::Result;
use std::io::Write;
use stylecheck_rules::all_rules;

/// Runs the list-rules command.
pub fn run() -> Result<()> {
    let mut out = std::io::stdout().lock();
    print_catalog(&mut out)?;
    Ok(())
}

fn print_catalog(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "Available rules:\n")?;
    writeln!(out, "{:<8} {:<28} {:<9} Description", "Code", "Name", "Default")?;
    writeln!(out, "{}", "-".repeat(90))?;

    for rule in all_rules() {
        writeln!(
            out,
            "{:<8} {:<28} {:<9} {}",
            rule.code(),
            rule.name(),
            rule.default_severity().to_string(),
            rule.description()
        )?;
    }

    writeln!(out, "\nOverride severities in stylecheck.toml, e.g.:")?;
    writeln!(out, "  [rules.max-line-length]")?;
    writeln!(out, "  severity = \"warning\"")?;
    writeln!(out, "  [rules.SC1002]")?;
    writeln!(out, "  enabled = false")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_rule() {
        let mut out = Vec::new();
        print_catalog(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        for rule in all_rules() {
            assert!(text.contains(rule.code()));
            assert!(text.contains(rule.name()));
        }
        assert!(text.contains("SC1004   type-name-upper-camel-case   error"));
    }
}
