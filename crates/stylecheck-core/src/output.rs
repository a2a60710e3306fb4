//! Report rendering for diagnostic sequences.
//!
//! Each output format maps to one [`DiagnosticWriter`]. Writers never
//! re-sort: they render diagnostics in the order the engine produced them.
//! Styling is data ([`StyledLine`]); the [`LineSink`] decides how to show it.

use crate::types::{Diagnostic, Severity};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::io::{self, Write};
use std::str::FromStr;
use thiserror::Error;

/// Unrecognized output format name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown output format `{0}` (expected `text` or `xml`)")]
pub struct FormatError(pub String);

/// Visual marker of a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineStyle {
    /// No styling.
    Plain,
    /// Info diagnostics.
    Green,
    /// Warning diagnostics.
    Yellow,
    /// Error diagnostics.
    Red,
}

impl LineStyle {
    /// The marker used for a severity.
    #[must_use]
    pub fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::Info => Self::Green,
            Severity::Warning => Self::Yellow,
            Severity::Error => Self::Red,
        }
    }
}

/// One line of output together with how it should be styled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLine {
    /// Line text without trailing newline.
    pub text: String,
    /// Requested styling.
    pub style: LineStyle,
}

impl StyledLine {
    /// Creates an unstyled line.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: LineStyle::Plain,
        }
    }
}

/// Destination for rendered lines.
pub trait LineSink {
    /// Writes one line.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying output fails.
    fn write_line(&mut self, line: &StyledLine) -> io::Result<()>;
}

/// Collects lines in memory.
impl LineSink for Vec<StyledLine> {
    fn write_line(&mut self, line: &StyledLine) -> io::Result<()> {
        self.push(line.clone());
        Ok(())
    }
}

/// Writes line text to any [`Write`], ignoring styles.
#[derive(Debug)]
pub struct PlainSink<W: Write> {
    writer: W,
}

impl<W: Write> PlainSink<W> {
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LineSink for PlainSink<W> {
    fn write_line(&mut self, line: &StyledLine) -> io::Result<()> {
        writeln!(self.writer, "{}", line.text)
    }
}

/// Renders a diagnostic sequence into a sink.
pub trait DiagnosticWriter {
    /// Writes every diagnostic, in the given order.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails.
    fn write(&self, diagnostics: &[Diagnostic], sink: &mut dyn LineSink) -> io::Result<()>;
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// One colored line per diagnostic.
    Text,
    /// XML compatible with the legacy StyleCop violations report.
    LegacyXml,
}

impl OutputKind {
    /// Format name as accepted on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::LegacyXml => "xml",
        }
    }

    /// Creates the writer for this format.
    ///
    /// `errors_only` applies to [`OutputKind::Text`] only; the legacy XML
    /// report always lists every diagnostic.
    #[must_use]
    pub fn writer(self, errors_only: bool) -> Box<dyn DiagnosticWriter> {
        match self {
            Self::Text => Box::new(TextWriter { errors_only }),
            Self::LegacyXml => Box::new(XmlWriter),
        }
    }
}

impl FromStr for OutputKind {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "xml" => Ok(Self::LegacyXml),
            other => Err(FormatError(other.to_string())),
        }
    }
}

impl std::fmt::Display for OutputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Renders one diagnostic as a text report line.
///
/// Format: `<code> [<Severity>] : <path> : <line>: <message>`.
#[must_use]
pub fn render_line(d: &Diagnostic) -> StyledLine {
    StyledLine {
        text: format!(
            "{} [{}] : {} : {}: {}",
            d.code,
            d.severity.label(),
            d.location.file.display(),
            d.location.line,
            d.message
        ),
        style: LineStyle::for_severity(d.severity),
    }
}

/// Plain text report.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextWriter {
    errors_only: bool,
}

impl TextWriter {
    /// Creates a text writer.
    #[must_use]
    pub fn new(errors_only: bool) -> Self {
        Self { errors_only }
    }
}

impl DiagnosticWriter for TextWriter {
    fn write(&self, diagnostics: &[Diagnostic], sink: &mut dyn LineSink) -> io::Result<()> {
        diagnostics
            .iter()
            .filter(|d| !self.errors_only || d.severity == Severity::Error)
            .try_for_each(|d| sink.write_line(&render_line(d)))
    }
}

/// Legacy StyleCop XML report.
// TODO: decide whether `--errors-only` should filter this report too
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlWriter;

impl DiagnosticWriter for XmlWriter {
    fn write(&self, diagnostics: &[Diagnostic], sink: &mut dyn LineSink) -> io::Result<()> {
        sink.write_line(&StyledLine::plain(
            r#"<?xml version="1.0" encoding="utf-8"?>"#,
        ))?;
        sink.write_line(&StyledLine::plain("<StyleCopViolations>"))?;

        for d in diagnostics {
            let source = d.location.file.to_string_lossy();
            sink.write_line(&StyledLine::plain(format!(
                r#"  <Violation RuleId="{}" Rule="{}" Severity="{}" Source="{}" LineNumber="{}" Message="{}">{}</Violation>"#,
                encode_double_quoted_attribute(&d.code),
                encode_double_quoted_attribute(&d.rule),
                d.severity.label(),
                encode_double_quoted_attribute(&source),
                d.location.line,
                encode_double_quoted_attribute(&d.message),
                encode_text(&d.message),
            )))?;
        }

        sink.write_line(&StyledLine::plain("</StyleCopViolations>"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Location;
    use std::collections::HashSet;
    use std::path::PathBuf;

    fn make(code: &str, severity: Severity, line: usize, message: &str) -> Diagnostic {
        Diagnostic::new(
            code,
            "some-rule",
            severity,
            Location::new(PathBuf::from("/proj/src/x.rs"), line, 1),
            message,
        )
    }

    fn render(kind: OutputKind, errors_only: bool, diagnostics: &[Diagnostic]) -> Vec<StyledLine> {
        let mut lines: Vec<StyledLine> = Vec::new();
        kind.writer(errors_only)
            .write(diagnostics, &mut lines)
            .unwrap();
        lines
    }

    #[test]
    fn parses_known_formats() {
        assert_eq!("text".parse::<OutputKind>(), Ok(OutputKind::Text));
        assert_eq!("xml".parse::<OutputKind>(), Ok(OutputKind::LegacyXml));
    }

    #[test]
    fn rejects_unknown_format() {
        let err = "zzz".parse::<OutputKind>().unwrap_err();
        assert_eq!(err, FormatError("zzz".to_string()));
        assert!(err.to_string().contains("zzz"));
        assert!("TEXT".parse::<OutputKind>().is_err());
    }

    #[test]
    fn renders_text_line() {
        let line = render_line(&make("SC1001", Severity::Warning, 3, "trailing whitespace"));
        assert_eq!(
            line.text,
            "SC1001 [Warning] : /proj/src/x.rs : 3: trailing whitespace"
        );
        assert_eq!(line.style, LineStyle::Yellow);
    }

    #[test]
    fn every_severity_has_a_distinct_marker() {
        let styles: HashSet<_> = [Severity::Info, Severity::Warning, Severity::Error]
            .into_iter()
            .map(LineStyle::for_severity)
            .collect();
        assert_eq!(styles.len(), 3);
        assert!(!styles.contains(&LineStyle::Plain));
    }

    #[test]
    fn text_preserves_input_order() {
        let diagnostics = [
            make("ruleA", Severity::Warning, 3, "warn"),
            make("ruleB", Severity::Error, 1, "err"),
        ];
        let lines = render(OutputKind::Text, false, &diagnostics);
        let texts: Vec<_> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "ruleA [Warning] : /proj/src/x.rs : 3: warn",
                "ruleB [Error] : /proj/src/x.rs : 1: err",
            ]
        );
    }

    #[test]
    fn errors_only_keeps_errors_in_order() {
        let diagnostics = [
            make("E1", Severity::Error, 9, "first"),
            make("W1", Severity::Warning, 1, "w"),
            make("I1", Severity::Info, 2, "i"),
            make("E2", Severity::Error, 4, "second"),
        ];
        let lines = render(OutputKind::Text, true, &diagnostics);
        let texts: Vec<_> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "E1 [Error] : /proj/src/x.rs : 9: first",
                "E2 [Error] : /proj/src/x.rs : 4: second",
            ]
        );
        assert!(lines.iter().all(|l| l.style == LineStyle::Red));
    }

    #[test]
    fn xml_report() {
        let diagnostics = [
            make("SC1001", Severity::Warning, 3, "trailing whitespace"),
            make("SC1004", Severity::Error, 7, "type `foo_bar` should be UpperCamelCase"),
        ];
        let xml = render(OutputKind::LegacyXml, false, &diagnostics)
            .into_iter()
            .map(|l| l.text)
            .collect::<Vec<_>>()
            .join("\n");

        insta::assert_snapshot!(xml, @r#"
<?xml version="1.0" encoding="utf-8"?>
<StyleCopViolations>
  <Violation RuleId="SC1001" Rule="some-rule" Severity="Warning" Source="/proj/src/x.rs" LineNumber="3" Message="trailing whitespace">trailing whitespace</Violation>
  <Violation RuleId="SC1004" Rule="some-rule" Severity="Error" Source="/proj/src/x.rs" LineNumber="7" Message="type `foo_bar` should be UpperCamelCase">type `foo_bar` should be UpperCamelCase</Violation>
</StyleCopViolations>
"#);
    }

    #[test]
    fn xml_escapes_markup() {
        let lines = render(
            OutputKind::LegacyXml,
            false,
            &[make("SC1", Severity::Info, 1, r#"a < b & "c""#)],
        );
        let violation = &lines[2].text;
        assert!(violation.contains(r#"Message="a &lt; b &amp; &quot;c&quot;""#));
        assert!(violation.contains(r#">a &lt; b &amp; "c"</Violation>"#));
    }

    #[test]
    fn xml_ignores_errors_only() {
        let diagnostics = [
            make("W1", Severity::Warning, 1, "w"),
            make("E1", Severity::Error, 2, "e"),
        ];
        let lines = render(OutputKind::LegacyXml, true, &diagnostics);
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.style == LineStyle::Plain));
    }

    #[test]
    fn empty_xml_report_has_root_only() {
        let lines = render(OutputKind::LegacyXml, false, &[]);
        let texts: Vec<_> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                r#"<?xml version="1.0" encoding="utf-8"?>"#,
                "<StyleCopViolations>",
                "</StyleCopViolations>",
            ]
        );
    }

    #[test]
    fn plain_sink_writes_text_lines() {
        let mut sink = PlainSink::new(Vec::new());
        TextWriter::new(false)
            .write(&[make("SC1", Severity::Info, 5, "note")], &mut sink)
            .unwrap();
        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(written, "SC1 [Info] : /proj/src/x.rs : 5: note\n");
    }
}
