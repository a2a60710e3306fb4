//! Terminal sink for rendered report lines.

use owo_colors::OwoColorize;
use std::io::{self, IsTerminal, Write};
use stylecheck_core::{LineSink, LineStyle, StyledLine};

/// Returns true when stdout is a terminal and `NO_COLOR` is unset.
pub fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal()
}

/// Writes lines to a stream, coloring them by style when enabled.
pub struct TerminalSink<W: Write> {
    writer: W,
    color: bool,
}

impl TerminalSink<io::Stdout> {
    /// Creates a sink on stdout, colored when it is an interactive terminal.
    pub fn stdout() -> Self {
        Self::new(io::stdout(), use_colors())
    }
}

impl<W: Write> TerminalSink<W> {
    /// Creates a sink over `writer`.
    pub fn new(writer: W, color: bool) -> Self {
        Self { writer, color }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LineSink for TerminalSink<W> {
    fn write_line(&mut self, line: &StyledLine) -> io::Result<()> {
        let text = line.text.as_str();
        if !self.color {
            return writeln!(self.writer, "{text}");
        }
        match line.style {
            LineStyle::Plain => writeln!(self.writer, "{text}"),
            LineStyle::Green => writeln!(self.writer, "{}", text.green()),
            LineStyle::Yellow => writeln!(self.writer, "{}", text.yellow()),
            LineStyle::Red => writeln!(self.writer, "{}", text.red()),
        }
    }
}
