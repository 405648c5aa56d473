//! Indented text output
//!
//! Node lines look like `{indent}{path} ({size} GB, {pct}%)` and user lines
//! like `{indent}  - {owner}: {size} GB ({pct}%)`. With color enabled paths
//! are blue and owners red.

use std::io;
use termcolor::{Color, ColorChoice, WriteColor};

use crate::config::ReportConfig;

use super::report::{NodeLine, ReportLine, UserLine};
use super::utils::{format_gb, indent, write_colored};

/// Formats report lines as indented text.
pub struct TextFormatter {
    indent_width: usize,
    precision: usize,
}

impl TextFormatter {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            indent_width: config.indent_width,
            precision: config.precision,
        }
    }

    /// Plain text for a single line, without a trailing newline.
    pub fn format_line(&self, line: &ReportLine) -> String {
        match line {
            ReportLine::Node(node) => format!(
                "{}{} {}",
                indent(node.depth, self.indent_width),
                node.path,
                self.node_suffix(node)
            ),
            ReportLine::User(user) => format!(
                "{}  - {}: {}",
                indent(user.depth, self.indent_width),
                user.owner,
                self.user_suffix(user)
            ),
        }
    }

    /// Plain text for every line, newline-terminated.
    pub fn format<'a>(&self, lines: impl IntoIterator<Item = &'a ReportLine>) -> String {
        let mut output = String::new();
        for line in lines {
            output.push_str(&self.format_line(line));
            output.push('\n');
        }
        output
    }

    pub fn write_line<W: WriteColor>(&self, out: &mut W, line: &ReportLine) -> io::Result<()> {
        match line {
            ReportLine::Node(node) => {
                write!(out, "{}", indent(node.depth, self.indent_width))?;
                write_colored(out, &node.path, Color::Blue, true)?;
                writeln!(out, " {}", self.node_suffix(node))
            }
            ReportLine::User(user) => {
                write!(out, "{}  - ", indent(user.depth, self.indent_width))?;
                write_colored(out, &user.owner, Color::Red, false)?;
                writeln!(out, ": {}", self.user_suffix(user))
            }
        }
    }

    pub fn write_all<'a, W: WriteColor>(
        &self,
        out: &mut W,
        lines: impl IntoIterator<Item = &'a ReportLine>,
    ) -> io::Result<()> {
        for line in lines {
            self.write_line(out, line)?;
        }
        Ok(())
    }

    fn node_suffix(&self, node: &NodeLine) -> String {
        format!(
            "({} GB, {:.1}%)",
            format_gb(node.bytes, self.precision),
            node.percent
        )
    }

    fn user_suffix(&self, user: &UserLine) -> String {
        format!(
            "{} GB ({:.1}%)",
            format_gb(user.bytes, self.precision),
            user.percent
        )
    }
}

/// Terminal detection has already happened by the time this is called, so
/// `true` means colors were explicitly wanted.
pub fn color_choice(use_color: bool) -> ColorChoice {
    if use_color {
        ColorChoice::Always
    } else {
        ColorChoice::Never
    }
}
