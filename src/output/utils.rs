//! Shared formatting helpers

use std::io;
use termcolor::{Color, ColorSpec, WriteColor};

const GB: f64 = (1u64 << 30) as f64;

/// Format a byte count in gigabytes with `precision` decimal places.
pub fn format_gb(bytes: u64, precision: usize) -> String {
    format!("{:.*}", precision, bytes as f64 / GB)
}

/// Leading whitespace for a line at `depth`.
pub fn indent(depth: usize, width: usize) -> String {
    " ".repeat(depth * width)
}

/// Write `text` in `color`, then reset.
pub fn write_colored<W: WriteColor>(
    out: &mut W,
    text: &str,
    color: Color,
    bold: bool,
) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(bold))?;
    write!(out, "{}", text)?;
    out.reset()
}
