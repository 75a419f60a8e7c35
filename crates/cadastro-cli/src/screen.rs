//! Console chrome: banners and separators.

use std::io::Write;

use anyhow::Result;

pub const WIDTH: usize = 60;

/// Centered banner between two full-width rules.
pub fn banner<W: Write>(writer: &mut W, title: &str) -> Result<()> {
    writeln!(writer, "{}", "=".repeat(WIDTH))?;
    writeln!(writer, "{:^WIDTH$}", title)?;
    writeln!(writer, "{}", "=".repeat(WIDTH))?;
    Ok(())
}

pub fn separator<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", "-".repeat(WIDTH))?;
    Ok(())
}
