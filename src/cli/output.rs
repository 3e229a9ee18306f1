//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::io::{self, Write};

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Write warning (yellow "Warning:" prefix) to `w`
pub fn warning_to<W: Write>(w: &mut W, msg: &(impl std::fmt::Display + ?Sized)) -> io::Result<()> {
    writeln!(w, "{}: {}", "Warning".yellow(), msg)
}

/// Write success message (green) to `w`
pub fn success_to<W: Write>(w: &mut W, msg: &(impl std::fmt::Display + ?Sized)) -> io::Result<()> {
    writeln!(w, "{}", msg.to_string().green())
}

/// Print labelled value (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}
