//! Pure formatting functions for console output.
//!
//! Results go to stdout so they can be piped. Everything else (status,
//! warnings, errors) goes to stderr.

use crate::domain::Version;
use console::style;

/// Join versions into the single space separated line printed as a result.
pub fn format_versions(versions: &[Version]) -> String {
    versions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format an error message with a red prefix.
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

/// Format a warning message with a yellow prefix.
pub fn format_warning(message: &str) -> String {
    format!("{} {}", style("⚠ WARNING:").yellow(), message)
}

/// Format a status message with a yellow arrow.
pub fn format_status(message: &str) -> String {
    format!("{} {}", style("→").yellow(), message)
}

/// Print an error message to stderr.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Print a warning message to stderr.
pub fn display_warning(message: &str) {
    eprintln!("{}", format_warning(message));
}

/// Print a status message to stderr.
pub fn display_status(message: &str) {
    eprintln!("{}", format_status(message));
}

/// Print a result line to stdout.
pub fn display_versions(versions: &[Version]) {
    println!("{}", format_versions(versions));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_version_list;

    #[test]
    fn test_format_versions() {
        let versions = parse_version_list("2.0.0 1.0.0-rc.1+b").unwrap();
        assert_eq!(format_versions(&versions), "2.0.0 1.0.0-rc.1+b");
        assert_eq!(format_versions(&[]), "");
    }

    #[test]
    fn test_messages_keep_their_text() {
        assert!(console::strip_ansi_codes(&format_error("boom")).ends_with("ERROR: boom"));
        assert!(console::strip_ansi_codes(&format_warning("careful")).contains("careful"));
        assert!(console::strip_ansi_codes(&format_status("fetching")).ends_with("fetching"));
    }
}
