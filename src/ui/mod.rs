//! User interface module - console output for the `smgr` binary.

pub mod formatter;

pub use formatter::{
    display_error, display_status, display_versions, display_warning, format_error,
    format_status, format_versions, format_warning,
};
