//! User interface module - console progress output.

pub mod formatter;

pub use formatter::{
    display_error, display_generating, display_preview, display_status, display_success,
    display_version, version_summary,
};
