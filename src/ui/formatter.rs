//! Pure formatting functions for console output.
//!
//! Progress output is presentational only; diagnostics go through `log`.

use console::style;
use std::path::Path;

use crate::domain::VersionTuple;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Summary line for the derived version.
pub fn version_summary(version: &VersionTuple) -> String {
    let kind = if version.is_release {
        "release"
    } else {
        "pre-release"
    };
    format!(
        "Configuring version {}.{}.{} build {} ({} {})",
        version.major, version.minor, version.patch, version.build, kind, version.tag
    )
}

/// Display the derived version.
pub fn display_version(version: &VersionTuple) {
    println!("{}", style(version_summary(version)).bold());
}

/// Display that a template is being generated.
pub fn display_generating(template: &Path) {
    display_status(&format!("Generating {}", template.display()));
}

/// Display rendered text instead of writing it (dry run).
pub fn display_preview(output: &Path, content: &str) {
    println!(
        "\n{}",
        style(format!("--- {} (not written)", output.display())).cyan()
    );
    println!("{}", content);
}
