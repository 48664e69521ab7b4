use log::debug;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::DescribeConfig;
use crate::error::{Result, VerstampError};
use crate::git::{DescribeProvider, DescribeResult};

/// Describes the checkout by running the `git` executable
pub struct CommandDescriber {
    repo_root: PathBuf,
    settings: DescribeConfig,
    program: String,
}

impl CommandDescriber {
    /// Describe the repository at `repo_root` with `git` from PATH
    pub fn new(repo_root: impl Into<PathBuf>, settings: DescribeConfig) -> Self {
        CommandDescriber {
            repo_root: repo_root.into(),
            settings,
            program: "git".to_string(),
        }
    }

    /// Use a different git executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Arguments passed to the git executable
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["describe".to_string(), "--long".to_string()];
        if self.settings.tags {
            args.push("--tags".to_string());
        }
        if let Some(pattern) = &self.settings.match_pattern {
            args.push("--match".to_string());
            args.push(pattern.clone());
        }
        args.push(format!("--abbrev={}", self.settings.abbrev));
        args
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }
}

impl DescribeProvider for CommandDescriber {
    fn describe(&self) -> Result<DescribeResult> {
        let args = self.args();
        debug!("Running {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .current_dir(&self.repo_root)
            .output()
            .map_err(|e| {
                VerstampError::vcs(format!("Failed to execute {}: {}", self.program, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if is_missing_tags(&stderr) {
                return Err(VerstampError::vcs("no tags found"));
            }
            return Err(VerstampError::vcs(format!(
                "{} describe failed with exit code {}: {}",
                self.program,
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!("git describe (command): {}", stdout.trim());
        DescribeResult::parse(&stdout)
    }
}

/// Whether git's stderr says no usable tag exists
fn is_missing_tags(stderr: &str) -> bool {
    [
        "No names found",
        "No tags can describe",
        "No annotated tags can describe",
    ]
    .iter()
    .any(|message| stderr.contains(message))
}
