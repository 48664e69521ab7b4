use git2::{DescribeFormatOptions, DescribeOptions, ErrorClass, ErrorCode, Repository as Git2Repo};
use log::debug;
use std::path::{Path, PathBuf};

use crate::config::DescribeConfig;
use crate::error::{Result, VerstampError};
use crate::git::{DescribeProvider, DescribeResult};

/// Find the working tree root of the repository containing `start`.
///
/// Bare repositories have nothing to stamp and are rejected.
pub fn resolve_repo_root<P: AsRef<Path>>(start: P) -> Result<PathBuf> {
    let start = start.as_ref();
    let repo = Git2Repo::discover(start).map_err(|e| {
        VerstampError::vcs(format!(
            "Not in a git repository ({}): {}",
            start.display(),
            e.message()
        ))
    })?;

    let workdir = repo
        .workdir()
        .ok_or_else(|| VerstampError::vcs("Bare repositories have no working tree to stamp"))?;

    Ok(workdir.to_path_buf())
}

/// Describes the checkout through libgit2
pub struct Git2Describer {
    repo: Git2Repo,
    settings: DescribeConfig,
}

impl Git2Describer {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P, settings: DescribeConfig) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Describer { repo, settings })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo, settings: DescribeConfig) -> Self {
        Git2Describer { repo, settings }
    }
}

impl DescribeProvider for Git2Describer {
    fn describe(&self) -> Result<DescribeResult> {
        let mut options = DescribeOptions::new();
        if self.settings.tags {
            options.describe_tags();
        }
        if let Some(pattern) = &self.settings.match_pattern {
            options.pattern(pattern);
        }

        let description = self.repo.describe(&options).map_err(|e| {
            if e.code() == ErrorCode::NotFound || e.class() == ErrorClass::Describe {
                debug!("libgit2 describe: {}", e.message());
                VerstampError::vcs("no tags found")
            } else {
                VerstampError::vcs(format!("git describe failed: {}", e.message()))
            }
        })?;

        // Long format keeps "-0-g<sha>" on an exactly tagged commit.
        let mut format = DescribeFormatOptions::new();
        format
            .always_use_long_format(true)
            .abbreviated_size(self.settings.abbrev);

        let output = description.format(Some(&format))?;
        debug!("git describe (libgit2): {}", output);

        DescribeResult::parse(&output)
    }
}
