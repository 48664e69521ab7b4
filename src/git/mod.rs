//! Version control abstraction layer
//!
//! This module provides a trait-based abstraction over `git describe`,
//! allowing the version pipeline to run against a real repository or
//! against fixed test data.
//!
//! # Overview
//!
//! The primary abstraction is the [DescribeProvider] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Describer]: describes the checkout through the `git2` crate
//! - [command::CommandDescriber]: shells out to the `git` executable
//! - [mock::MockDescriber]: returns a fixed tag/distance/sha for tests
//!
//! # Usage
//!
//! ```rust
//! # use verstamp::git::{DescribeProvider, MockDescriber};
//! let describer = MockDescriber::new("1.2.3", 5, "gabcd123");
//! let result = describer.describe().unwrap();
//! assert_eq!(result.distance, 5);
//! ```

pub mod command;
pub mod mock;
pub mod repository;

pub use command::CommandDescriber;
pub use mock::MockDescriber;
pub use repository::{resolve_repo_root, Git2Describer};

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, VerstampError};

/// Parsed output of `git describe --long`
///
/// The `sha` segment keeps the leading `g` marker that git puts in front of
/// the abbreviated commit id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribeResult {
    /// Nearest reachable tag
    pub tag: String,
    /// Number of commits between the tag and the checkout
    pub distance: u32,
    /// Abbreviated commit id, `g`-prefixed
    pub sha: String,
}

impl DescribeResult {
    /// Create a describe result from its parts
    pub fn new(tag: impl Into<String>, distance: u32, sha: impl Into<String>) -> Self {
        DescribeResult {
            tag: tag.into(),
            distance,
            sha: sha.into(),
        }
    }

    /// Parse describe output of the form `<tag>-<distance>-<sha>`
    ///
    /// The output is split from the right, so hyphens inside the tag name
    /// stay part of the tag.
    ///
    /// # Returns
    /// * `Ok(DescribeResult)` - The three describe fields
    /// * `Err(VerstampError::Vcs)` - If the output does not have three parts
    ///   or the distance is not a number
    pub fn parse(output: &str) -> Result<Self> {
        let trimmed = output.trim();
        let mut parts = trimmed.rsplitn(3, '-');

        let (sha, distance, tag) = match (parts.next(), parts.next(), parts.next()) {
            (Some(sha), Some(distance), Some(tag)) if !tag.is_empty() && !sha.is_empty() => {
                (sha, distance, tag)
            }
            _ => {
                return Err(VerstampError::vcs(format!(
                    "Unexpected describe output '{}' - expected <tag>-<distance>-<sha>",
                    trimmed
                )))
            }
        };

        let distance = distance.parse::<u32>().map_err(|_| {
            VerstampError::vcs(format!(
                "Invalid commit distance '{}' in describe output '{}'",
                distance, trimmed
            ))
        })?;

        Ok(DescribeResult::new(tag, distance, sha))
    }
}

impl FromStr for DescribeResult {
    type Err = VerstampError;

    fn from_str(s: &str) -> Result<Self> {
        DescribeResult::parse(s)
    }
}

impl fmt::Display for DescribeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.tag, self.distance, self.sha)
    }
}

/// Source of `git describe` information for the current checkout
///
/// Implementations perform a single describe with no retries. A repository
/// without any reachable tag must fail with [VerstampError::Vcs].
pub trait DescribeProvider {
    /// Describe the checked-out commit relative to its nearest tag
    fn describe(&self) -> Result<DescribeResult>;
}

impl<T: DescribeProvider + ?Sized> DescribeProvider for Box<T> {
    fn describe(&self) -> Result<DescribeResult> {
        (**self).describe()
    }
}
