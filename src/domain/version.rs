use crate::domain::tag::Tag;
use crate::error::{Result, VerstampError};
use crate::git::DescribeResult;
use semver::{BuildMetadata, Version};
use std::fmt;

/// Tag segment bumped for pre-release builds (the patch)
pub const DEFAULT_BUMP_POSITION: usize = 2;

/// Number of hex digits of the commit id used as a build number
const SHA_BUILD_DIGITS: usize = 4;

/// Version fields stamped into the generated files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTuple {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub build: u32,
    /// Tag the fields came from, bumped for pre-release builds
    pub tag: String,
    /// Built exactly on a tagged commit
    pub is_release: bool,
}

impl VersionTuple {
    /// Derive the version from a describe result, bumping the patch segment
    /// for commits past the tag
    pub fn derive(describe: &DescribeResult) -> Result<Self> {
        Self::derive_with(describe, DEFAULT_BUMP_POSITION)
    }

    /// Derive the version, bumping the tag segment at `bump_position` when
    /// the checkout is past the tag
    ///
    /// The build number is, in order of precedence:
    /// - the tag's fourth segment
    /// - the distance for a release build (always 0)
    /// - the first four hex digits of the commit id
    ///
    /// A fourth segment is carried over unchanged even though the patch was
    /// bumped, so it may describe an older patch level.
    pub fn derive_with(describe: &DescribeResult, bump_position: usize) -> Result<Self> {
        let is_release = describe.distance == 0;

        let mut tag = Tag::parse(&describe.tag)?;
        if !is_release {
            tag = tag.increment(bump_position)?;
        }
        let tag_name = if is_release {
            describe.tag.clone()
        } else {
            tag.to_string()
        };

        let build = match tag.build() {
            Some(build) => build,
            None if is_release => describe.distance,
            None => commit_build_number(&describe.sha)?,
        };

        Ok(VersionTuple {
            major: tag.major(),
            minor: tag.minor(),
            patch: tag.patch(),
            build,
            tag: tag_name,
            is_release,
        })
    }

    /// `major.minor.patch+build` as a semantic version
    pub fn semver(&self) -> Version {
        let mut version = Version::new(
            u64::from(self.major),
            u64::from(self.minor),
            u64::from(self.patch),
        );
        // A decimal number is always a valid build identifier.
        if let Ok(build) = BuildMetadata::new(&self.build.to_string()) {
            version.build = build;
        }
        version
    }
}

impl fmt::Display for VersionTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{} build {}",
            self.major, self.minor, self.patch, self.build
        )
    }
}

/// Numeric stand-in for a commit: the leading hex digits of the commit id
///
/// The first character of `sha` is git's `g` marker and is skipped.
pub fn commit_build_number(sha: &str) -> Result<u32> {
    let hex: String = sha.chars().skip(1).take(SHA_BUILD_DIGITS).collect();

    if hex.is_empty() {
        return Err(VerstampError::parse(format!(
            "Commit id '{}' has no digits after the marker",
            sha
        )));
    }

    u32::from_str_radix(&hex, 16).map_err(|_| {
        VerstampError::parse(format!("Commit id '{}' is not hexadecimal", sha))
    })
}
