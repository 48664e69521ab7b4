use crate::error::{Result, VerstampError};
use crate::git::{DescribeProvider, DescribeResult};

/// Mock describer for testing without a git repository
pub struct MockDescriber {
    result: Option<DescribeResult>,
}

impl MockDescriber {
    /// Create a describer that always returns the given fields
    pub fn new(tag: impl Into<String>, distance: u32, sha: impl Into<String>) -> Self {
        MockDescriber {
            result: Some(DescribeResult::new(tag, distance, sha)),
        }
    }

    /// Create a describer that behaves like a repository with no tags
    pub fn untagged() -> Self {
        MockDescriber { result: None }
    }
}

impl DescribeProvider for MockDescriber {
    fn describe(&self) -> Result<DescribeResult> {
        self.result
            .clone()
            .ok_or_else(|| VerstampError::vcs("no tags found"))
    }
}
