use crate::error::{Result, VerstampError};
use std::fmt;

/// A release tag split into an optional `v` prefix and numeric dot-segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub prefix: String,
    pub segments: Vec<u32>,
}

impl Tag {
    /// Parse a tag such as "1.2.3", "v1.2.3" or "1.2.3.99"
    ///
    /// Requires at least three numeric segments.
    pub fn parse(name: &str) -> Result<Self> {
        let version_part = name.trim_start_matches(['v', 'V']);
        let prefix = &name[..name.len() - version_part.len()];

        let segments = version_part
            .split('.')
            .map(|segment| {
                segment.parse::<u32>().map_err(|_| {
                    VerstampError::format(format!(
                        "Invalid segment '{}' in tag '{}' - expected a number",
                        segment, name
                    ))
                })
            })
            .collect::<Result<Vec<u32>>>()?;

        if segments.len() < 3 {
            return Err(VerstampError::format(format!(
                "Tag '{}' has {} segment(s) - expected at least major.minor.patch",
                name,
                segments.len()
            )));
        }

        Ok(Tag {
            prefix: prefix.to_string(),
            segments,
        })
    }

    /// Increment the segment at `position`, leaving every other segment as is
    pub fn increment(&self, position: usize) -> Result<Tag> {
        let mut segments = self.segments.clone();
        let segment = segments.get_mut(position).ok_or_else(|| {
            VerstampError::format(format!(
                "Cannot bump segment {} of tag '{}' - it only has {} segments",
                position,
                self,
                self.segments.len()
            ))
        })?;
        *segment = segment.checked_add(1).ok_or_else(|| {
            VerstampError::format(format!("Segment {} of tag '{}' overflows", position, self))
        })?;

        Ok(Tag {
            prefix: self.prefix.clone(),
            segments,
        })
    }

    pub fn major(&self) -> u32 {
        self.segments[0]
    }

    pub fn minor(&self) -> u32 {
        self.segments[1]
    }

    pub fn patch(&self) -> u32 {
        self.segments[2]
    }

    /// Explicit build number carried as a fourth segment
    pub fn build(&self) -> Option<u32> {
        self.segments.get(3).copied()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.segments.iter().map(|s| s.to_string()).collect();
        write!(f, "{}{}", self.prefix, joined.join("."))
    }
}
