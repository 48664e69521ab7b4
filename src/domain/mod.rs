//! Domain logic - pure version derivation independent of git operations

pub mod tag;
pub mod version;

pub use tag::Tag;
pub use version::{commit_build_number, VersionTuple, DEFAULT_BUMP_POSITION};
