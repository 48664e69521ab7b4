pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod template;
pub mod ui;

pub use error::{Result, VerstampError};
