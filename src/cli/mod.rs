//! Command-line workflow, decoupled from argument parsing

pub mod orchestration;

pub use orchestration::{build_describer, run_generate, GenerateArgs, GenerateReport};
