//! Command-line surface and the per-invocation pipeline.

pub mod args;
pub mod commands;

pub use args::CliArgs;
pub use commands::run;
