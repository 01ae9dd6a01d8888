//! CLI command implementations

pub mod utils;

pub mod completions;
pub mod curve;
pub mod eval;
pub mod init;
pub mod percentile;
pub mod plot;
pub mod run;
pub mod summary;
