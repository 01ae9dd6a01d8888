//! CLI module - argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod helpers;
pub mod table;

pub use args::{Cli, Commands, GlobalOpts, OutputFormat};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins when set; otherwise `--verbose` enables debug output
/// for this crate and everything else stays at warnings.
pub fn init_logging(global: &GlobalOpts) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if global.verbose { "relia=debug" } else { "warn" })
    });

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}
