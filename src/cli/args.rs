//! CLI argument definitions
//!
//! Claude Code runs the binary without arguments; the only option is a
//! diagnostics switch.

use clap::Parser;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "ccstatusline")]
#[command(
    about = "Claude Code status line: reads the session JSON on stdin, prints two colored lines",
    version
)]
pub(crate) struct Cli {
    /// Print diagnostics (cache, git, payload errors) to stderr
    #[arg(long)]
    pub(crate) debug: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.debug && config.debug {
            self.debug = true;
        }
        self
    }
}
