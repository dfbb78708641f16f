mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod output;
mod source;
mod utils;

use clap::Parser;

use cli::Cli;
use config::Config;
use utils::set_debug;

fn main() {
    let cli = Cli::parse();
    set_debug(cli.debug);

    let config = Config::load();
    let cli = cli.with_config(&config);
    set_debug(cli.debug);

    app::run(&config);
}
