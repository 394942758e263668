use clap::{self, Parser};
use log::{error, info, Level};
use simple_logger::init_with_level;

use nf_analyzer::{cli::Args, config::Config, core::run};

fn main() {
    let start = std::time::Instant::now();
    init_with_level(Level::Info).unwrap();

    let args: Args = Args::parse();

    let config = Config::resolve(args).unwrap_or_else(|e| {
        error!("{}", e);
        std::process::exit(1);
    });

    run(config).unwrap_or_else(|e| {
        error!("{}", e);
        std::process::exit(1);
    });

    let elapsed = start.elapsed();
    info!("Elapsed time: {:.3?}", elapsed);
}
