use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use log::{error, info};

use skeeball::core::input::{ChannelReader, SimulatedChannels, SysfsGpio};
use skeeball::{CabinetBuilder, CabinetConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputSource {
    /// GPIO value files under `gpio_root`
    Sysfs,
    /// Every channel at rest; targets come from the keyboard only
    Simulated,
}

#[doc(hidden)]
#[derive(Parser, Debug)]
#[command(version, about = "Skeeball cabinet controller", long_about = None)]
struct Args {
    #[arg(short, long, env = "SKEEBALL_CONFIG", default_value = "cabinet.toml", help = "Cabinet wiring and scoring file")]
    config: PathBuf,

    #[arg(short, long, value_enum, default_value_t = InputSource::Sysfs, help = "Where sensor levels are read from")]
    input: InputSource,

    #[arg(long, help = "Run without the dev keyboard window")]
    headless: bool,

    #[arg(short, long, help = "Log at debug level unless RUST_LOG is set")]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();
}

fn run(args: Args) -> skeeball::Result<()> {
    let config = CabinetConfig::load(&args.config)?;

    let reader: Box<dyn ChannelReader> = match args.input {
        InputSource::Sysfs => Box::new(SysfsGpio::new(&config.gpio_root)),
        InputSource::Simulated => Box::new(SimulatedChannels::new()),
    };

    CabinetBuilder::new(config)
        .with_reader(reader)
        .headless(args.headless)
        .build()?
        .run()
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);
    info!("Starting skeeball cabinet ({:?} input)", args.input);

    if let Err(e) = run(args) {
        error!("{}", e);
        process::exit(1);
    }
}
