#![warn(rust_2018_idioms, unused_lifetimes)]

use anyhow::{Context, Result};
use clap::Parser;
use rcfg::domain::settings::{CareSettings, LogSettings};
use rcfg::kernel::clock::SystemClock;
use rcfg::kernel::config::load_config;
use rcfg_care::handlers::{init, keygen, prepare, resolve, verify};
use rcfg_care::models::args::{CareCommands, Cli};
use rcfg_logger::{LevelFilter, Logger};

const SETTINGS_FILE: &str = "care.toml";

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings: CareSettings = match &cli.config {
        Some(path) => load_config(path, true),
        None => load_config(SETTINGS_FILE, false),
    }
    .context("Critical: Configuration is malformed")?;

    let _log = init_logger(&settings.log, cli.verbose)?;

    match cli.command {
        CareCommands::Init { output, force } => init::init_config(&output, force)?,
        CareCommands::Keygen {} => keygen::create_key_pair()?,
        CareCommands::Verify { input } => verify::verify_config(&input)?,
        CareCommands::Resolve(args) => {
            resolve::resolve_config(&args, &settings.context, settings.keys.public_key.as_deref(), &SystemClock)?;
        },
        CareCommands::Prepare { input, output, private_key } => {
            let private_key = private_key.or(settings.keys.private_key);
            prepare::prepare_config(&input, &output, private_key.as_deref())?;
        },
    }

    Ok(())
}

fn init_logger(log: &LogSettings, verbose: bool) -> Result<Logger> {
    let builder = Logger::builder().name(env!("CARGO_BIN_NAME"));
    let builder = if verbose { builder.level(LevelFilter::DEBUG) } else { builder.env_filter(log.level.as_str()) };

    let logger = match &log.directory {
        Some(directory) if log.json => builder.path(directory.clone()).json().init()?,
        Some(directory) => builder.path(directory.clone()).init()?,
        None => builder.init()?,
    };

    Ok(logger)
}
