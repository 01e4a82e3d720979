//! # CLI Argument Definitions
//!
//! Command-line structure of `care`, declared with the `clap` derive API.

use clap::{Args, Parser, Subcommand};
use rcfg::{BuildVariant, Platform};
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "care")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Configure apps remotely.")]
#[command(
    long_about = "Configure apps remotely.\n\nMaintain one small JSON document with default \
                  settings and targeted overrides, check it, preview what each client will see \
                  and sign it for publication."
)]
pub struct Cli {
    /// Log at DEBUG level
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Settings file (default: ./care.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CareCommands,
}

#[derive(Debug, Subcommand)]
pub enum CareCommands {
    /// Prepare a new configuration
    Init {
        /// The file that will contain the configuration
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Prepare a new key pair for signing a configuration
    #[command(alias = "create-key-pair")]
    Keygen {},
    /// Verify that the configuration is valid
    Verify {
        /// The file that contains the configuration
        input: PathBuf,
    },
    /// Resolve a configuration for an app to verify output
    Resolve(ResolveArgs),
    /// Prepare a configuration for publication
    Prepare {
        /// The file that contains the configuration
        input: PathBuf,

        /// The file that will contain the configuration suitable for publication
        output: PathBuf,

        /// The base64 encoded private key used to sign the configuration
        #[arg(long, alias = "private")]
        private_key: Option<String>,
    },
}

/// Client description for `care resolve`. Flags left out fall back to the settings file.
#[derive(Debug, Clone, Args)]
pub struct ResolveArgs {
    /// The file that contains the configuration
    pub input: PathBuf,

    /// The date the app runs at in ISO 8601 format (default: now)
    #[arg(short, long)]
    pub date: Option<String>,

    /// The platform the app runs on, e.g. `iOS.iPad` or `Android`
    #[arg(short, long)]
    pub platform: Option<Platform>,

    /// The version of the platform the app runs on
    #[arg(long)]
    pub platform_version: Option<String>,

    /// The version of the app
    #[arg(short = 'v', long)]
    pub app_version: Option<String>,

    /// The variant of the app
    #[arg(long)]
    pub variant: Option<String>,

    /// The build variant of the app (`release` or `debug`)
    #[arg(long)]
    pub build_variant: Option<BuildVariant>,

    /// The language the app runs in, e.g. `nl`
    #[arg(long)]
    pub language: Option<String>,

    /// Base64 public key; the input is read as a signed envelope when set
    #[arg(long)]
    pub public_key: Option<String>,
}
