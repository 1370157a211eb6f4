// Licensed under the Apache-2.0 license

use clap::{Parser, Subcommand};
use log::LevelFilter;
use pmc_generator::{Config, MalformedPolicy};
use simple_logger::SimpleLogger;
use std::path::PathBuf;

mod generate;

#[derive(Parser)]
#[command(version, about = "Generate build fragments and headers for the firmware", long_about = None)]
struct Xtask {
    #[command(subcommand)]
    xtask: Option<Commands>,

    /// Firmware source directory
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// TOML file overriding the default source layout
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Check that generated files are up to date without writing them
    #[arg(long, global = true, default_value_t = false)]
    check: bool,

    /// Fail on every malformed macro invocation, not only register definitions
    #[arg(long, global = true, default_value_t = false)]
    strict: bool,
}

#[derive(Subcommand, Clone, Copy, Debug, PartialEq, Eq)]
enum Commands {
    /// Run every generator in order (the default)
    All,
    /// Build-variable fragments from hal/hw/*.h
    HwConfig,
    /// Shell command registrations into shdefs.h
    ShellRegistry,
    /// Application registrations into app/apdefs.h
    AppRegistry,
    /// Register identifiers into regdefs.h
    RegisterIds,
}

impl Commands {
    /// Name of the single generator to run, or `None` for all of them.
    fn generator(self) -> Option<&'static str> {
        match self {
            Commands::All => None,
            Commands::HwConfig => Some("hw-config"),
            Commands::ShellRegistry => Some("shell-registry"),
            Commands::AppRegistry => Some("app-registry"),
            Commands::RegisterIds => Some("register-ids"),
        }
    }
}

fn run(cli: &Xtask) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::with_defaults(),
    };
    if cli.strict {
        config = config.malformed(MalformedPolicy::Abort);
    }
    let only = cli.xtask.unwrap_or(Commands::All).generator();
    generate::generate(&cli.root, &config, only, cli.check)
}

fn main() {
    let cli = Xtask::parse();
    // RUST_LOG overrides the default level.
    let _ = SimpleLogger::new().with_level(LevelFilter::Info).env().init();

    let result = run(&cli);
    result.unwrap_or_else(|e| {
        eprintln!("{:#}", e);
        std::process::exit(-1);
    });
}
