// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{commands, display, Cli, Commands};

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = commands::load_options(cli.options.as_deref(), cli.strict)?;

    match cli.command {
        Commands::EncodeCompact { value } => {
            println!("{}", commands::encode_compact(&value)?);
        }
        Commands::Decode {
            kind,
            hex,
            input,
            pretty,
        } => {
            let bytes = commands::read_input(hex.as_deref(), input.as_deref())?;
            println!("{}", commands::decode(&kind, &bytes, &options, pretty)?);
        }
        Commands::Inspect { hex } => {
            let bytes = commands::parse_hex(&hex)?;
            let report = commands::inspect(&bytes, &options)?;
            display::print_report(&report);
        }
    }
    Ok(())
}
