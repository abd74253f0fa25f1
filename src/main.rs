//
//  campus-client
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use campus_client::cli::{Cli, Commands};
use campus_client::{exit_codes, ApiError};

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    }
}

/// Logging is off unless `CAMPUS_DEBUG` holds a filter, e.g. `CAMPUS_DEBUG=debug`.
fn init_logging() {
    let filter = EnvFilter::try_from_env("CAMPUS_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<ApiError>() {
        Some(e) if e.is_auth_error() => exit_codes::AUTH_ERROR,
        Some(e) if e.is_not_found() => exit_codes::NOT_FOUND,
        _ => exit_codes::ERROR,
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Auth(cmd) => cmd.run(&cli.global).await,
        Commands::Challenge(cmd) => cmd.run(&cli.global).await,
        Commands::Forum(cmd) => cmd.run(&cli.global).await,
        Commands::Project(cmd) => cmd.run(&cli.global).await,
        Commands::User(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("campus version {}", campus_client::VERSION);
            Ok(())
        }
    }
}
