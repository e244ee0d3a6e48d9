// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sai Ren - a conversational shopping assistant.
//!
//! This is the binary entry point for the Sai Ren server.

mod serve;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sairen_config::SairenConfig;

/// Sai Ren - a conversational shopping assistant.
#[derive(Parser, Debug)]
#[command(name = "sairen", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server (default).
    Serve,
    /// Extract one page with the configured extractor and print its text.
    Extract {
        /// Page URL.
        url: String,
    },
    /// Print the action a message would be routed to.
    Classify {
        /// User message.
        text: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => sairen_config::load_and_validate_path(path),
        None => sairen_config::load_and_validate(),
    };
    let config: SairenConfig = match loaded {
        Ok(config) => config,
        Err(errors) => {
            sairen_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    serve::init_tracing(&config.agent.log_level);

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_serve(config).await,
        Commands::Extract { url } => serve::run_extract(&config, &url).await,
        Commands::Classify { text } => serve::run_classify(&config, &text).await,
    };

    if let Err(e) = result {
        eprintln!("sairen: {e}");
        std::process::exit(1);
    }
}
