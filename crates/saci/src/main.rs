// SPDX-FileCopyrightText: 2026 Saci Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Saci - a WhatsApp-to-LLM conversational relay.
//!
//! This is the binary entry point for the Saci relay server.

use clap::{Parser, Subcommand};

mod serve;

/// Saci - a WhatsApp-to-LLM conversational relay.
#[derive(Parser, Debug)]
#[command(name = "saci", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the relay server.
    Serve,
    /// Print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match saci_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            saci_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => match toml::to_string_pretty(&config) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => {
                eprintln!("error: failed to render config: {e}");
                std::process::exit(1);
            }
        },
        None => {
            println!("saci: use --help for available commands");
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn binary_loads_config_defaults() {
        // Compiled defaults only, independent of host config files and env.
        let config =
            saci_config::load_and_validate_str("").expect("default config should be valid");
        assert_eq!(config.agent.name, "saci");
    }
}
