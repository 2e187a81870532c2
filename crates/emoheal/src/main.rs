// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! EmoHeal - a mental-health support chat backend with crisis triage.
//!
//! This is the binary entry point for the EmoHeal server.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

mod probe;
mod serve;

/// EmoHeal - a mental-health support chat backend with crisis triage.
#[derive(Parser, Debug)]
#[command(name = "emoheal", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the EmoHeal chat gateway.
    Serve,
    /// Manage EmoHeal configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Crisis triage utilities.
    Triage {
        #[command(subcommand)]
        action: TriageAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Validate the merged configuration and print the resolved settings.
    Check,
}

#[derive(Subcommand, Debug)]
enum TriageAction {
    /// Run the crisis classifier over a fixed probe set.
    Test,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match emoheal_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            emoheal_config::render_errors(&errors);
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
        Some(Commands::Config {
            action: ConfigAction::Check,
        }) => {
            println!("configuration OK");
            println!("  agent.name            = {}", config.agent.name);
            println!("  agent.log_level       = {}", config.agent.log_level);
            println!(
                "  gateway               = {}:{}",
                config.gateway.host, config.gateway.port
            );
            println!("  storage.database_path = {}", config.storage.database_path);
            println!(
                "  triage.lexicon        = {}",
                config.triage.lexicon_path.as_deref().unwrap_or("<builtin>")
            );
            println!(
                "  responder.templates   = {}",
                config
                    .responder
                    .templates_path
                    .as_deref()
                    .unwrap_or("<builtin>")
            );
        }
        Some(Commands::Triage {
            action: TriageAction::Test,
        }) => {
            if let Err(e) = probe::run_probe(&config) {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        None => {
            println!("emoheal: use --help for available commands");
        }
    }
}
