// ABOUTME: PetPlates CLI - analyze homemade pet recipes from JSON files
// ABOUTME: Prints meal analyses and ingredient lookups as JSON on stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates
//!
//! Usage:
//! ```bash
//! # Analyze one recipe for one pet
//! petplates-cli analyze --pet pet.json --recipe recipe.json --pretty
//!
//! # Analyze against a custom composition table and extra aliases
//! petplates-cli analyze --pet pet.json --recipe recipe.json \
//!     --compositions table.json --aliases aliases.json
//!
//! # Analyze many {pet, selections} requests in parallel
//! petplates-cli batch --input requests.json
//!
//! # Show how an ingredient key resolves
//! petplates-cli lookup "Salmon Oil"
//! ```

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use petplates::logging::LoggingConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser)]
#[command(
    name = "petplates-cli",
    about = "PetPlates meal analysis CLI",
    long_about = "Score homemade pet recipes for nutritional coverage, safety, and serving size."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Analyze one recipe for one pet
    Analyze {
        /// Pet profile JSON file
        #[arg(long)]
        pet: PathBuf,

        /// Recipe JSON file (selection array or {"selections": [...]})
        #[arg(long)]
        recipe: PathBuf,

        /// Composition table JSON file replacing the built-in table
        #[arg(long)]
        compositions: Option<PathBuf>,

        /// Alias JSON file layered over the default aliases
        #[arg(long)]
        aliases: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// Analyze an array of {pet, selections} requests
    Batch {
        /// Requests JSON file
        #[arg(long)]
        input: PathBuf,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// Show how an ingredient key resolves
    Lookup {
        /// Ingredient key or name
        key: String,

        /// Composition table JSON file replacing the built-in table
        #[arg(long)]
        compositions: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = LoggingConfig::from_env().verbose(cli.verbose).init() {
        eprintln!("Failed to initialize logging: {e}");
    }

    let result = match cli.command {
        Command::Analyze {
            pet,
            recipe,
            compositions,
            aliases,
            pretty,
        } => commands::analyze::run(&pet, &recipe, compositions.as_deref(), aliases.as_deref(), pretty),
        Command::Batch { input, pretty } => commands::analyze::batch(&input, pretty),
        Command::Lookup { key, compositions } => {
            commands::lookup::run(&key, compositions.as_deref())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error.code = ?err.code, "{}", err.message);
            eprintln!("Error: {err}");
            ExitCode::from(u8::try_from(err.code.exit_code()).unwrap_or(1))
        }
    }
}
