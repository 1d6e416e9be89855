mod chapter;
mod commands;
mod config;
mod diagnostics;
mod encode;
mod error;
mod interval;
mod readonly;
mod registry;
mod render;
mod scanner;
mod types;
mod watch;
mod widget;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "codebook",
    about = "Compile YAML code exercises in markdown into interactive HTML"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render all chapters to the output directory
    Build,
    /// Validate all chapters without writing output
    Check,
    /// Build, then rebuild whenever a chapter changes
    Watch,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build => commands::build(),
        Commands::Check => commands::check(),
        Commands::Watch => watch::run(),
    };

    return match result {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::from(3_u8)
        },
    };
}
