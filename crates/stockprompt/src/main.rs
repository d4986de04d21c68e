//! StockPrompt CLI - microstock prompt generation from the command line.
//!
//! Asks an LLM provider for image-generation prompts built around a keyword,
//! prints them, and keeps a local history and a favorites list.
//!
//! # Usage
//!
//! ```bash
//! # Five photo prompts from Claude with your own key
//! stockprompt generate -k "sunset beach" -p claude --api-key sk-...
//!
//! # Vector prompts as a numbered list, using the shared platform key
//! stockprompt generate -k "coffee shop" -s vector -f text --shared-key
//!
//! # Browse past generations and favorites
//! stockprompt history
//! stockprompt favorites list
//!
//! # View configuration
//! stockprompt config show
//! ```

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use stockprompt_core::{ErrorClass, GenerationError, LibraryError, StockPromptError};

mod cli;
mod logging;

/// StockPrompt - generate, store, and curate microstock image prompts.
#[derive(Parser, Debug)]
#[command(name = "stockprompt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate prompts for a keyword
    Generate(cli::generate::GenerateArgs),

    /// List past generations, newest first
    History(cli::history::HistoryArgs),

    /// Save, list, and delete favorite prompts
    Favorites(cli::favorites::FavoritesArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let config = match stockprompt_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `stockprompt config path`."
            );
            stockprompt_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("StockPrompt v{}", stockprompt_core::VERSION);

    let result = match cli.command {
        Commands::Generate(args) => cli::generate::execute(args, &config).await,
        Commands::History(args) => cli::history::execute(args, &config).await,
        Commands::Favorites(args) => cli::favorites::execute(args, &config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let red = console::Style::new().for_stderr().red().bold();
            eprintln!("{} {e:#}", red.apply_to("error:"));
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Map an error to a process exit code: client 2, not found 3, anything else 1.
fn exit_code(err: &anyhow::Error) -> u8 {
    let class = err.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<GenerationError>() {
            Some(e.class())
        } else if let Some(e) = cause.downcast_ref::<LibraryError>() {
            Some(e.class())
        } else {
            cause.downcast_ref::<StockPromptError>().map(StockPromptError::class)
        }
    });

    match class {
        Some(ErrorClass::Client) => 2,
        Some(ErrorClass::NotFound) => 3,
        Some(ErrorClass::Server) | None => 1,
    }
}
