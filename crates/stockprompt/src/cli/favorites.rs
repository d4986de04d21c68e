//! The `stockprompt favorites` command for saved prompts.

use super::types::FormatArg;
use clap::{Args, Subcommand};
use console::Style;
use stockprompt_core::{Config, OutputWriter, PromptLibrary, SaveFavoriteRequest};

/// Arguments for the `favorites` command.
#[derive(Args, Debug)]
pub struct FavoritesArgs {
    #[command(subcommand)]
    pub command: FavoritesCommand,
}

/// Subcommands for managing favorites.
#[derive(Subcommand, Debug)]
pub enum FavoritesCommand {
    /// Save a prompt as a favorite
    Save {
        /// Id of the generation the prompt came from
        #[arg(short = 'g', long)]
        generation_id: String,

        /// The prompt text
        #[arg(short, long)]
        text: String,

        /// Keyword of the originating generation
        #[arg(short, long)]
        keyword: String,

        /// Style of the originating generation
        #[arg(short, long, default_value = "photo")]
        style: String,
    },

    /// List saved favorites, newest first
    List {
        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = FormatArg::Text)]
        output_format: FormatArg,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Delete a favorite by id
    Delete {
        /// Favorite id
        id: String,
    },
}

/// Execute the favorites command.
pub async fn execute(args: FavoritesArgs, config: &Config) -> anyhow::Result<()> {
    let library = PromptLibrary::from_config(config).await?;

    match args.command {
        FavoritesCommand::Save {
            generation_id,
            text,
            keyword,
            style,
        } => {
            let favorite = library
                .save_favorite(SaveFavoriteRequest {
                    prompt_generation_id: generation_id,
                    prompt_text: text,
                    keyword,
                    style,
                })
                .await?;
            let green = Style::new().for_stderr().green();
            eprintln!("{} Saved favorite", green.apply_to("✓"));
            println!("{}", favorite.id);
        }

        FavoritesCommand::List {
            output_format,
            pretty,
        } => {
            let favorites = library.favorites().await?;
            if favorites.is_empty() {
                let dim = Style::new().for_stderr().dim();
                eprintln!("{}", dim.apply_to("No favorites saved."));
                return Ok(());
            }
            let stdout = std::io::stdout();
            let mut writer = OutputWriter::new(stdout.lock(), output_format.into(), pretty);
            writer.write_favorites(&favorites)?;
            writer.flush()?;
        }

        FavoritesCommand::Delete { id } => {
            library.delete_favorite(&id).await?;
            let green = Style::new().for_stderr().green();
            eprintln!("{} Deleted favorite {}", green.apply_to("✓"), id);
        }
    }

    Ok(())
}
