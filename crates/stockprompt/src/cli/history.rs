//! The `stockprompt history` command.

use super::types::FormatArg;
use clap::builder::RangedU64ValueParser;
use clap::Args;
use stockprompt_core::store::DEFAULT_FIND_LIMIT;
use stockprompt_core::{Config, OutputWriter, PromptLibrary};

/// Arguments for the `history` command.
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Maximum number of generations to show, 1 to 100 (defaults to `storage.list_limit`)
    #[arg(
        short = 'n',
        long,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=DEFAULT_FIND_LIMIT as u64)
    )]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = FormatArg::Text)]
    pub output_format: FormatArg,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the history command.
pub async fn execute(args: HistoryArgs, config: &Config) -> anyhow::Result<()> {
    let mut library = PromptLibrary::from_config(config).await?;
    if let Some(limit) = args.limit {
        library = library.with_list_limit(limit);
    }

    let generations = library.history().await?;
    if generations.is_empty() {
        eprintln!(
            "{}",
            console::Style::new()
                .for_stderr()
                .dim()
                .apply_to("No generations yet.")
        );
        return Ok(());
    }

    let stdout = std::io::stdout();
    let mut writer = OutputWriter::new(stdout.lock(), args.output_format.into(), args.pretty);
    writer.write_history(&generations)?;
    writer.flush()?;
    Ok(())
}
