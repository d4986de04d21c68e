//! The `stockprompt generate` command.

use super::types::{FormatArg, StyleArg};
use clap::Args;
use std::time::Duration;
use stockprompt_core::{
    Config, GenerationRequest, OutputWriter, PromptGenerator, ProviderKind,
};

/// Arguments for the `generate` command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Keyword or theme the prompts are built around
    #[arg(short, long)]
    pub keyword: String,

    /// Visual style of the prompts
    #[arg(short, long, value_enum, default_value_t = StyleArg::Photo)]
    pub style: StyleArg,

    /// LLM provider: openai, claude, gemini, or groq
    #[arg(short, long, default_value = "openai")]
    pub provider: String,

    /// Model name (defaults to the provider's model in config)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Number of prompts to ask for
    #[arg(short, long, default_value_t = 5)]
    pub quantity: u32,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = FormatArg::Json)]
    pub output_format: FormatArg,

    /// API key for the provider
    #[arg(long, env = "STOCKPROMPT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Use the shared key from config instead of --api-key
    #[arg(long)]
    pub shared_key: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl GenerateArgs {
    /// Build the core request, resolving the provider name and default model.
    pub fn into_request(self, config: &Config) -> anyhow::Result<GenerationRequest> {
        let provider: ProviderKind = self.provider.parse()?;
        let model = self
            .model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| config.llm.default_model(provider));

        Ok(GenerationRequest {
            keyword: self.keyword,
            style: self.style.into(),
            provider,
            model,
            quantity: self.quantity,
            output_format: self.output_format.into(),
            api_key: self.api_key,
            use_shared_key: self.shared_key,
        })
    }
}

/// Execute the generate command.
pub async fn execute(args: GenerateArgs, config: &Config) -> anyhow::Result<()> {
    let pretty = args.pretty;
    let request = args.into_request(config)?;
    tracing::debug!("{request:?}");

    let generator = PromptGenerator::from_config(config).await?;

    let spinner = create_spinner(&format!(
        "Asking {} for {} prompts...",
        request.provider, request.quantity
    ));
    let result = generator.generate(&request).await;
    spinner.finish_and_clear();
    let generation = result?;

    let stdout = std::io::stdout();
    let mut writer = OutputWriter::new(stdout.lock(), request.output_format, pretty);
    writer.write_generation(&generation)?;
    writer.flush()?;

    tracing::info!(
        "Generation {} saved ({} prompts)",
        generation.id,
        generation.prompts.len()
    );
    Ok(())
}

/// Create a spinner shown on stderr while the provider works.
fn create_spinner(message: &str) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
