//! CLI enum types shared by the commands: visual style and output format.

use clap::ValueEnum;
use stockprompt_core::{OutputFormat, Style};

/// Visual style of the generated prompts.
#[derive(Clone, Copy, Debug, ValueEnum, Default)]
pub enum StyleArg {
    /// Professional stock photography
    #[default]
    Photo,
    /// Digital illustration
    Illustration,
    /// Flat vector graphics
    Vector,
    /// Minimal logo design
    Logo,
}

impl From<StyleArg> for Style {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Photo => Style::Photo,
            StyleArg::Illustration => Style::Illustration,
            StyleArg::Vector => Style::Vector,
            StyleArg::Logo => Style::Logo,
        }
    }
}

/// Supported output formats.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    /// JSON record or array
    Json,
    /// Human-readable lines
    Text,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Text => OutputFormat::Text,
        }
    }
}

impl std::fmt::Display for FormatArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        OutputFormat::from(*self).fmt(f)
    }
}
