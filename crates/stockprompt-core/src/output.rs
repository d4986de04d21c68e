//! Rendering of generations and favorites as JSON or plain text.

use crate::types::{FavoritePrompt, OutputFormat, PromptGeneration};
use serde::Serialize;
use std::io::{self, Write};

/// Writes records to any [`Write`] sink in the requested format.
pub struct OutputWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    pretty: bool,
}

impl<W: Write> OutputWriter<W> {
    /// Create a new output writer.
    ///
    /// `pretty` only affects JSON output.
    pub fn new(writer: W, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer,
            format,
            pretty,
        }
    }

    /// Write one generation: the full record as JSON, or a numbered prompt list.
    pub fn write_generation(&mut self, generation: &PromptGeneration) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.write_json(generation),
            OutputFormat::Text => {
                self.writer
                    .write_all(numbered_list(&generation.prompts).as_bytes())?;
                Ok(())
            }
        }
    }

    /// Write a history listing, newest first as given.
    pub fn write_history(&mut self, generations: &[PromptGeneration]) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.write_json(generations),
            OutputFormat::Text => {
                for generation in generations {
                    writeln!(
                        self.writer,
                        "{}  {}  {}/{}  {} \"{}\" ({} prompts)",
                        generation.created_at.format("%Y-%m-%d %H:%M:%S"),
                        generation.id,
                        generation.provider,
                        generation.model,
                        generation.style,
                        generation.keyword,
                        generation.prompts.len()
                    )?;
                }
                Ok(())
            }
        }
    }

    /// Write a favorites listing.
    pub fn write_favorites(&mut self, favorites: &[FavoritePrompt]) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.write_json(favorites),
            OutputFormat::Text => {
                for favorite in favorites {
                    self.write_favorite_line(favorite)?;
                }
                Ok(())
            }
        }
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    fn write_favorite_line(&mut self, favorite: &FavoritePrompt) -> io::Result<()> {
        writeln!(
            self.writer,
            "{}  {}  ({}, {})",
            favorite.id, favorite.prompt_text, favorite.keyword, favorite.style
        )
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, item: &T) -> io::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, item).map_err(io::Error::other)?;
        } else {
            serde_json::to_writer(&mut self.writer, item).map_err(io::Error::other)?;
        }
        writeln!(self.writer)
    }
}

/// Render prompts as `1. first\n2. second\n`.
pub fn numbered_list(prompts: &[String]) -> String {
    let mut output = String::new();
    for (i, prompt) in prompts.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, prompt));
    }
    output
}
