//! Rendering of the instruction sent to the model.
//!
//! The same text goes to every provider; only the transport differs.

use crate::types::Style;

/// Human-readable description of a style, as used inside the instruction.
pub fn style_description(style: Style) -> &'static str {
    match style {
        Style::Photo => "realistic photography",
        Style::Illustration => "digital illustration or artwork",
        Style::Vector => "vector graphics with clean lines and shapes",
        Style::Logo => "logo design with branding elements",
    }
}

/// Build the instruction asking for `quantity` prompts about `keyword`.
///
/// The last line demands a bare JSON array; the normalizer copes when the
/// model ignores it.
pub fn render_instruction(keyword: &str, style: Style, quantity: u32) -> String {
    format!(
        "Generate {quantity} unique, detailed prompts for {description} based on the keyword: \"{keyword}\"\n\
         \n\
         Each prompt should:\n\
         - Be descriptive and specific\n\
         - Include relevant keywords for microstock discoverability\n\
         - Mention composition, lighting, mood, and technical aspects\n\
         - Be optimized for search engines\n\
         - Be suitable for {style} style\n\
         \n\
         Format: Return ONLY a JSON array of strings, nothing else. Example: [\"prompt 1\", \"prompt 2\", ...]",
        description = style_description(style),
    )
}
