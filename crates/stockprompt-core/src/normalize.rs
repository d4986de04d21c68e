//! Best-effort extraction of a prompt list from a model reply.
//!
//! Models are asked for a bare JSON array but often wrap it in a markdown
//! fence or answer with a numbered list. The chain below tries, in order:
//! a ```` ```json ```` fence, any ```` ``` ```` fence, the whole text as JSON,
//! and finally one prompt per non-blank line. It never fails.

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Characters stripped from the start of each line in the line fallback.
const LIST_MARKER_CHARS: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '.', '-', ')', ' ',
];

/// Turn a raw model reply into an ordered list of prompts.
///
/// The number of prompts is not checked against what was requested.
pub fn normalize_response(raw: &str) -> Vec<String> {
    let candidate = extract_fenced(raw).unwrap_or(raw);

    match serde_json::from_str::<Vec<String>>(candidate) {
        Ok(prompts) => prompts,
        Err(e) => {
            tracing::debug!("Reply is not a JSON string array ({e}), falling back to lines");
            split_lines(candidate)
        }
    }
}

/// Return the trimmed body of the first fenced block, preferring a JSON fence.
///
/// A fence with no closing marker runs to the end of the text.
fn extract_fenced(text: &str) -> Option<&str> {
    let open = if let Some(pos) = text.find(JSON_FENCE) {
        pos + JSON_FENCE.len()
    } else {
        text.find(FENCE)? + FENCE.len()
    };

    let body = &text[open..];
    let body = match body.find(FENCE) {
        Some(close) => &body[..close],
        None => body,
    };
    Some(body.trim())
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.trim_start_matches(LIST_MARKER_CHARS))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
