//! Single-shot summarization over the LLM backend.
//!
//! The whole page text goes into one prompt for one model call. No chunking
//! and no refinement loop; latency and cost stay bounded by construction.

use crate::llm::{LlmClient, LlmError};
use tracing::info;

const SUMMARY_SYSTEM: &str =
    "You are a careful assistant that writes polite, concise summaries of web pages.";

/// Summarize page text with a single model call.
///
/// The text is cut to `max_chars` before prompting so oversized pages do not
/// overflow the model's context.
pub async fn summarize(
    llm: &LlmClient,
    text: &str,
    max_chars: usize,
) -> Result<String, LlmError> {
    let content = truncate_chars(text, max_chars);
    if content.len() < text.len() {
        info!(
            "page text truncated from {} to {} characters",
            text.chars().count(),
            max_chars
        );
    }

    let prompt = format!(
        "Write a polite, concise summary of the following web page content. \
         Cover the main points in a short paragraph, without preamble.\n\n{}",
        content
    );

    llm.chat(SUMMARY_SYSTEM, &prompt).await
}

/// Cut a string to at most `max_chars` characters on a char boundary
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
