//! Follow-up answering scoped to the cached summary.
//!
//! The model may only use the summary and the retained turn history. When an
//! answer is not derivable it must reply with the exact refusal line, which
//! is part of the user-visible contract.

use crate::llm::{LlmClient, LlmError};
use crate::session::Turn;

/// The literal refusal reply when the summary does not contain the answer
pub const NO_ANSWER: &str = "I don't know based on the summary.";

const FOLLOWUP_SYSTEM: &str =
    "You answer questions strictly from the provided summary. You never use outside knowledge.";

/// Answer a question using only the cached summary and the turn window
pub async fn answer(
    llm: &LlmClient,
    summary: &str,
    turns: &[Turn],
    question: &str,
) -> Result<String, LlmError> {
    let prompt = build_prompt(summary, turns, question);
    llm.chat(FOLLOWUP_SYSTEM, &prompt).await
}

fn build_prompt(summary: &str, turns: &[Turn], question: &str) -> String {
    let chat_history = render_history(turns);
    format!(
        "You may use ONLY the provided summary and the chat history.\n\
         If the answer is not present in the summary, reply exactly: \"{NO_ANSWER}\"\n\
         Then suggest summarizing another URL for more context.\n\n\
         chat history:\n{chat_history}\n\n\
         summary:\n{summary}\n\n\
         question: {question}\n\
         answer:"
    )
}

/// Render retained turns as a transcript, oldest first
fn render_history(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|turn| format!("Human: {}\nAI: {}", turn.question, turn.answer))
        .collect::<Vec<_>>()
        .join("\n")
}
