//! Topic extraction from a summary.
//!
//! One LLM call plus deterministic post-processing. The model is asked for a
//! short Title Case line, but the cap and casing are enforced here; model
//! output is never trusted to follow instructions.

use crate::llm::{LlmClient, LlmError};

const TOPIC_SYSTEM: &str = "You label summaries with short, specific topics.";

/// Maximum number of words in a topic label
const MAX_TOPIC_WORDS: usize = 6;

/// Create a concise topic line from a summary
pub async fn topic_from_summary(llm: &LlmClient, summary: &str) -> Result<String, LlmError> {
    let prompt = format!(
        "You are given a summary of a webpage.\n\
         Write a single, friendly, neutral, and polite TOPIC line in Title Case.\n\
         Constraints:\n\
         - Maximum {MAX_TOPIC_WORDS} words.\n\
         - No emojis.\n\
         - No trailing punctuation.\n\
         - Be specific, not clickbait.\n\n\
         Summary:\n{summary}\n\nTopic:"
    );

    let raw = llm.chat(TOPIC_SYSTEM, &prompt).await?;
    Ok(clean_topic(&raw))
}

/// Normalize a raw topic line: first line only, quotes and trailing
/// punctuation stripped, capped at six words, then title-cased.
fn clean_topic(raw: &str) -> String {
    let first_line = raw.lines().next().unwrap_or("").trim();

    let unquoted = first_line
        .trim_matches(|c| matches!(c, '"' | '\'' | '\u{201c}' | '\u{201d}' | '\u{2018}' | '\u{2019}'))
        .trim();
    let unpunctuated = unquoted.trim_end_matches(['.', '!', '?']).trim_end();

    let capped = unpunctuated
        .split_whitespace()
        .take(MAX_TOPIC_WORDS)
        .collect::<Vec<_>>()
        .join(" ");

    title_case(&capped)
}

/// Uppercase the first alphabetic character of every word.
///
/// The rest of each word is preserved, so acronyms survive.
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut capitalized = false;
    for c in word.chars() {
        if !capitalized && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            capitalized = true;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_topics_are_title_cased() {
        assert_eq!(clean_topic("rust web services"), "Rust Web Services");
    }

    #[test]
    fn long_topics_are_capped_at_six_words() {
        let cleaned = clean_topic("a very long topic label that keeps on going");
        assert_eq!(cleaned, "A Very Long Topic Label That");
        assert_eq!(cleaned.split_whitespace().count(), 6);
    }

    #[test]
    fn only_the_first_line_is_kept() {
        assert_eq!(
            clean_topic("climate policy\n\nHere is some extra explanation."),
            "Climate Policy"
        );
    }

    #[test]
    fn surrounding_quotes_are_stripped() {
        assert_eq!(clean_topic("\"Quoted Topic\""), "Quoted Topic");
        assert_eq!(clean_topic("\u{201c}Smart Quoted\u{201d}"), "Smart Quoted");
    }

    #[test]
    fn trailing_punctuation_is_stripped() {
        assert_eq!(clean_topic("Breaking News!!"), "Breaking News");
        assert_eq!(clean_topic("Is This A Topic?"), "Is This A Topic");
    }

    #[test]
    fn acronyms_survive_title_casing() {
        assert_eq!(clean_topic("LLM inference on GPUs"), "LLM Inference On GPUs");
    }

    #[test]
    fn empty_output_stays_empty() {
        assert_eq!(clean_topic(""), "");
        assert_eq!(clean_topic("\n\n"), "");
    }

    #[test]
    fn every_word_starts_uppercase() {
        let cleaned = clean_topic("the state of open source ai tooling today");
        for word in cleaned.split_whitespace() {
            let first = word.chars().find(|c| c.is_alphabetic()).unwrap();
            assert!(first.is_uppercase());
        }
    }
}
