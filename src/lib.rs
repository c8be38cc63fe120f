//! # websum
//!
//! A small web summarizer agent service.
//!
//! `POST /summarize` takes either a URL or a follow-up question. A URL is
//! fetched, summarized by the configured LLM backend, and labelled with a
//! short topic; the summary becomes the session context. Anything else is
//! answered strictly from that cached summary and a three-turn window of
//! prior questions.
//!
//! One global session, in process memory only.

pub mod agent;
pub mod classify;
pub mod config;
pub mod followup;
pub mod llm;
pub mod scraper;
pub mod server;
pub mod session;
pub mod topic;

pub use config::Config;
pub use session::SessionState;
