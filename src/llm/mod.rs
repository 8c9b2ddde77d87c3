//! LLM module for maqal
//!
//! Builds few-shot prompts and talks to the Gemini API.

mod client;
mod gemini;
mod prompts;

pub use client::{build_provider, LlmProvider};
pub use gemini::GeminiClient;
pub use prompts::{PromptBuilder, EXAMPLE_SEPARATOR};
