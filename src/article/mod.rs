//! Article processing
//!
//! Few-shot examples, the structured parse of model replies, metadata
//! normalization and the pipeline tying them to a model provider.

pub mod examples;
mod models;
mod normalize;
mod parse;
mod processor;

pub use examples::{load_examples, FewShotExample, FEW_SHOT_EXAMPLES};
pub use models::{
    ArticleResult, Metadata, ModelAnswer, ProcessingRequest, KEY_AUTHOR, KEY_DATE, KEY_FILENAME,
    KEY_IMAGE,
};
pub use normalize::{normalize, normalize_metadata};
pub use parse::parse_model_answer;
pub use processor::{ArticleProcessor, ProcessingState};

#[cfg(test)]
pub(crate) use processor::tests::{prompts as test_prompts, StubProvider};
