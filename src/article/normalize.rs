//! Deterministic cleanup of the model's answer

use crate::article::models::{
    ArticleResult, Metadata, ModelAnswer, ProcessingRequest, KEY_AUTHOR, KEY_DATE, KEY_FILENAME,
};

/// Apply the metadata rules to a parsed answer.
///
/// Blank values are dropped, caller-supplied filename/author/date replace
/// whatever the model proposed, and a date is only kept when the caller
/// asked for one.
pub fn normalize(answer: ModelAnswer, request: &ProcessingRequest) -> ArticleResult {
    ArticleResult {
        markdown: answer.markdown,
        metadata: normalize_metadata(answer.json_metadata, request),
        clarifying_questions: answer.user_queries,
    }
}

pub fn normalize_metadata(metadata: Metadata, request: &ProcessingRequest) -> Metadata {
    let mut metadata: Metadata = metadata
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .collect();

    if let Some(filename) = request.filename() {
        metadata.insert(KEY_FILENAME.to_string(), filename.to_string());
    }
    if let Some(author) = request.author() {
        metadata.insert(KEY_AUTHOR.to_string(), author.to_string());
    }

    match request.date() {
        Some(date) => {
            metadata.insert(KEY_DATE.to_string(), date.to_string());
        }
        None => {
            if metadata.remove(KEY_DATE).is_some() {
                tracing::debug!("Dropped model-proposed date without a caller date");
            }
        }
    }

    metadata
}
