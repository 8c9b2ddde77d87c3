//! Structured parse of the model's reply

use crate::article::models::ModelAnswer;
use crate::{MaqalError, Result};

/// Coerce raw model text into a [`ModelAnswer`].
///
/// Accepts a bare JSON object, one wrapped in a markdown code fence, or one
/// surrounded by prose. There is exactly one attempt.
pub fn parse_model_answer(text: &str) -> Result<ModelAnswer> {
    let payload = extract_json(text)
        .ok_or_else(|| MaqalError::Parse("response does not contain a JSON object".to_string()))?;

    serde_json::from_str(payload).map_err(|e| MaqalError::Parse(e.to_string()))
}

fn extract_json(text: &str) -> Option<&str> {
    let text = strip_code_fence(text.trim());

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    // Drop the info string (e.g. `json`) on the opening fence line.
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}
