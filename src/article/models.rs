//! Data models for article processing

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

pub const KEY_DATE: &str = "date";
pub const KEY_AUTHOR: &str = "author";
pub const KEY_FILENAME: &str = "filename";
pub const KEY_IMAGE: &str = "image";

/// Article metadata, keyed by field name.
pub type Metadata = BTreeMap<String, String>;

/// Caller input for one processing run
#[derive(Debug, Clone, Default)]
pub struct ProcessingRequest {
    /// Raw article text
    pub article_text: String,

    /// Publication date, forwarded verbatim
    pub date: Option<String>,

    /// Base filename used for the image reference and saved outputs
    pub output_filename: Option<String>,

    /// Author name
    pub author: Option<String>,
}

impl ProcessingRequest {
    pub fn new(article_text: impl Into<String>) -> Self {
        Self {
            article_text: article_text.into(),
            ..Self::default()
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.output_filename = Some(filename.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Date hint, ignoring blank values.
    pub fn date(&self) -> Option<&str> {
        non_blank(self.date.as_deref())
    }

    /// Filename hint, ignoring blank values.
    pub fn filename(&self) -> Option<&str> {
        non_blank(self.output_filename.as_deref())
    }

    /// Author hint, ignoring blank values.
    pub fn author(&self) -> Option<&str> {
        non_blank(self.author.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Structured answer as returned by the model
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelAnswer {
    pub markdown: String,

    #[serde(deserialize_with = "deserialize_metadata")]
    pub json_metadata: Metadata,

    #[serde(default)]
    pub user_queries: Vec<String>,
}

/// Final, normalized output of a processing run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleResult {
    pub markdown: String,
    pub metadata: Metadata,
    pub clarifying_questions: Vec<String>,
}

/// Accepts any JSON object and stringifies scalar values; `null` becomes empty.
fn deserialize_metadata<'de, D>(deserializer: D) -> std::result::Result<Metadata, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;

    Ok(raw
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                serde_json::Value::Null => String::new(),
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (key, value)
        })
        .collect())
}
