//! Processing pipeline: prompt, model call, parse, normalize

use std::sync::Arc;
use tokio::sync::watch;

use crate::article::models::{ArticleResult, ProcessingRequest};
use crate::article::normalize::normalize;
use crate::article::parse::parse_model_answer;
use crate::llm::{LlmProvider, PromptBuilder};
use crate::{MaqalError, Result};

/// Lifecycle of a processing run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingState {
    /// Waiting for an article
    Idle,

    /// Model call in flight
    Processing,

    /// Result produced
    Done,

    /// Run failed with the given message
    Failed(String),
}

impl ProcessingState {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Done | Self::Failed(_))
    }
}

/// Runs one article at a time through the model.
pub struct ArticleProcessor {
    provider: Arc<dyn LlmProvider>,
    prompts: PromptBuilder,
    state: watch::Sender<ProcessingState>,
}

impl ArticleProcessor {
    pub fn new(provider: Arc<dyn LlmProvider>, prompts: PromptBuilder) -> Self {
        let (state, _) = watch::channel(ProcessingState::Idle);
        Self {
            provider,
            prompts,
            state,
        }
    }

    /// Observe state transitions of this processor.
    pub fn subscribe(&self) -> watch::Receiver<ProcessingState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ProcessingState {
        self.state.borrow().clone()
    }

    /// Process one article end to end.
    ///
    /// The model call runs on a spawned task; there are no retries and no
    /// cancellation once the request is issued.
    pub async fn process(&self, request: &ProcessingRequest) -> Result<ArticleResult> {
        if request.article_text.trim().is_empty() {
            return Err(MaqalError::EmptyArticle);
        }

        self.state.send_replace(ProcessingState::Processing);

        let outcome = self.run(request).await;
        match &outcome {
            Ok(result) => {
                tracing::info!(
                    metadata_keys = result.metadata.len(),
                    questions = result.clarifying_questions.len(),
                    "Article processed"
                );
                self.state.send_replace(ProcessingState::Done);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Article processing failed");
                self.state.send_replace(ProcessingState::Failed(e.to_string()));
            }
        }

        outcome
    }

    async fn run(&self, request: &ProcessingRequest) -> Result<ArticleResult> {
        let prompt = self.prompts.build(request);
        let provider = Arc::clone(&self.provider);

        let text = tokio::spawn(async move { provider.generate(&prompt).await })
            .await
            .map_err(|e| MaqalError::ModelInvocation(format!("model task failed: {e}")))??;

        let answer = parse_model_answer(&text)?;
        Ok(normalize(answer, request))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::article::FewShotExample;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Provider returning a canned reply and recording the prompts it saw.
    pub(crate) struct StubProvider {
        reply: std::result::Result<String, String>,
        pub(crate) prompts: Mutex<Vec<String>>,
    }

    impl StubProvider {
        pub(crate) fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for StubProvider {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().map_err(MaqalError::ModelInvocation)
        }
    }

    pub(crate) fn prompts() -> PromptBuilder {
        PromptBuilder::new(vec![FewShotExample {
            name: "sample".to_string(),
            input: "نص".to_string(),
            markdown_output: "## نص".to_string(),
            json_output: "{}".to_string(),
        }])
    }

    const REPLY: &str = r#"```json
{
  "markdown": "انفيديا **أعلنت** عن كروت RTX 50",
  "json_metadata": {"title": "كروت RTX 50", "description": " ", "date": "8 Jan 2025", "author": "Model"},
  "user_queries": ["ما هو رابط المقال؟"]
}
```"#;

    #[tokio::test]
    async fn processes_and_normalizes_reply() {
        let provider = Arc::new(StubProvider::replying(REPLY));
        let processor = ArticleProcessor::new(provider.clone(), prompts());

        let request = ProcessingRequest::new("انفيديا أعلنت عن كروت RTX 50")
            .with_filename("ai_article")
            .with_author("A");
        let result = processor.process(&request).await.unwrap();

        assert_eq!(result.metadata["title"], "كروت RTX 50");
        assert_eq!(result.metadata["author"], "A");
        assert_eq!(result.metadata["filename"], "ai_article");
        assert!(!result.metadata.contains_key("date"));
        assert!(!result.metadata.contains_key("description"));
        assert_eq!(result.clarifying_questions.len(), 1);
        assert_eq!(processor.state(), ProcessingState::Done);

        let seen = provider.prompts.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].contains("Filename for images: ai_article"));
    }

    #[tokio::test]
    async fn empty_article_is_rejected_before_calling_model() {
        let provider = Arc::new(StubProvider::replying(REPLY));
        let processor = ArticleProcessor::new(provider.clone(), prompts());

        let err = processor.process(&ProcessingRequest::new("  \n")).await.unwrap_err();
        assert!(matches!(err, MaqalError::EmptyArticle));
        assert!(provider.prompts.lock().unwrap().is_empty());
        assert_eq!(processor.state(), ProcessingState::Idle);
    }

    #[tokio::test]
    async fn model_failure_is_surfaced_and_recorded() {
        let processor =
            ArticleProcessor::new(Arc::new(StubProvider::failing("quota exceeded")), prompts());
        let mut states = processor.subscribe();

        let err = processor.process(&ProcessingRequest::new("نص")).await.unwrap_err();
        assert!(matches!(err, MaqalError::ModelInvocation(_)));
        assert_eq!(err.to_string(), "Model invocation failed: quota exceeded");

        let state = states.borrow_and_update().clone();
        assert!(state.is_finished());
        assert_eq!(
            state,
            ProcessingState::Failed("Model invocation failed: quota exceeded".to_string())
        );
    }

    #[tokio::test]
    async fn unparseable_reply_is_a_parse_error() {
        let processor =
            ArticleProcessor::new(Arc::new(StubProvider::replying("no json here")), prompts());

        let err = processor.process(&ProcessingRequest::new("نص")).await.unwrap_err();
        assert!(matches!(err, MaqalError::Parse(_)));
        assert!(matches!(processor.state(), ProcessingState::Failed(_)));
    }
}
