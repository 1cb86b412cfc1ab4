use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use super::{CompletionError, CompletionService};

/// What a [`MockCompletionService`] does when called.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Answer with this text.
    Respond(String),
    /// Fail as if the endpoint were unreachable.
    Fail(String),
    /// Never answer.
    Hang,
}

/// In-memory completion service that records every prompt it receives.
///
/// Clones share the call log, so a test can keep one handle while the pipeline owns another.
#[derive(Debug, Clone)]
pub struct MockCompletionService {
    behavior: Arc<Mutex<MockBehavior>>,
    calls: Arc<AtomicUsize>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockCompletionService {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior: Arc::new(Mutex::new(behavior)),
            calls: Arc::new(AtomicUsize::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn responding(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Respond(text.into()))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(MockBehavior::Fail(message.into()))
    }

    pub fn hanging() -> Self {
        Self::new(MockBehavior::Hang)
    }

    /// Changes the behavior for subsequent calls.
    pub fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.lock() = behavior;
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().last().cloned()
    }
}

impl CompletionService for MockCompletionService {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().push(prompt.to_string());

        let behavior = self.behavior.lock().clone();
        match behavior {
            MockBehavior::Respond(text) => Ok(text),
            MockBehavior::Fail(message) => Err(CompletionError::RequestFailed {
                endpoint: "mock://completion".to_string(),
                message,
            }),
            MockBehavior::Hang => std::future::pending().await,
        }
    }

    fn model(&self) -> &str {
        "mock"
    }
}
