//! In-process provider for tests: replays canned payloads or failures.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{GenerationRequest, LlmProvider, LlmResponse};
use crate::types::{ErrorCategory, LlmError, Result, ValidatorError};

#[derive(Debug, Clone)]
pub(crate) enum ScriptedReply {
    Text(String),
    Fail(ErrorCategory, String),
    Delay(Duration, String),
}

/// Replies in order; the last reply repeats once the script runs out.
#[derive(Debug)]
pub(crate) struct ScriptedProvider {
    replies: Mutex<VecDeque<ScriptedReply>>,
    last: Mutex<Option<ScriptedReply>>,
    requests: Mutex<Vec<GenerationRequest>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub(crate) fn new(replies: Vec<ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            last: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn replying(text: impl Into<String>) -> Self {
        Self::new(vec![ScriptedReply::Text(text.into())])
    }

    pub(crate) fn failing(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self::new(vec![ScriptedReply::Fail(category, message.into())])
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next_reply(&self) -> ScriptedReply {
        let next = self.replies.lock().unwrap().pop_front();
        let mut last = self.last.lock().unwrap();
        if let Some(reply) = next {
            *last = Some(reply.clone());
            reply
        } else {
            last.clone()
                .unwrap_or_else(|| ScriptedReply::Text(String::new()))
        }
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        match self.next_reply() {
            ScriptedReply::Text(text) => Ok(LlmResponse::content_only(text)),
            ScriptedReply::Fail(category, message) => Err(ValidatorError::Llm(
                LlmError::with_provider(category, message, "scripted"),
            )),
            ScriptedReply::Delay(delay, text) => {
                tokio::time::sleep(delay).await;
                Ok(LlmResponse::content_only(text))
            }
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }
}
