//! Canned completion provider for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{CompletionProvider, LlmError};

pub(crate) enum Canned {
    Text(String),
    Status(u16),
    Hang,
}

/// Replies with a fixed answer and records how it was called.
pub(crate) struct CannedProvider {
    reply: Canned,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl CannedProvider {
    pub(crate) fn new(reply: Canned) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub(crate) fn text(reply: &str) -> Self {
        Self::new(Canned::Text(reply.to_string()))
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for CannedProvider {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn complete(&self, _model: &str, prompt: &str, _system: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());

        match &self.reply {
            Canned::Text(text) => Ok(text.clone()),
            Canned::Status(status) => Err(LlmError::Api {
                status: *status,
                message: "canned failure".to_string(),
            }),
            Canned::Hang => {
                tokio::time::sleep(Duration::from_secs(24 * 60 * 60)).await;
                Err(LlmError::EmptyContent)
            }
        }
    }
}
