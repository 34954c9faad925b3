//! Scripted `QuestionGenerator`s for tests. Replies are served in order and
//! every instruction received is recorded.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Notify;

use super::{LlmError, QuestionGenerator};

pub enum Reply {
    Text(String),
    Status(u16, String),
}

#[derive(Default)]
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<(String, String, f32)>>,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn text(raw: &str) -> Self {
        Self::new(vec![Reply::Text(raw.to_string())])
    }

    /// (instruction, model, temperature) in call order.
    pub fn calls(&self) -> Vec<(String, String, f32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuestionGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        instruction: &str,
        model: &str,
        temperature: f32,
    ) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((instruction.to_string(), model.to_string(), temperature));
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Status(status, message)) => Err(LlmError::Api { status, message }),
            None => Err(LlmError::EmptyContent),
        }
    }
}

/// Holds every call until `release` is called, then answers from the script.
/// `started` fires once a call is waiting.
pub struct GatedGenerator {
    inner: ScriptedGenerator,
    pub started: Notify,
    gate: Notify,
}

impl GatedGenerator {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            inner: ScriptedGenerator::new(replies),
            started: Notify::new(),
            gate: Notify::new(),
        }
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl QuestionGenerator for GatedGenerator {
    async fn generate(
        &self,
        instruction: &str,
        model: &str,
        temperature: f32,
    ) -> Result<String, LlmError> {
        self.started.notify_one();
        self.gate.notified().await;
        self.inner.generate(instruction, model, temperature).await
    }
}
