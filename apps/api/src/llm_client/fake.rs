//! Scripted `JsonGenerator` for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{JsonGenerator, LlmError};

enum Script {
    Unavailable,
    Reply(Value),
    Fail,
}

pub struct FakeGenerator {
    script: Script,
    prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    fn scripted(script: Script) -> Self {
        Self {
            script,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Reports itself unavailable; any call is a test failure.
    pub fn unavailable() -> Self {
        Self::scripted(Script::Unavailable)
    }

    pub fn replying(value: Value) -> Self {
        Self::scripted(Script::Reply(value))
    }

    /// Available, but every call errors.
    pub fn failing() -> Self {
        Self::scripted(Script::Fail)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl JsonGenerator for FakeGenerator {
    fn is_available(&self) -> bool {
        !matches!(self.script, Script::Unavailable)
    }

    async fn generate_json(&self, prompt: &str, _system: &str) -> Result<Value, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.script {
            Script::Unavailable => panic!("generate_json called on an unavailable capability"),
            Script::Reply(value) => Ok(value.clone()),
            Script::Fail => Err(LlmError::Api {
                status: 503,
                message: "upstream timeout".to_string(),
            }),
        }
    }
}
