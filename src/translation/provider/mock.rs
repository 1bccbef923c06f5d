//! 测试用后端
//!
//! 按顺序返回预设回复，可模拟延迟与失败，并记录收到的提示词

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::translation::error::{TranslationError, TranslationResult};

use super::Provider;

/// 预设回复
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    Text(String),
    Fail(TranslationError),
}

/// 测试用后端
#[derive(Debug, Default)]
pub struct MockProvider {
    script: Mutex<VecDeque<(Duration, MockReply)>>,
    fallback: Option<MockReply>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// 每次调用都返回相同文本
    pub fn replying(text: &str) -> Self {
        Self {
            fallback: Some(MockReply::Text(text.to_string())),
            ..Self::default()
        }
    }

    /// 每次调用都失败
    pub fn failing(error: TranslationError) -> Self {
        Self {
            fallback: Some(MockReply::Fail(error)),
            ..Self::default()
        }
    }

    pub fn then_reply(self, text: &str) -> Self {
        self.then_reply_after(Duration::ZERO, text)
    }

    pub fn then_reply_after(self, delay: Duration, text: &str) -> Self {
        self.push(delay, MockReply::Text(text.to_string()))
    }

    pub fn then_fail(self, error: TranslationError) -> Self {
        self.push(Duration::ZERO, MockReply::Fail(error))
    }

    fn push(self, delay: Duration, reply: MockReply) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back((delay, reply));
        }
        self
    }

    /// 已收到的调用次数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 最近一次收到的提示词
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().ok()?.last().cloned()
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, prompt: &str) -> TranslationResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        let next = self
            .script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front());

        let (delay, reply) = match (next, &self.fallback) {
            (Some(scripted), _) => scripted,
            (None, Some(fallback)) => (Duration::ZERO, fallback.clone()),
            (None, None) => {
                return Err(TranslationError::NetworkError(
                    "mock provider has no scripted reply".to_string(),
                ))
            }
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match reply {
            MockReply::Text(text) => Ok(text),
            MockReply::Fail(error) => Err(error),
        }
    }
}
