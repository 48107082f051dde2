//! Deterministic mock provider

use crate::LlmError;
use clauseclear_domain::traits::LlmProvider;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Fail(String),
}

#[derive(Debug, Default)]
struct MockState {
    // (prompt fragment, reply), checked in insertion order
    rules: Vec<(String, Reply)>,
    prompts: Vec<String>,
}

/// Mock LLM provider for deterministic testing
///
/// Replies are chosen by the first registered fragment contained in the
/// prompt, falling back to the default response. Clones share state, so a
/// test can keep a handle while the provider is moved into a classifier.
///
/// # Examples
///
/// ```
/// use clauseclear_llm::MockProvider;
/// use clauseclear_domain::traits::LlmProvider;
///
/// let provider = MockProvider::default();
/// provider.add_response("late fee", r#"[{"id": 1, "severity": "Medium"}]"#);
/// provider.add_error("outage");
///
/// assert!(provider.generate("Clause 1: the late fee is 9%").unwrap().contains("Medium"));
/// assert!(provider.generate("simulate an outage").is_err());
/// assert_eq!(provider.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Create a provider that answers every prompt with `response`
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Reply with `response` to prompts containing `fragment`
    pub fn add_response(&self, fragment: impl Into<String>, response: impl Into<String>) {
        self.state()
            .rules
            .push((fragment.into(), Reply::Text(response.into())));
    }

    /// Fail prompts containing `fragment`
    pub fn add_error(&self, fragment: impl Into<String>) {
        let fragment = fragment.into();
        let message = format!("mock failure for '{}'", fragment);
        self.state().rules.push((fragment, Reply::Fail(message)));
    }

    /// Number of prompts received
    pub fn call_count(&self) -> usize {
        self.state().prompts.len()
    }

    /// Every prompt received, in order
    pub fn prompts(&self) -> Vec<String> {
        self.state().prompts.clone()
    }

    /// Forget recorded prompts
    pub fn reset_call_count(&self) {
        self.state().prompts.clear();
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("[]")
    }
}

impl LlmProvider for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let mut state = self.state();
        state.prompts.push(prompt.to_string());

        let reply = state
            .rules
            .iter()
            .find(|(fragment, _)| prompt.contains(fragment.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Fail(message)) => Err(LlmError::Other(message)),
            None => Ok(self.default_response.clone()),
        }
    }

    fn generate_structured(&self, prompt: &str, _schema: &str) -> Result<String, Self::Error> {
        self.generate(prompt)
    }
}
