use async_trait::async_trait;
use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::ChatMessage;

use clarity_core::AiSettings;

/// One text-completion attempt against an external model. The synthesizer
/// treats any error — transport, timeout, empty response — identically, so
/// the error type stays a plain string.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String, String>;
}

fn map_backend(provider: &str) -> Result<LLMBackend, String> {
    match provider {
        "openai" => Ok(LLMBackend::OpenAI),
        "anthropic" => Ok(LLMBackend::Anthropic),
        "google" => Ok(LLMBackend::Google),
        "ollama" => Ok(LLMBackend::Ollama),
        "groq" => Ok(LLMBackend::Groq),
        "mistral" => Ok(LLMBackend::Mistral),
        "deepseek" => Ok(LLMBackend::DeepSeek),
        other => Err(format!("unknown provider: {other}")),
    }
}

/// Production client backed by the `llm` crate's multi-provider builder.
pub struct LlmClient {
    settings: AiSettings,
}

impl LlmClient {
    pub fn new(settings: AiSettings) -> Self {
        LlmClient { settings }
    }
}

#[async_trait]
impl CompletionClient for LlmClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, String> {
        let backend = map_backend(&self.settings.provider)?;

        let mut builder = LLMBuilder::new()
            .backend(backend)
            .model(&self.settings.model)
            .system(system);

        if !self.settings.api_key.is_empty() {
            builder = builder.api_key(&self.settings.api_key);
        }

        let llm = builder.build().map_err(|e| format!("build LLM: {e}"))?;

        let messages = vec![ChatMessage::user().content(user).build()];

        let response = llm.chat(&messages).await.map_err(|e| format!("chat: {e}"))?;

        match response.text() {
            Some(text) if !text.trim().is_empty() => Ok(text),
            Some(_) => Err("LLM returned empty text".to_string()),
            None => Err("LLM returned no text".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_provider_is_rejected() {
        assert!(map_backend("netscape").is_err());
        assert!(map_backend("anthropic").is_ok());
    }
}
