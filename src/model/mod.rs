mod mock;
mod ollama;

use async_trait::async_trait;
use serde::Serialize;

pub use mock::MockModelProvider;
pub use ollama::OllamaProvider;

/// Sampling parameters sent with every generation request. The stop sequences
/// keep the model from hallucinating further conversation turns.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub stop: Vec<String>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 150,
            top_p: 0.9,
            frequency_penalty: 0.8,
            presence_penalty: 0.6,
            stop: vec!["USER:".to_owned(), "ASSISTANT:".to_owned()],
        }
    }
}

#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Issues exactly one completion request. No retries: any transport
    /// failure or malformed response surfaces as an error and the caller
    /// substitutes the fallback responder.
    async fn complete(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Role labels the model sometimes echoes at the start of its reply.
const REPLY_PREFIXES: [&str; 3] = ["SHIRAJI AI:", "AI:", "ASSISTANT:"];

/// Strips one leading role-label prefix, case-insensitively, then trims
/// surrounding whitespace.
pub fn clean_reply(raw: &str) -> String {
    let trimmed = raw.trim();
    for prefix in REPLY_PREFIXES {
        if let Some(head) = trimmed.get(..prefix.len())
            && head.eq_ignore_ascii_case(prefix)
        {
            return trimmed[prefix.len()..].trim().to_owned();
        }
    }
    trimmed.to_owned()
}

#[cfg(test)]
mod tests {
    use super::{GenerationOptions, clean_reply};

    #[test]
    fn strips_assistant_prefix() {
        assert_eq!(
            clean_reply("ASSISTANT: Sure, happy to help!"),
            "Sure, happy to help!"
        );
    }

    #[test]
    fn prefix_matching_is_case_insensitive() {
        assert_eq!(clean_reply("shiraji ai:  hello there"), "hello there");
        assert_eq!(clean_reply("  Ai: hi"), "hi");
    }

    #[test]
    fn plain_replies_are_only_trimmed() {
        assert_eq!(clean_reply("  We build villas.  "), "We build villas.");
        assert_eq!(clean_reply("AIRCON advice"), "AIRCON advice");
    }

    #[test]
    fn default_options_carry_both_stop_sequences() {
        let options = GenerationOptions::default();
        assert_eq!(options.stop, vec!["USER:", "ASSISTANT:"]);
        assert_eq!(options.max_tokens, 150);
    }
}
