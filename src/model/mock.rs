use async_trait::async_trait;

use super::{ModelProvider, clean_reply};

/// Stand-in provider used when no inference endpoint is configured.
#[derive(Debug, Default)]
pub struct MockModelProvider;

#[async_trait]
impl ModelProvider for MockModelProvider {
    async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        let chars = prompt.chars().count();
        Ok(clean_reply(&format!(
            "SHIRAJI AI: Mock reply (prompt was {chars} characters). \
             What else would you like to know?"
        )))
    }
}
