use std::{env, net::SocketAddr, str::FromStr};

use crate::model::GenerationOptions;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_bind: SocketAddr,
    /// Full URL of the Ollama-style generate endpoint; the mock provider is
    /// used when unset.
    pub ollama_url: Option<String>,
    pub ollama_model: String,
    /// Contact addresses the assistant is allowed to share, in the order they
    /// appear in the persona preamble.
    pub contact_emails: Vec<String>,
    pub generation: GenerationOptions,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT").unwrap_or_else(|_| "8080".to_owned());
        let http_bind = env::var("HTTP_BIND").unwrap_or_else(|_| format!("0.0.0.0:{port}"));
        let http_bind = http_bind.parse()?;

        let contact_emails = env::var("CONTACT_EMAILS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|email| !email.is_empty())
                    .map(str::to_owned)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_else(|_| default_contact_emails());

        let defaults = GenerationOptions::default();
        let generation = GenerationOptions {
            temperature: env_or("GEN_TEMPERATURE", defaults.temperature)?,
            max_tokens: env_or("GEN_MAX_TOKENS", defaults.max_tokens)?,
            top_p: env_or("GEN_TOP_P", defaults.top_p)?,
            frequency_penalty: env_or("GEN_FREQUENCY_PENALTY", defaults.frequency_penalty)?,
            presence_penalty: env_or("GEN_PRESENCE_PENALTY", defaults.presence_penalty)?,
            stop: defaults.stop,
        };

        Ok(Self {
            http_bind,
            ollama_url: env::var("OLLAMA_URL").ok(),
            ollama_model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "mistral".to_owned()),
            contact_emails,
            generation,
        })
    }
}

fn default_contact_emails() -> Vec<String> {
    vec![
        "info@shiraji.ae".to_owned(),
        "md@shirajiuea.ae".to_owned(),
        "imadfouri@shiraji.ae".to_owned(),
    ]
}

fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => Ok(raw.parse()?),
        Err(_) => Ok(default),
    }
}
