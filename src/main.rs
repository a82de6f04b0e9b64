use std::sync::Arc;

use shiraji_chat::{
    config::AppConfig,
    http::{self, AppState},
    model::{MockModelProvider, ModelProvider, OllamaProvider},
    orchestrator::ChatOrchestrator,
    prompt,
    session::SessionStore,
};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let model = build_model_provider(&config)?;
    let persona = prompt::render_persona(&config.contact_emails);

    let orchestrator = Arc::new(ChatOrchestrator::new(
        model,
        SessionStore::default(),
        persona,
    ));

    let app = http::router(AppState { orchestrator });
    let listener = TcpListener::bind(config.http_bind).await?;
    info!("Shiraji chat API listening on {}", config.http_bind);

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .init();
}

fn build_model_provider(config: &AppConfig) -> anyhow::Result<Arc<dyn ModelProvider>> {
    if let Some(url) = config.ollama_url.clone() {
        let provider =
            OllamaProvider::new(url, config.ollama_model.clone(), config.generation.clone())?;
        info!(model = %config.ollama_model, "using Ollama model provider");
        Ok(Arc::new(provider))
    } else {
        warn!("OLLAMA_URL is not set; using mock model provider");
        Ok(Arc::new(MockModelProvider))
    }
}
