//! Reverse Tutor HTTP server.

use std::sync::Arc;

use secrecy::ExposeSecret;
use tracing_subscriber::EnvFilter;

use reverse_tutor::adapters::ai::{GeminiConfig, GeminiProvider, MockTextGenerator};
use reverse_tutor::adapters::http::{api_router, TeachingHandlers};
use reverse_tutor::adapters::storage::InMemorySessionStore;
use reverse_tutor::config::{AiConfig, AiProvider, AppConfig};
use reverse_tutor::ports::TextGenerator;

/// Reply used by the offline mock provider.
const MOCK_QUESTION: &str =
    "How would your explanation change if the input were twice as long?";

fn build_generator(ai: &AiConfig) -> Result<Arc<dyn TextGenerator>, Box<dyn std::error::Error>> {
    match ai.provider {
        AiProvider::Gemini => {
            let api_key = ai
                .gemini_api_key
                .as_ref()
                .map(|k| k.expose_secret().clone())
                .unwrap_or_default();
            let config = GeminiConfig::new(api_key)
                .with_model(ai.model.clone())
                .with_base_url(ai.base_url.clone())
                .with_timeout(ai.timeout());
            Ok(Arc::new(GeminiProvider::new(config)?))
        }
        AiProvider::Mock => Ok(Arc::new(
            MockTextGenerator::new().with_default_response(MOCK_QUESTION),
        )),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.server.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    config.validate()?;

    let generator = build_generator(&config.ai)?;
    let provider = generator.provider_info();
    tracing::info!(provider = %provider.name, model = %provider.model, "Text generator ready");

    let store = Arc::new(InMemorySessionStore::new());
    let handlers = TeachingHandlers::wire(store.clone(), generator, &config.ai, &config.teaching);
    let app = api_router(handlers, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Reverse Tutor listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.clear().await;
    tracing::info!("Shutdown complete");
    Ok(())
}
