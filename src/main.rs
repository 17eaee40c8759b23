use anyhow::anyhow;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use speech_gateway::controllers::synthesis::SynthesisController;
use speech_gateway::domain::synthesis::{supported_formats, SynthesisService};
use speech_gateway::infrastructure::config::{Config, LogFormat};
use speech_gateway::infrastructure::http::start_http_server;
use speech_gateway::infrastructure::repositories::EdgeConversionRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    // Must happen before the first wss:// connection
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("Failed to install default crypto provider"))?;

    tracing::info!(
        "Starting speech gateway on {}:{}",
        config.host,
        config.port
    );
    tracing::info!(
        endpoint = %config.synthesis_endpoint,
        attempt_timeout_secs = config.synthesis_attempt_timeout_secs,
        "Speech backend configured"
    );
    if config.is_development() {
        tracing::debug!(
            formats = ?supported_formats().collect::<Vec<_>>(),
            "Supported audio formats"
        );
    }
    if config.token.is_empty() {
        tracing::warn!("TOKEN is empty; requests without a token will be accepted");
    }

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    let conversion_repo = Arc::new(EdgeConversionRepository::new(
        config.synthesis_endpoint.clone(),
    ));
    let synthesis_service = Arc::new(SynthesisService::new(
        conversion_repo,
        config.attempt_timeout(),
    ));
    let synthesis_controller = Arc::new(SynthesisController::new(
        synthesis_service,
        config.token.clone(),
    ));

    start_http_server(config, synthesis_controller).await
}

fn init_logging(config: &Config) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "speech_gateway=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
