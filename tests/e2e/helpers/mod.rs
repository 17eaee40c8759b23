use async_trait::async_trait;
use parking_lot::Mutex;
use speech_gateway::{
    controllers::synthesis::SynthesisController,
    domain::synthesis::SynthesisService,
    infrastructure::{
        config::{Config, Environment, LogFormat},
        http::build_router,
        repositories::{ConversionError, ConversionRepository},
    },
};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;


use api_client::TestClient;

pub const TEST_TOKEN: &str = "test-token";

/// One recorded call to the scripted backend
#[derive(Debug, Clone)]
pub struct ConversionCall {
    pub ssml: String,
    pub format: String,
}

/// Conversion repository that replays scripted outcomes in order, then
/// succeeds with [`mock_audio_bytes`] once the script runs out
pub struct ScriptedConversionRepository {
    outcomes: Mutex<VecDeque<Result<Vec<u8>, ConversionError>>>,
    calls: Mutex<Vec<ConversionCall>>,
}

impl ScriptedConversionRepository {
    pub fn new(outcomes: Vec<Result<Vec<u8>, ConversionError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<ConversionCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ConversionRepository for ScriptedConversionRepository {
    async fn convert(&self, ssml: &str, format: &str) -> Result<Vec<u8>, ConversionError> {
        self.calls.lock().push(ConversionCall {
            ssml: ssml.to_string(),
            format: format.to_string(),
        });
        let next = self.outcomes.lock().pop_front();
        next.unwrap_or_else(|| Ok(mock_audio_bytes()))
    }
}

pub struct TestContext {
    pub client: TestClient,
    #[allow(dead_code)]
    pub config: Config,
    pub conversion_repo: Arc<ScriptedConversionRepository>,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        Self::with_outcomes(Vec::new())
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {}
    }
}

impl TestContext {
    /// Start the app with a backend that replays `outcomes`
    pub async fn with_outcomes(outcomes: Vec<Result<Vec<u8>, ConversionError>>) -> Self {
        let conversion_repo = Arc::new(ScriptedConversionRepository::new(outcomes));
        let (client, config) = spawn_app(conversion_repo.clone()).await;

        Self {
            client,
            config,
            conversion_repo,
        }
    }
}

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0, // Will be assigned by the OS
        token: TEST_TOKEN.to_string(),
        synthesis_endpoint: "ws://127.0.0.1:9".to_string(),
        synthesis_attempt_timeout_secs: 5,
        environment: Environment::Development,
        log_format: LogFormat::Pretty,
    }
}

/// Serve the real router backed by `conversion_repo` on an ephemeral port
pub async fn spawn_app(conversion_repo: Arc<dyn ConversionRepository>) -> (TestClient, Config) {
    let config = test_config();

    let synthesis_service = Arc::new(SynthesisService::new(
        conversion_repo,
        Duration::from_secs(config.synthesis_attempt_timeout_secs),
    ));
    let synthesis_controller = Arc::new(SynthesisController::new(
        synthesis_service,
        config.token.clone(),
    ));
    let app = build_router(synthesis_controller);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to get local addr");
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (TestClient::new(&base_url), config)
}

pub fn mock_audio_bytes() -> Vec<u8> {
    // Minimal MP3 frame header followed by padding
    vec![
        0xFF, 0xFB, 0x90, 0x00, // MP3 frame header
        0x00, 0x00, 0x00, 0x00, // Some padding
    ]
}
