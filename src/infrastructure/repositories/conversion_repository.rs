use async_trait::async_trait;
use std::time::Duration;

/// Failure of a single conversion attempt
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("failed to connect to speech backend: {0}")]
    Connect(String),
    #[error("speech backend transport error: {0}")]
    Transport(String),
    #[error("malformed message from speech backend: {0}")]
    Protocol(String),
    #[error("speech backend closed the connection before synthesis finished")]
    ClosedEarly,
    #[error("speech backend returned no audio")]
    EmptyAudio,
    #[error("speech backend did not finish within {}s", .0.as_secs_f32())]
    Timeout(Duration),
}

/// Repository for speech conversion.
/// Abstracts the backend that turns an SSML document into encoded audio.
///
/// Implementations must return an error rather than wait forever when the
/// backend is unreachable, rejects the document, or does not support the
/// requested output format.
#[async_trait]
pub trait ConversionRepository: Send + Sync {
    /// Convert an SSML document to audio
    ///
    /// # Arguments
    /// * `ssml` - The complete SSML document
    /// * `format` - Output format identifier, already validated against the registry
    async fn convert(&self, ssml: &str, format: &str) -> Result<Vec<u8>, ConversionError>;
}
