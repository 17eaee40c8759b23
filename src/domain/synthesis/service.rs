use super::dto::{RequestedFormat, SynthesisRequest};
use super::error::SynthesisError;
use super::format::AudioFormat;
use super::retry::{retry, RetryPolicy};
use super::ssml::build_ssml;
use crate::infrastructure::repositories::{ConversionError, ConversionRepository};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Attempts made against the speech backend per request
pub const MAX_CONVERSION_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone)]
pub struct SynthesisResult {
    pub audio_data: Vec<u8>,
    pub content_type: &'static str,
}

pub struct SynthesisService {
    conversion_repo: Arc<dyn ConversionRepository>,
    retry_policy: RetryPolicy,
    attempt_timeout: Duration,
}

impl SynthesisService {
    pub fn new(conversion_repo: Arc<dyn ConversionRepository>, attempt_timeout: Duration) -> Self {
        Self {
            conversion_repo,
            retry_policy: RetryPolicy::new(MAX_CONVERSION_ATTEMPTS),
            attempt_timeout,
        }
    }
}

#[async_trait]
pub trait SynthesisServiceApi: Send + Sync {
    /// Validate a requested format against the registry
    fn resolve_format(&self, requested: &RequestedFormat) -> Result<AudioFormat, SynthesisError>;

    /// Synthesize speech for a request
    ///
    /// Builds the SSML, then calls the backend up to
    /// [`MAX_CONVERSION_ATTEMPTS`] times, each attempt bounded by the
    /// configured timeout.
    async fn synthesize(
        &self,
        request: &SynthesisRequest,
        format: AudioFormat,
    ) -> Result<SynthesisResult, SynthesisError>;
}

#[async_trait]
impl SynthesisServiceApi for SynthesisService {
    fn resolve_format(&self, requested: &RequestedFormat) -> Result<AudioFormat, SynthesisError> {
        match requested {
            RequestedFormat::Single(value) => AudioFormat::lookup(value)
                .ok_or_else(|| SynthesisError::InvalidFormat(value.clone())),
            RequestedFormat::Multiple(_) => {
                Err(SynthesisError::InvalidFormat(requested.to_string()))
            }
        }
    }

    async fn synthesize(
        &self,
        request: &SynthesisRequest,
        format: AudioFormat,
    ) -> Result<SynthesisResult, SynthesisError> {
        let ssml = build_ssml(&request.text, &request.voice_name, &request.rate);

        tracing::debug!(
            format = %format,
            ssml_length = ssml.len(),
            "SSML built"
        );

        let max_attempts = self.retry_policy.max_attempts();
        let audio_data = retry(
            self.retry_policy,
            || self.convert_once(&ssml, format),
            |attempt, error: &ConversionError| {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    error = %error,
                    "Attempt {} failed：{}",
                    attempt,
                    error
                );
            },
        )
        .await?;

        tracing::info!(
            format = %format,
            audio_size = audio_data.len(),
            "Speech synthesized"
        );

        Ok(SynthesisResult {
            audio_data,
            content_type: format.content_type,
        })
    }
}

impl SynthesisService {
    async fn convert_once(&self, ssml: &str, format: AudioFormat) -> Result<Vec<u8>, ConversionError> {
        match tokio::time::timeout(self.attempt_timeout, self.conversion_repo.convert(ssml, format.id))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(ConversionError::Timeout(self.attempt_timeout)),
        }
    }
}
