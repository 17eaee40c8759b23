use super::retry::RetryExhausted;
use crate::infrastructure::repositories::ConversionError;

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("无效的音频格式：{0}")]
    InvalidFormat(String),
    #[error(transparent)]
    Exhausted(#[from] RetryExhausted<ConversionError>),
}
