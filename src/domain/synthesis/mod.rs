pub mod dto;
pub mod error;
pub mod format;
pub mod retry;
pub mod service;
pub mod ssml;

pub use dto::{RequestedFormat, SynthesisRequest};
pub use error::SynthesisError;
pub use format::{supported_formats, AudioFormat, DEFAULT_FORMAT};
pub use retry::{retry, RetryExhausted, RetryPolicy};
pub use service::{SynthesisResult, SynthesisService, SynthesisServiceApi};
pub use ssml::build_ssml;
