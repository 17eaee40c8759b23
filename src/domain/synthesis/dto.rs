use super::format::DEFAULT_FORMAT;

pub const DEFAULT_VOICE_NAME: &str = "zh-CN-XiaoxiaoNeural";
pub const DEFAULT_RATE: &str = "0.00";

/// Parameters for GET /, with defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub voice_name: String,
    /// Accepted for compatibility; not rendered into the SSML
    pub pitch: Option<String>,
    pub rate: String,
    /// Accepted for compatibility; not rendered into the SSML
    pub volume: Option<String>,
    pub format: Option<RequestedFormat>,
    pub text: String,
    pub token: Option<String>,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            voice_name: DEFAULT_VOICE_NAME.to_string(),
            pitch: None,
            rate: DEFAULT_RATE.to_string(),
            volume: None,
            format: None,
            text: text.into(),
            token: None,
        }
    }
}

/// Format as the caller sent it, before registry validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestedFormat {
    Single(String),
    /// The format was given more than once
    Multiple(Vec<String>),
}

impl RequestedFormat {
    /// Collapse raw values into a format; `None` when there are none.
    pub fn from_values(mut values: Vec<String>) -> Option<Self> {
        match values.len() {
            0 => None,
            1 => values.pop().map(Self::Single),
            _ => Some(Self::Multiple(values)),
        }
    }

    pub fn default_format() -> Self {
        Self::Single(DEFAULT_FORMAT.to_string())
    }
}

impl std::fmt::Display for RequestedFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(value) => f.write_str(value),
            Self::Multiple(values) => f.write_str(&values.join(",")),
        }
    }
}
