//! Audio output formats accepted by the speech backend.
//!
//! The identifiers are part of the public API: clients send them verbatim in
//! the `format` header or query parameter, so entries must never be renamed.

/// Format used when the caller does not ask for one
pub const DEFAULT_FORMAT: &str = "audio-24khz-48kbitrate-mono-mp3";

static FORMAT_CONTENT_TYPES: [(&str, &str); 24] = [
    ("raw-16khz-16bit-mono-pcm", "audio/basic"),
    ("raw-48khz-16bit-mono-pcm", "audio/basic"),
    ("raw-8khz-8bit-mono-mulaw", "audio/basic"),
    ("raw-8khz-8bit-mono-alaw", "audio/basic"),
    ("raw-16khz-16bit-mono-truesilk", "audio/SILK"),
    ("raw-24khz-16bit-mono-truesilk", "audio/SILK"),
    ("riff-16khz-16bit-mono-pcm", "audio/x-wav"),
    ("riff-24khz-16bit-mono-pcm", "audio/x-wav"),
    ("riff-48khz-16bit-mono-pcm", "audio/x-wav"),
    ("riff-8khz-8bit-mono-mulaw", "audio/x-wav"),
    ("riff-8khz-8bit-mono-alaw", "audio/x-wav"),
    ("audio-16khz-32kbitrate-mono-mp3", "audio/mpeg"),
    ("audio-16khz-64kbitrate-mono-mp3", "audio/mpeg"),
    ("audio-16khz-128kbitrate-mono-mp3", "audio/mpeg"),
    ("audio-24khz-48kbitrate-mono-mp3", "audio/mpeg"),
    ("audio-24khz-96kbitrate-mono-mp3", "audio/mpeg"),
    ("audio-24khz-160kbitrate-mono-mp3", "audio/mpeg"),
    ("audio-48khz-96kbitrate-mono-mp3", "audio/mpeg"),
    ("audio-48khz-192kbitrate-mono-mp3", "audio/mpeg"),
    ("webm-16khz-16bit-mono-opus", "audio/webm; codec=opus"),
    ("webm-24khz-16bit-mono-opus", "audio/webm; codec=opus"),
    ("ogg-16khz-16bit-mono-opus", "audio/ogg; codecs=opus; rate=16000"),
    ("ogg-24khz-16bit-mono-opus", "audio/ogg; codecs=opus; rate=24000"),
    ("ogg-48khz-16bit-mono-opus", "audio/ogg; codecs=opus; rate=48000"),
];

/// A format identifier known to the registry, paired with its MIME type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    pub id: &'static str,
    pub content_type: &'static str,
}

impl AudioFormat {
    /// Look up a format by identifier. Matching is exact and case-sensitive.
    pub fn lookup(id: &str) -> Option<Self> {
        FORMAT_CONTENT_TYPES
            .iter()
            .find(|(known, _)| *known == id)
            .map(|&(id, content_type)| Self { id, content_type })
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id)
    }
}

/// All known format identifiers, in registry order
pub fn supported_formats() -> impl Iterator<Item = &'static str> {
    FORMAT_CONTENT_TYPES.iter().map(|(id, _)| *id)
}
