use super::conversion_repository::{ConversionError, ConversionRepository};
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::{header, HeaderValue};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};
use uuid::Uuid;

/// Public read-aloud endpoint of the Edge speech service
pub const DEFAULT_EDGE_ENDPOINT: &str = "wss://speech.platform.bing.com/consumer/speech/synthesize/readaloud/edge/v1?TrustedClientToken=6A5AA1D4EAFF4E9FB37E23D68491D6F4";

const EDGE_ORIGIN: &str = "chrome-extension://jdiccldimpdaibmpdkjnbmckianbfold";
const EDGE_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0";

/// Edge read-aloud implementation of the conversion repository.
///
/// Opens one WebSocket connection per conversion. Audio arrives as binary
/// frames until the service sends `turn.end`.
pub struct EdgeConversionRepository {
    endpoint: String,
}

impl EdgeConversionRepository {
    pub fn new(endpoint: String) -> Self {
        Self { endpoint }
    }

    fn connection_url(&self, connection_id: &str) -> String {
        let separator = if self.endpoint.contains('?') { '&' } else { '?' };
        format!("{}{}ConnectionId={}", self.endpoint, separator, connection_id)
    }
}

#[async_trait]
impl ConversionRepository for EdgeConversionRepository {
    async fn convert(&self, ssml: &str, format: &str) -> Result<Vec<u8>, ConversionError> {
        let start_time = std::time::Instant::now();
        let connection_id = Uuid::new_v4().simple().to_string();
        let url = self.connection_url(&connection_id);

        let mut request = url
            .as_str()
            .into_client_request()
            .map_err(|e| ConversionError::Connect(e.to_string()))?;
        let headers = request.headers_mut();
        headers.insert(header::ORIGIN, HeaderValue::from_static(EDGE_ORIGIN));
        headers.insert(header::USER_AGENT, HeaderValue::from_static(EDGE_USER_AGENT));
        headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        tracing::debug!(
            connection_id = %connection_id,
            format = format,
            ssml_length = ssml.len(),
            "Connecting to speech backend"
        );

        let (mut ws_stream, _response) = connect_async(request)
            .await
            .map_err(|e| ConversionError::Connect(e.to_string()))?;

        let timestamp = timestamp();
        ws_stream
            .send(Message::Text(speech_config_message(format, &timestamp)))
            .await
            .map_err(|e| ConversionError::Transport(e.to_string()))?;
        ws_stream
            .send(Message::Text(ssml_message(&connection_id, ssml, &timestamp)))
            .await
            .map_err(|e| ConversionError::Transport(e.to_string()))?;

        let mut audio_data = Vec::new();
        while let Some(message) = ws_stream.next().await {
            let message = message.map_err(|e| ConversionError::Transport(e.to_string()))?;
            match message {
                Message::Binary(data) => {
                    if let Some(chunk) = parse_audio_frame(&data)? {
                        audio_data.extend_from_slice(chunk);
                    }
                }
                Message::Text(text) => match message_path(&text) {
                    Some("turn.end") => {
                        // Best effort, the audio is already complete
                        let _ = ws_stream.close(None).await;

                        if audio_data.is_empty() {
                            return Err(ConversionError::EmptyAudio);
                        }

                        tracing::debug!(
                            connection_id = %connection_id,
                            audio_size = audio_data.len(),
                            elapsed_ms = start_time.elapsed().as_millis() as u64,
                            "Speech backend turn completed"
                        );
                        return Ok(audio_data);
                    }
                    path => tracing::trace!(path = ?path, "Speech backend text message"),
                },
                Message::Close(frame) => {
                    tracing::debug!(close_frame = ?frame, "Speech backend closed connection");
                    return Err(ConversionError::ClosedEarly);
                }
                _ => {}
            }
        }

        Err(ConversionError::ClosedEarly)
    }
}

/// JavaScript `Date.toString()` rendering, as the service expects
fn timestamp() -> String {
    chrono::Utc::now()
        .format("%a %b %d %Y %H:%M:%S GMT+0000 (Coordinated Universal Time)")
        .to_string()
}

pub(crate) fn speech_config_message(format: &str, timestamp: &str) -> String {
    let config = serde_json::json!({
        "context": {
            "synthesis": {
                "audio": {
                    "metadataoptions": {
                        "sentenceBoundaryEnabled": "false",
                        "wordBoundaryEnabled": "false"
                    },
                    "outputFormat": format
                }
            }
        }
    });

    format!(
        "X-Timestamp:{}\r\nContent-Type:application/json; charset=utf-8\r\nPath:speech.config\r\n\r\n{}",
        timestamp, config
    )
}

pub(crate) fn ssml_message(request_id: &str, ssml: &str, timestamp: &str) -> String {
    format!(
        "X-RequestId:{}\r\nContent-Type:application/ssml+xml\r\nX-Timestamp:{}Z\r\nPath:ssml\r\n\r\n{}",
        request_id, timestamp, ssml
    )
}

/// Value of the `Path` header in a header block
fn header_path(headers: &str) -> Option<&str> {
    headers
        .split("\r\n")
        .find_map(|line| line.strip_prefix("Path:"))
        .map(str::trim)
}

/// `Path` of a text message; headers end at the first blank line
pub(crate) fn message_path(text: &str) -> Option<&str> {
    let headers = text.split("\r\n\r\n").next().unwrap_or_default();
    header_path(headers)
}

/// Split a binary frame into its header block and payload.
///
/// Layout: 2-byte big-endian header length, header text, then audio.
/// Returns the payload only for `Path:audio` frames.
pub(crate) fn parse_audio_frame(data: &[u8]) -> Result<Option<&[u8]>, ConversionError> {
    if data.len() < 2 {
        return Err(ConversionError::Protocol(format!(
            "binary frame of {} bytes has no header length",
            data.len()
        )));
    }

    let header_len = u16::from_be_bytes([data[0], data[1]]) as usize;
    let body = &data[2..];
    if body.len() < header_len {
        return Err(ConversionError::Protocol(format!(
            "header length {} exceeds frame size {}",
            header_len,
            body.len()
        )));
    }

    let (headers, payload) = body.split_at(header_len);
    let headers = String::from_utf8_lossy(headers);
    match header_path(&headers) {
        Some("audio") => Ok(Some(payload)),
        _ => Ok(None),
    }
}
