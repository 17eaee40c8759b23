use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
};
use std::sync::Arc;

use crate::{
    domain::synthesis::{
        RequestedFormat, SynthesisRequest, SynthesisService, SynthesisServiceApi,
    },
    error::{AppError, AppResult},
    infrastructure::auth::{authorize, supplied_token},
};

pub const FORMAT_HEADER: &str = "format";

pub struct SynthesisController {
    synthesis_service: Arc<SynthesisService>,
    expected_token: String,
}

impl SynthesisController {
    pub fn new(synthesis_service: Arc<SynthesisService>, expected_token: String) -> Self {
        Self {
            synthesis_service,
            expected_token,
        }
    }

    /// GET / - Convert text to speech
    pub async fn synthesize(
        State(controller): State<Arc<SynthesisController>>,
        headers: HeaderMap,
        Query(params): Query<Vec<(String, String)>>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let request = parse_query(params)?;

        let token = supplied_token(&headers, request.token.as_deref());
        authorize(&controller.expected_token, &token)?;

        let requested_format = requested_format(&headers, &request);

        tracing::info!(
            voice_name = %request.voice_name,
            rate = %request.rate,
            pitch = ?request.pitch,
            volume = ?request.volume,
            format = %requested_format,
            text_length = request.text.chars().count(),
            "Synthesis request"
        );

        let format = controller.synthesis_service.resolve_format(&requested_format)?;

        let result = controller
            .synthesis_service
            .synthesize(&request, format)
            .await?;

        let mut response_headers = HeaderMap::new();
        response_headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(result.content_type),
        );

        Ok((StatusCode::OK, response_headers, Body::from(result.audio_data)))
    }
}

/// Build a request from raw query pairs. For repeated keys the first value
/// wins, except `format`, where every value is kept.
fn parse_query(params: Vec<(String, String)>) -> AppResult<SynthesisRequest> {
    let mut voice_name = None;
    let mut pitch = None;
    let mut rate = None;
    let mut volume = None;
    let mut formats = Vec::new();
    let mut text = None;
    let mut token = None;

    for (key, value) in params {
        let slot = match key.as_str() {
            "voiceName" => &mut voice_name,
            "pitch" => &mut pitch,
            "rate" => &mut rate,
            "volume" => &mut volume,
            "text" => &mut text,
            "token" => &mut token,
            "format" => {
                formats.push(value);
                continue;
            }
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    let text = text.ok_or_else(|| {
        AppError::BadRequest("Missing required query parameter: text".to_string())
    })?;

    let mut request = SynthesisRequest::new(text);
    if let Some(voice_name) = voice_name {
        request.voice_name = voice_name;
    }
    if let Some(rate) = rate {
        request.rate = rate;
    }
    request.pitch = pitch;
    request.volume = volume;
    request.format = RequestedFormat::from_values(formats);
    request.token = token;

    Ok(request)
}

/// Format from the `format` header, else the query, else the default
fn requested_format(headers: &HeaderMap, request: &SynthesisRequest) -> RequestedFormat {
    let header_values: Vec<String> = headers
        .get_all(FORMAT_HEADER)
        .iter()
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .collect();

    RequestedFormat::from_values(header_values)
        .or_else(|| request.format.clone())
        .unwrap_or_else(RequestedFormat::default_format)
}
