use axum::http::HeaderMap;
use std::borrow::Cow;

use crate::error::{AppError, AppResult};

pub const TOKEN_HEADER: &str = "token";

/// Token presented by the caller: the `token` header, else the query value,
/// else empty. A header that is not valid UTF-8 still wins over the query.
pub fn supplied_token<'a>(headers: &'a HeaderMap, query_token: Option<&'a str>) -> Cow<'a, str> {
    match headers.get(TOKEN_HEADER) {
        Some(value) => String::from_utf8_lossy(value.as_bytes()),
        None => Cow::Borrowed(query_token.unwrap_or_default()),
    }
}

/// Exact, case-sensitive comparison against the configured token
pub fn authorize(expected: &str, supplied: &str) -> AppResult<()> {
    if supplied == expected {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
