//! Content negotiation.
//!
//! Picks the wire format used to decode a request body (from `Content-Type`)
//! and the one used to encode the response (from `Accept`).

use axum::http::{HeaderMap, header};
use twinform_serde::WireFormat;

use crate::error::{RestError, RestResult};

/// Returns the request's `Content-Type` header, if present and readable.
pub fn request_content_type(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
}

/// Determines the format of the request body from the `Content-Type` header.
///
/// A missing or unsupported content type is rejected; no format is guessed.
pub fn request_format(headers: &HeaderMap) -> RestResult<WireFormat> {
    let content_type = request_content_type(headers);
    content_type
        .and_then(WireFormat::from_media_type)
        .ok_or_else(|| RestError::UnsupportedMediaType {
            content_type: content_type.map(str::to_owned),
        })
}

/// Determines the response format from the `Accept` header.
///
/// Ranges are tried from the highest quality value down, in header order on
/// ties. A missing header, `*/*` and `application/*` select JSON; `text/*`
/// selects XML. Ranges with `q=0` are never chosen.
pub fn negotiate_response_format(headers: &HeaderMap) -> RestResult<WireFormat> {
    let Some(accept) = headers.get(header::ACCEPT) else {
        return Ok(WireFormat::NestedObject);
    };
    let accept = accept.to_str().unwrap_or_default();
    if accept.trim().is_empty() {
        return Ok(WireFormat::NestedObject);
    }

    let mut ranges: Vec<(&str, f32)> = accept.split(',').map(parse_media_range).collect();
    // Stable sort keeps header order among equal weights.
    ranges.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranges
        .into_iter()
        .filter(|(_, quality)| *quality > 0.0)
        .find_map(|(range, _)| match_range(range))
        .ok_or_else(|| RestError::NotAcceptable {
            accept: accept.to_string(),
        })
}

/// Splits a media range into its essence and quality value.
fn parse_media_range(range: &str) -> (&str, f32) {
    let mut parts = range.split(';');
    let essence = parts.next().unwrap_or_default().trim();
    let quality = parts
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("q"))
        .and_then(|(_, value)| value.trim().parse::<f32>().ok())
        .unwrap_or(1.0);
    (essence, quality)
}

fn match_range(range: &str) -> Option<WireFormat> {
    match range.to_ascii_lowercase().as_str() {
        "*/*" | "application/*" => Some(WireFormat::NestedObject),
        "text/*" => Some(WireFormat::TaggedElement),
        other => WireFormat::from_media_type(other),
    }
}
