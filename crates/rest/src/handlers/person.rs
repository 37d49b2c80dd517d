//! Person pass-through handler.
//!
//! Implements `POST [base]/api/person`: the body is decoded in the format
//! named by `Content-Type` and the same record is sent back in the format
//! selected from `Accept`.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::Response,
};
use tracing::{debug, info};
use twinform_model::Person;
use twinform_serde::decode;

use crate::error::{ErrorResponse, RestResult};
use crate::middleware::content_type::{
    negotiate_response_format, request_content_type, request_format,
};
use crate::responses::format_record_response;
use crate::state::AppState;

/// Handler for the person echo interaction.
///
/// # HTTP Request
///
/// `POST [base]/api/person`
///
/// # Headers
///
/// - `Content-Type` - `application/json` or `application/xml` (and their aliases)
/// - `Accept` - Response format; JSON when absent or a wildcard
///
/// # Response
///
/// - `200 OK` - The record, unmodified, in the negotiated format
/// - `400 Bad Request` - Malformed body or invalid field value
/// - `406 Not Acceptable` - No acceptable format can be produced
/// - `415 Unsupported Media Type` - Missing or unsupported `Content-Type`
///
/// # Example
///
/// ```http
/// POST /api/person HTTP/1.1
/// Content-Type: application/json
/// Accept: application/xml
///
/// {"id": 1, "name": "John Doe"}
/// ```
pub async fn person_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ErrorResponse> {
    echo_person(&state, &headers, &body)
        .map_err(|err| err.in_request(&method, &uri, request_content_type(&headers)))
}

fn echo_person(state: &AppState, headers: &HeaderMap, body: &[u8]) -> RestResult<Response> {
    let input = request_format(headers)?;
    let output = negotiate_response_format(headers)?;

    debug!(%input, %output, bytes = body.len(), "Processing person request");

    let person: Person = decode(body, input)?;

    info!(
        content_type = request_content_type(headers).unwrap_or("null"),
        accept = headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("null"),
        id = ?person.id,
        name = ?person.name,
        "POST /api/person"
    );

    format_record_response(StatusCode::OK, &person, output, state.encode_options())
}
