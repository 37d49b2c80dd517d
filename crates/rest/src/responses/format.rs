//! Format-aware response building.
//!
//! Encodes records in the negotiated wire format and labels the body with
//! that format's MIME type.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use twinform_model::Record;
use twinform_serde::{EncodeOptions, WireFormat, encode_record};

use crate::error::RestResult;

/// Builds an HTTP response whose body is `record` encoded in `format`.
pub fn format_record_response<R: Record>(
    status: StatusCode,
    record: &R,
    format: WireFormat,
    options: EncodeOptions,
) -> RestResult<Response> {
    let body = encode_record(record, format, options)?;
    Ok((status, [(header::CONTENT_TYPE, format.mime_type())], body).into_response())
}
