//! Response formatting for the person API.
//!
//! - [`format`] - Encoding records in the negotiated format

pub mod format;

pub use format::format_record_response;
