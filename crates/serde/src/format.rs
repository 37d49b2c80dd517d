//! Wire format identifiers and output options.

use std::fmt;

/// The two wire formats a record can be exchanged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireFormat {
    /// Key-value trees: JSON.
    NestedObject,
    /// Named tags with attributes and ordered children: XML.
    TaggedElement,
}

impl WireFormat {
    /// Every format, in the order a server prefers to produce them.
    pub const ALL: [WireFormat; 2] = [WireFormat::NestedObject, WireFormat::TaggedElement];

    /// Canonical MIME type used when producing this format.
    pub fn mime_type(self) -> &'static str {
        match self {
            WireFormat::NestedObject => "application/json",
            WireFormat::TaggedElement => "application/xml",
        }
    }

    /// Maps a media type (parameters allowed) to a format.
    ///
    /// Accepts `application/json` and any `+json` suffix for JSON, and
    /// `application/xml`, `text/xml` and any `+xml` suffix for XML.
    ///
    /// ```
    /// use twinform_serde::WireFormat;
    ///
    /// assert_eq!(
    ///     WireFormat::from_media_type("application/json; charset=utf-8"),
    ///     Some(WireFormat::NestedObject)
    /// );
    /// assert_eq!(WireFormat::from_media_type("text/xml"), Some(WireFormat::TaggedElement));
    /// assert_eq!(WireFormat::from_media_type("text/plain"), None);
    /// ```
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "application/json" => Some(WireFormat::NestedObject),
            "application/xml" | "text/xml" => Some(WireFormat::TaggedElement),
            other if other.ends_with("+json") => Some(WireFormat::NestedObject),
            other if other.ends_with("+xml") => Some(WireFormat::TaggedElement),
            _ => None,
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireFormat::NestedObject => write!(f, "JSON"),
            WireFormat::TaggedElement => write!(f, "XML"),
        }
    }
}

/// Options controlling encoder output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Indent nested structure by two spaces per level.
    pub pretty: bool,
}

impl EncodeOptions {
    /// Compact output.
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Indented output.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}
