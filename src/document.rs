//! Persisted document formats.
//!
//! [`DataFormat::Archive`] is a versioned JSON document that keeps every
//! attribute, including custom keys this crate does not understand:
//!
//! ```json
//! {
//!   "version": 1,
//!   "text": "foo bar",
//!   "runs": [
//!     { "key": "font", "start": 4, "length": 3,
//!       "value": { "name": "system", "size": 16.0, "bold": true, "italic": false } }
//!   ]
//! }
//! ```
//!
//! [`DataFormat::PlainText`] is the bare UTF-8 text.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::attributes::{
    AttributeKey, AttributeValue, Color, Font, ImageAttachment, LineStyle, ParagraphStyle,
    StyledText, TextRange,
};

/// Current archive version
pub const ARCHIVE_VERSION: u32 = 1;

/// Byte formats a document can be stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataFormat {
    /// Versioned JSON with all attributes
    #[default]
    Archive,
    /// Text only; attributes are dropped on encode
    PlainText,
}

impl DataFormat {
    /// File extension conventionally used for the format
    pub fn extension(&self) -> &'static str {
        match self {
            DataFormat::Archive => "rtxt",
            DataFormat::PlainText => "txt",
        }
    }
}

/// Errors from encoding or decoding a document
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("malformed archive: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported archive version {found} (expected {})", ARCHIVE_VERSION)]
    UnsupportedVersion { found: u32 },

    #[error("run of {key} at {start}..{end} exceeds text length {len}")]
    RunOutOfBounds {
        key: String,
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("runs of {key} overlap at {at}")]
    OverlappingRuns { key: String, at: usize },

    #[error("value of {key} has the wrong type")]
    InvalidValue { key: String },

    #[error("text is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct Archive {
    version: u32,
    text: String,
    #[serde(default)]
    runs: Vec<ArchivedRun>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ArchivedRun {
    key: String,
    start: usize,
    length: usize,
    value: serde_json::Value,
}

/// Encode `text` in `format`
pub fn encode(text: &StyledText, format: DataFormat) -> Result<Vec<u8>, DocumentError> {
    match format {
        DataFormat::PlainText => Ok(text.string().into_bytes()),
        DataFormat::Archive => {
            let mut runs = Vec::new();
            for key in text.keys() {
                for run in text.runs(key) {
                    runs.push(ArchivedRun {
                        key: key.name().to_string(),
                        start: run.start,
                        length: run.len,
                        value: value_to_json(&run.value)?,
                    });
                }
            }
            let archive = Archive {
                version: ARCHIVE_VERSION,
                text: text.string(),
                runs,
            };
            Ok(serde_json::to_vec(&archive)?)
        }
    }
}

/// Decode a document. Either the whole document is valid or nothing is
/// returned.
pub fn decode(bytes: &[u8], format: DataFormat) -> Result<StyledText, DocumentError> {
    match format {
        DataFormat::PlainText => Ok(StyledText::plain(&String::from_utf8(bytes.to_vec())?)),
        DataFormat::Archive => {
            let archive: Archive = serde_json::from_slice(bytes)?;
            if archive.version != ARCHIVE_VERSION {
                return Err(DocumentError::UnsupportedVersion {
                    found: archive.version,
                });
            }
            build(archive)
        }
    }
}

fn build(archive: Archive) -> Result<StyledText, DocumentError> {
    let mut text = StyledText::plain(&archive.text);
    let len = text.len();

    for run in &archive.runs {
        if run.start.checked_add(run.length).map_or(true, |end| end > len) {
            return Err(DocumentError::RunOutOfBounds {
                key: run.key.clone(),
                start: run.start,
                end: run.start.saturating_add(run.length),
                len,
            });
        }
    }

    // Every run ends within the text, so `start + length` cannot overflow below
    let mut runs: Vec<_> = archive.runs.into_iter().filter(|run| run.length > 0).collect();
    runs.sort_by(|a, b| a.key.cmp(&b.key).then(a.start.cmp(&b.start)));

    for pair in runs.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if a.key == b.key && a.start + a.length > b.start {
            return Err(DocumentError::OverlappingRuns {
                key: b.key.clone(),
                at: b.start,
            });
        }
    }

    for run in runs {
        let key = AttributeKey::from_name(&run.key);
        let value = value_from_json(&key, run.value)?;
        text.set_attribute(key, value, TextRange::new(run.start, run.length));
    }

    tracing::debug!(chars = len, "decoded archive");
    Ok(text)
}

fn value_to_json(value: &AttributeValue) -> Result<serde_json::Value, serde_json::Error> {
    match value {
        AttributeValue::Font(font) => serde_json::to_value(font),
        AttributeValue::Color(color) => serde_json::to_value(color),
        AttributeValue::Line(style) => serde_json::to_value(style),
        AttributeValue::ParagraphStyle(style) => serde_json::to_value(style),
        AttributeValue::Link(url) => serde_json::to_value(url),
        AttributeValue::Attachment(image) => serde_json::to_value(image),
        AttributeValue::Raw(raw) => Ok(raw.clone()),
    }
}

/// Read the value of `key`. Known keys must hold their own type; custom
/// keys keep whatever JSON they carry.
fn value_from_json(
    key: &AttributeKey,
    json: serde_json::Value,
) -> Result<AttributeValue, DocumentError> {
    let invalid = |_: serde_json::Error| DocumentError::InvalidValue {
        key: key.name().to_string(),
    };
    let value = match key {
        AttributeKey::Font => {
            AttributeValue::Font(serde_json::from_value::<Font>(json).map_err(invalid)?)
        }
        AttributeKey::ForegroundColor
        | AttributeKey::BackgroundColor
        | AttributeKey::UnderlineColor
        | AttributeKey::StrikethroughColor
        | AttributeKey::StrokeColor => {
            AttributeValue::Color(serde_json::from_value::<Color>(json).map_err(invalid)?)
        }
        AttributeKey::UnderlineStyle | AttributeKey::StrikethroughStyle => {
            AttributeValue::Line(serde_json::from_value::<LineStyle>(json).map_err(invalid)?)
        }
        AttributeKey::ParagraphStyle => AttributeValue::ParagraphStyle(
            serde_json::from_value::<ParagraphStyle>(json).map_err(invalid)?,
        ),
        AttributeKey::Link => {
            AttributeValue::Link(serde_json::from_value::<String>(json).map_err(invalid)?)
        }
        AttributeKey::Attachment => AttributeValue::Attachment(
            serde_json::from_value::<ImageAttachment>(json).map_err(invalid)?,
        ),
        AttributeKey::Custom(_) => AttributeValue::Raw(json),
    };
    Ok(value)
}
