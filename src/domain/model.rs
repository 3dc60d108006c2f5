use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// One raw unit pulled from the input source: a single line, before framing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawUnit {
    pub text: String,
}

impl RawUnit {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A field value as seen by the statement renderer. Records expose their
/// fields in schema order through this type so the renderer can apply the
/// column's format rule without knowing the record struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
    Null,
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

/// A single field-level constraint violation produced by validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &str, code: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// A raw unit could not become a typed record. Recoverable: the importer
/// skips the line and keeps going.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct TransformError {
    pub message: String,
}

impl TransformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Per-run counters returned to the caller. `succeeded` counts records
/// durably flushed to the destination, not records merely buffered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Cooperative cancellation signal, checked between units and before each
/// flush. Cancelling mid-run leaves buffered records un-flushed.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Capability for record types that can be decoded from an ordered list of
/// raw string fields (one per column, produced by a framing adapter).
pub trait FromFields: Sized {
    /// Number of fields a well-formed unit must carry.
    const FIELD_COUNT: usize;

    fn from_fields(fields: &[String]) -> Result<Self, TransformError>;
}
