use crate::domain::model::{FieldViolation, TransformError};
use std::collections::HashMap;

/// Static metadata attached to every reported failure: the source file name
/// plus free-form run tags (app name, environment, ...). Built once per run
/// and passed to the orchestrator; never shared process-wide.
#[derive(Debug, Clone, Default)]
pub struct ReportContext {
    pub file_name: String,
    pub tags: HashMap<String, String>,
}

impl ReportContext {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            tags: HashMap::new(),
        }
    }

    pub fn tag(mut self, key: &str, value: &str) -> Self {
        self.tags.insert(key.to_string(), value.to_string());
        self
    }
}

/// Classifies and reports per-record failures to the structured log sink.
/// Reporting never fails the caller; the importer always continues (or
/// stops) based on its own rules, not on the sink.
pub struct ErrorHandler {
    context: ReportContext,
}

impl ErrorHandler {
    pub fn new(context: ReportContext) -> Self {
        Self { context }
    }

    /// A record that failed one or more field constraints.
    pub fn handle_error(&self, line_no: u64, violations: &[FieldViolation]) {
        let detail = serde_json::to_string(violations).unwrap_or_default();
        tracing::error!(
            file_name = %self.context.file_name,
            line_no,
            tags = %self.tags_json(),
            violations = %detail,
            "record failed validation"
        );
    }

    /// A raw unit that could not be transformed into a record at all.
    pub fn handle_exception(&self, line_no: u64, err: &TransformError) {
        tracing::error!(
            file_name = %self.context.file_name,
            line_no,
            tags = %self.tags_json(),
            error = %err,
            "record failed transform"
        );
    }

    fn tags_json(&self) -> String {
        serde_json::to_string(&self.context.tags).unwrap_or_default()
    }
}
