use crate::core::error_handler::ErrorHandler;
use crate::core::writer::StreamWriter;
use crate::domain::model::{CancelFlag, ImportSummary};
use crate::domain::ports::{Destination, Transformer, UnitReader, Validator};
use crate::domain::schema::TableRecord;
use crate::utils::error::ImportError;

/// Drives one import run: read → transform → validate → buffer, strictly in
/// input order, then a final flush once the reader is exhausted.
///
/// Transform and validation failures are per-record: they are reported,
/// counted, and skipped. Write and read failures are fatal and stop the run
/// with the counts accumulated so far. `succeeded` only counts records whose
/// flush completed, so records lost in a failed batch are never credited.
pub struct Importer<T, R, X, V, D>
where
    T: TableRecord,
    R: UnitReader,
    X: Transformer<T>,
    V: Validator<T>,
    D: Destination,
{
    reader: R,
    transformer: X,
    validator: V,
    writer: StreamWriter<T, D>,
    errors: ErrorHandler,
    cancel: CancelFlag,
}

impl<T, R, X, V, D> Importer<T, R, X, V, D>
where
    T: TableRecord,
    R: UnitReader,
    X: Transformer<T>,
    V: Validator<T>,
    D: Destination,
{
    pub fn new(
        reader: R,
        transformer: X,
        validator: V,
        writer: StreamWriter<T, D>,
        errors: ErrorHandler,
        cancel: CancelFlag,
    ) -> Self {
        Self {
            reader,
            transformer,
            validator,
            writer,
            errors,
            cancel,
        }
    }

    /// Runs the pipeline to completion. The summary is always returned; the
    /// error slot is filled only for fatal conditions (read, write, cancel).
    pub async fn run(mut self) -> (ImportSummary, Option<ImportError>) {
        let mut summary = ImportSummary::default();
        let mut pending = 0usize;
        let mut line_no = 0u64;

        loop {
            if self.cancel.is_cancelled() {
                return (summary, Some(ImportError::Cancelled));
            }

            let unit = match self.reader.read().await {
                Ok(Some(unit)) => unit,
                Ok(None) => break,
                Err(e) => return (summary, Some(e)),
            };
            line_no += 1;

            let record = match self.transformer.transform(&unit) {
                Ok(record) => record,
                Err(e) => {
                    self.errors.handle_exception(line_no, &e);
                    summary.failed += 1;
                    continue;
                }
            };

            let violations = self.validator.validate(&record);
            if !violations.is_empty() {
                self.errors.handle_error(line_no, &violations);
                summary.failed += 1;
                continue;
            }

            if let Err(e) = self.writer.write(record).await {
                return (summary, Some(e));
            }
            pending += 1;
            // An empty buffer right after a write means the write flushed.
            if self.writer.buffered() == 0 {
                summary.succeeded += pending;
                pending = 0;
            }
        }

        if self.cancel.is_cancelled() {
            return (summary, Some(ImportError::Cancelled));
        }
        if let Err(e) = self.writer.flush().await {
            return (summary, Some(e));
        }
        summary.succeeded += pending;

        tracing::info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            lines = line_no,
            "import run complete"
        );
        (summary, None)
    }
}
