use crate::domain::model::FieldValue;
use crate::domain::ports::Destination;
use crate::domain::schema::{Column, ColumnFormat, Schema, TableRecord};
use crate::utils::error::{ImportError, Result};

/// Optional record remapping applied before buffering (field renaming,
/// masking, value fixup). An error here is returned without buffering.
pub type MapFn<T> = Box<dyn Fn(T) -> Result<T> + Send + Sync>;

/// Buffers validated records and turns each full batch into one bulk
/// `INSERT INTO <table> (<columns>) VALUES (...), (...)` statement.
///
/// The buffer never exceeds the configured batch size: `write` flushes
/// synchronously the moment the threshold is reached. A flush clears the
/// buffer whether or not the execute succeeded; failed batches are not
/// retried or requeued.
pub struct StreamWriter<T: TableRecord, D: Destination> {
    destination: D,
    table: String,
    schema: Schema,
    batch_size: usize,
    batch: Vec<T>,
    map: Option<MapFn<T>>,
    version_marker: i64,
}

impl<T: TableRecord, D: Destination> StreamWriter<T, D> {
    pub fn new(destination: D, table: impl Into<String>, batch_size: usize) -> Result<Self> {
        let schema = Schema::of::<T>().map_err(|e| ImportError::SchemaError {
            message: e.to_string(),
        })?;
        Ok(Self {
            destination,
            table: table.into(),
            schema,
            batch_size: batch_size.max(1),
            batch: Vec::new(),
            map: None,
            version_marker: 1,
        })
    }

    pub fn with_map(mut self, map: MapFn<T>) -> Self {
        self.map = Some(map);
        self
    }

    /// Value stamped into the version column (when the schema flags one) for
    /// every rendered tuple.
    pub fn with_version_marker(mut self, marker: i64) -> Self {
        self.version_marker = marker;
        self
    }

    pub fn buffered(&self) -> usize {
        self.batch.len()
    }

    /// Appends one record, flushing synchronously when the batch is full.
    pub async fn write(&mut self, record: T) -> Result<()> {
        let record = match &self.map {
            Some(map) => map(record)?,
            None => record,
        };
        self.batch.push(record);
        if self.batch.len() >= self.batch_size {
            return self.flush().await;
        }
        Ok(())
    }

    /// Serializes and executes the buffered batch as a single statement on a
    /// session scoped to this call. No-op on an empty buffer. The buffer is
    /// cleared on every exit path; a failed execute loses the batch.
    pub async fn flush(&mut self) -> Result<()> {
        if self.batch.is_empty() {
            return Ok(());
        }
        let statement = self.render_statement();
        let count = self.batch.len();

        tracing::debug!(table = %self.table, records = count, "flushing batch");
        let result = async {
            let mut session = self.destination.session().await?;
            session.exec(&statement).await
        }
        .await;
        self.batch.clear();
        if let Err(e) = &result {
            tracing::warn!(table = %self.table, records = count, error = %e, "flush failed, batch dropped");
        }
        result
    }

    fn render_statement(&self) -> String {
        let mut sql = String::new();
        sql.push_str("INSERT INTO ");
        sql.push_str(&self.table);
        sql.push_str(" (");
        sql.push_str(&self.schema.column_list());
        sql.push_str(") VALUES ");
        for (i, record) in self.batch.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push('(');
            let values = record.values();
            debug_assert_eq!(values.len(), self.schema.columns().len());
            for (j, (column, value)) in self.schema.columns().iter().zip(values).enumerate() {
                if j > 0 {
                    sql.push_str(", ");
                }
                if self.schema.version_index() == Some(j) {
                    sql.push_str(&self.version_marker.to_string());
                } else {
                    sql.push_str(&render_value(column, &value));
                }
            }
            sql.push(')');
        }
        sql
    }
}

fn render_value(column: &Column, value: &FieldValue) -> String {
    match (value, column.format) {
        (FieldValue::Null, _) => "NULL".to_string(),
        (FieldValue::Text(s), ColumnFormat::ZeroPad(width)) => {
            quote(&format!("{:0>width$}", s, width = width))
        }
        (FieldValue::Text(s), ColumnFormat::SpacePad(width)) => {
            quote(&format!("{:>width$}", s, width = width))
        }
        (FieldValue::Text(s), _) => quote(s),
        (FieldValue::Date(d), ColumnFormat::Date(fmt)) => quote(&d.format(fmt).to_string()),
        (FieldValue::Date(d), _) => quote(&d.format("%Y-%m-%d").to_string()),
    }
}

// Single quotes are doubled; other structural characters are assumed absent
// from input values.
fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}
