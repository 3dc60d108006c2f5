use crate::domain::model::FieldValue;
use thiserror::Error;

/// How a column's value is rendered into the bulk statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnFormat {
    /// Rendered as-is (quoted).
    Plain,
    /// Left-padded with zeros to the given width.
    ZeroPad(usize),
    /// Left-padded with spaces to the given width.
    SpacePad(usize),
    /// Date rendered with the given chrono format string.
    Date(&'static str),
}

/// One destination column: name, render rule, and whether it is the
/// designated version column (stamped at render time, not read from the
/// record).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub format: ColumnFormat,
    pub version: bool,
}

impl Column {
    pub const fn plain(name: &'static str) -> Self {
        Self {
            name,
            format: ColumnFormat::Plain,
            version: false,
        }
    }

    pub const fn with_format(name: &'static str, format: ColumnFormat) -> Self {
        Self {
            name,
            format,
            version: false,
        }
    }

    pub const fn version(name: &'static str) -> Self {
        Self {
            name,
            format: ColumnFormat::Plain,
            version: true,
        }
    }
}

/// Capability for record types that can be bulk-written: compile-time column
/// metadata plus the record's field values in column order.
pub trait TableRecord {
    const COLUMNS: &'static [Column];

    fn values(&self) -> Vec<FieldValue>;
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("record type declares no columns")]
    NoColumns,
}

/// Ordered column metadata for one record type. Built once per writer and
/// reused for every flush; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Schema {
    columns: &'static [Column],
    version_index: Option<usize>,
}

impl Schema {
    pub fn of<T: TableRecord>() -> Result<Self, SchemaError> {
        if T::COLUMNS.is_empty() {
            return Err(SchemaError::NoColumns);
        }
        let version_index = T::COLUMNS.iter().position(|c| c.version);
        Ok(Self {
            columns: T::COLUMNS,
            version_index,
        })
    }

    pub fn columns(&self) -> &'static [Column] {
        self.columns
    }

    pub fn version_index(&self) -> Option<usize> {
        self.version_index
    }

    /// Comma-separated column list for the statement prefix.
    pub fn column_list(&self) -> String {
        self.columns
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Empty;

    impl TableRecord for Empty {
        const COLUMNS: &'static [Column] = &[];

        fn values(&self) -> Vec<FieldValue> {
            Vec::new()
        }
    }

    struct Versioned;

    impl TableRecord for Versioned {
        const COLUMNS: &'static [Column] = &[
            Column::plain("id"),
            Column::version("row_version"),
            Column::plain("name"),
        ];

        fn values(&self) -> Vec<FieldValue> {
            vec![
                FieldValue::Text("1".into()),
                FieldValue::Null,
                FieldValue::Text("a".into()),
            ]
        }
    }

    #[test]
    fn empty_column_list_is_rejected() {
        assert_eq!(Schema::of::<Empty>().unwrap_err(), SchemaError::NoColumns);
    }

    #[test]
    fn version_index_points_at_flagged_column() {
        let schema = Schema::of::<Versioned>().unwrap();
        assert_eq!(schema.version_index(), Some(1));
        assert_eq!(schema.column_list(), "id, row_version, name");
    }
}
