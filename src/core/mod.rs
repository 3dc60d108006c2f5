pub mod error_handler;
pub mod importer;
pub mod writer;

pub use crate::domain::model::{
    CancelFlag, FieldValue, FieldViolation, FromFields, ImportSummary, RawUnit, TransformError,
};
pub use crate::domain::ports::{Destination, Session, Transformer, UnitReader, Validator};
pub use crate::domain::schema::{Column, ColumnFormat, Schema, TableRecord};
pub use crate::utils::error::Result;
