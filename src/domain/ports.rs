use crate::domain::model::{FieldViolation, RawUnit, TransformError};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Pull-based source of raw units. `Ok(None)` signals end of input.
#[async_trait]
pub trait UnitReader: Send {
    async fn read(&mut self) -> Result<Option<RawUnit>>;
}

/// Pure framing/decoding step: one raw unit into one typed record.
pub trait Transformer<T>: Send + Sync {
    fn transform(&self, unit: &RawUnit) -> std::result::Result<T, TransformError>;
}

impl<T> Transformer<T> for Box<dyn Transformer<T> + Send + Sync> {
    fn transform(&self, unit: &RawUnit) -> std::result::Result<T, TransformError> {
        (**self).transform(unit)
    }
}

/// Pure constraint check. An empty violation list means the record is valid.
pub trait Validator<T>: Send + Sync {
    fn validate(&self, record: &T) -> Vec<FieldViolation>;
}

/// A destination the writer can execute bulk statements against. Sessions
/// are acquired per flush and dropped when the flush returns, success or
/// not; they are never held across batches.
#[async_trait]
pub trait Destination: Send + Sync {
    async fn session<'a>(&'a self) -> Result<Box<dyn Session + Send + 'a>>;
}

#[async_trait]
pub trait Session: Send {
    async fn exec(&mut self, statement: &str) -> Result<()>;
}
