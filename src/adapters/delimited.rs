use crate::domain::model::{FromFields, RawUnit, TransformError};
use crate::domain::ports::Transformer;
use std::marker::PhantomData;

/// Delimiter-separated framing: parses one raw line with the csv reader
/// (quoted fields supported) and decodes it through `FromFields`.
pub struct DelimiterTransformer<T: FromFields> {
    delimiter: u8,
    _record: PhantomData<fn() -> T>,
}

impl<T: FromFields> DelimiterTransformer<T> {
    pub fn new(delimiter: u8) -> Self {
        Self {
            delimiter,
            _record: PhantomData,
        }
    }
}

impl<T: FromFields> Transformer<T> for DelimiterTransformer<T> {
    fn transform(&self, unit: &RawUnit) -> Result<T, TransformError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter)
            .from_reader(unit.text.as_bytes());

        let record = match reader.records().next() {
            Some(Ok(record)) => record,
            Some(Err(e)) => return Err(TransformError::new(format!("malformed line: {}", e))),
            None => return Err(TransformError::new("empty line")),
        };

        if record.len() != T::FIELD_COUNT {
            return Err(TransformError::new(format!(
                "expected {} fields, got {}",
                T::FIELD_COUNT,
                record.len()
            )));
        }

        let fields: Vec<String> = record.iter().map(|f| f.to_string()).collect();
        T::from_fields(&fields)
    }
}
