use crate::domain::model::{FromFields, RawUnit, TransformError};
use crate::domain::ports::Transformer;
use std::marker::PhantomData;

/// Fixed-width framing: slices one raw line into per-column character
/// ranges, trims each slice, and decodes through `FromFields`. Widths are
/// in characters, not bytes, so multibyte input does not shift columns.
pub struct FixedWidthTransformer<T: FromFields> {
    widths: Vec<usize>,
    _record: PhantomData<fn() -> T>,
}

impl<T: FromFields> FixedWidthTransformer<T> {
    pub fn new(widths: Vec<usize>) -> Self {
        debug_assert_eq!(widths.len(), T::FIELD_COUNT);
        Self {
            widths,
            _record: PhantomData,
        }
    }
}

impl<T: FromFields> Transformer<T> for FixedWidthTransformer<T> {
    fn transform(&self, unit: &RawUnit) -> Result<T, TransformError> {
        let chars: Vec<char> = unit.text.chars().collect();
        let expected: usize = self.widths.iter().sum();
        if chars.len() < expected {
            return Err(TransformError::new(format!(
                "line is {} characters, expected at least {}",
                chars.len(),
                expected
            )));
        }

        let mut fields = Vec::with_capacity(self.widths.len());
        let mut offset = 0;
        for &width in &self.widths {
            let slice: String = chars[offset..offset + width].iter().collect();
            fields.push(slice.trim().to_string());
            offset += width;
        }
        T::from_fields(&fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair {
        left: String,
        right: String,
    }

    impl FromFields for Pair {
        const FIELD_COUNT: usize = 2;

        fn from_fields(fields: &[String]) -> Result<Self, TransformError> {
            Ok(Self {
                left: fields[0].clone(),
                right: fields[1].clone(),
            })
        }
    }

    #[test]
    fn slices_and_trims_columns() {
        let transformer = FixedWidthTransformer::<Pair>::new(vec![5, 4]);
        let pair = transformer.transform(&RawUnit::new("ab   cd  ")).unwrap();
        assert_eq!(pair.left, "ab");
        assert_eq!(pair.right, "cd");
    }

    #[test]
    fn short_line_is_a_transform_error() {
        let transformer = FixedWidthTransformer::<Pair>::new(vec![5, 4]);
        assert!(transformer.transform(&RawUnit::new("abc")).is_err());
    }
}
