use crate::value::Value;

/// One fully decoded row. Positional — index `i` holds the value for the
/// `i`-th field of the declared schema, regardless of the source file's
/// column order.
///
/// Maximally lightweight: values only, no names or types. All metadata lives
/// in the [`ColumnMap`](crate::mapping::ColumnMap).
#[derive(Debug, Clone, PartialEq)]
pub struct Record(pub Vec<Value>);

impl Record {
    /// A record of `num_fields` `Absent` placeholders, ready for decoding.
    pub fn absent(num_fields: usize) -> Self {
        Self(vec![Value::Absent; num_fields])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
