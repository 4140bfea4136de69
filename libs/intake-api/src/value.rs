use crate::error::ReaderError;

/// Closed set of field types a reader can decode.
///
/// Adding a tag is a source-visible change: `decode()` below matches
/// exhaustively, so a new tag without a decode rule does not compile.
/// Container types (sets, vectors) are future work and deliberately
/// absent from the set until their wire layout is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    Bool,
    Int,
    /// Unsigned counter.
    Count,
    Double,
    /// Absolute time, fractional seconds since the epoch.
    Time,
    /// Relative time, fractional seconds.
    Interval,
    Str,
}

impl TypeTag {
    /// Decode one raw field per this tag.
    ///
    /// Total mapping from tag to decode rule — every tag either produces a
    /// value of its own variant or a decode error naming the tag. A raw
    /// value is never interpreted under another tag's rule.
    pub fn decode(self, raw: &str) -> Result<Value, ReaderError> {
        let bad = |raw: &str| {
            ReaderError::decode(format!("cannot decode {raw:?} as {self:?}"))
        };
        match self {
            // String fields are taken verbatim. No unescaping: the format
            // forbids tabs inside a field, so the raw slice is the value.
            TypeTag::Str => Ok(Value::Str(raw.to_string())),
            TypeTag::Bool => match raw {
                "T" => Ok(Value::Bool(true)),
                "F" => Ok(Value::Bool(false)),
                _ => Err(bad(raw)),
            },
            TypeTag::Int => raw.parse().map(Value::Int).map_err(|_| bad(raw)),
            TypeTag::Count => raw.parse().map(Value::Count).map_err(|_| bad(raw)),
            TypeTag::Double => raw.parse().map(Value::Double).map_err(|_| bad(raw)),
            TypeTag::Time => raw.parse().map(Value::Time).map_err(|_| bad(raw)),
            TypeTag::Interval => raw.parse().map(Value::Interval).map_err(|_| bad(raw)),
        }
    }
}

/// One decoded field value, tagged with its type.
///
/// `Absent` is the pre-decode placeholder: a freshly allocated record is all
/// `Absent`, and decoding overwrites exactly the mapped positions.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Count(u64),
    Double(f64),
    Time(f64),
    Interval(f64),
    Str(String),
    Absent,
}

impl Value {
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// The tag this value decodes under, or `None` for `Absent`.
    pub fn tag(&self) -> Option<TypeTag> {
        match self {
            Value::Bool(_) => Some(TypeTag::Bool),
            Value::Int(_) => Some(TypeTag::Int),
            Value::Count(_) => Some(TypeTag::Count),
            Value::Double(_) => Some(TypeTag::Double),
            Value::Time(_) => Some(TypeTag::Time),
            Value::Interval(_) => Some(TypeTag::Interval),
            Value::Str(_) => Some(TypeTag::Str),
            Value::Absent => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}
