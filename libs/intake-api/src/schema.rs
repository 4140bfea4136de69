use crate::value::TypeTag;

/// A single field in a declared schema.
///
/// Position in the caller's `&[Field]` slice determines the field's index in
/// every emitted [`Record`](crate::record::Record).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Field {
    pub name: String,
    pub tag: TypeTag,
}

impl Field {
    pub fn new(name: impl Into<String>, tag: TypeTag) -> Self {
        Self { name: name.into(), tag }
    }
}

/// A schema field bound to its output position.
///
/// Built during header matching; immutable afterwards. `position` is the
/// index into the declared schema, i.e. the slot in the output record this
/// field's decoded value is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    pub name: String,
    pub tag: TypeTag,
    pub position: usize,
}

impl FieldMapping {
    pub fn new(field: &Field, position: usize) -> Self {
        Self {
            name: field.name.clone(),
            tag: field.tag,
            position,
        }
    }
}
