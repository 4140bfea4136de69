use crate::error::ReaderError;
use crate::schema::{Field, FieldMapping};

/// Per-physical-column decision: decode into a schema position, or skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnEntry {
    Mapped(FieldMapping),
    Skipped,
}

/// Source column → schema position map, one entry per header column in file
/// order.
///
/// Built once at reader init by matching the header line against the declared
/// schema; the file's columns are unordered relative to the schema and may be
/// a superset of it. Length always equals the header's column count.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    columns: Vec<ColumnEntry>,
    num_fields: usize,
}

impl ColumnMap {
    /// Match a raw header line against the declared schema.
    ///
    /// Columns are split on a literal tab, no quoting or trimming. For each
    /// header column the first same-named schema field wins; unknown columns
    /// become `Skipped`. A repeated header name matches independently each
    /// time, so both occurrences map to the same output position and the
    /// later one overwrites the earlier during decode.
    ///
    /// Fails unless every schema field was satisfied by some header column —
    /// extra header columns are fine, a missing schema field is not.
    pub fn from_header(header: &str, fields: &[Field]) -> Result<Self, ReaderError> {
        if fields.is_empty() {
            return Err(ReaderError::schema("empty declared schema"));
        }

        let mut columns = Vec::new();
        let mut satisfied = vec![false; fields.len()];

        for name in header.split('\t') {
            match fields.iter().position(|f| f.name == name) {
                Some(i) => {
                    satisfied[i] = true;
                    columns.push(ColumnEntry::Mapped(FieldMapping::new(&fields[i], i)));
                }
                None => columns.push(ColumnEntry::Skipped),
            }
        }

        // Distinct schema fields covered, not raw match count: a duplicated
        // header column must not mask a missing one.
        let want_fields = satisfied.iter().filter(|s| **s).count();
        if want_fields != fields.len() {
            return Err(ReaderError::schema("wantFields != num_fields"));
        }

        Ok(Self {
            columns,
            num_fields: fields.len(),
        })
    }

    /// Number of physical columns in the source file.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Declared schema size — the length of every emitted record.
    pub fn num_fields(&self) -> usize {
        self.num_fields
    }

    /// Entry for physical column `index`, `None` past the header's width.
    pub fn get(&self, index: usize) -> Option<&ColumnEntry> {
        self.columns.get(index)
    }

    pub fn mapped_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|c| matches!(c, ColumnEntry::Mapped(_)))
            .count()
    }
}
