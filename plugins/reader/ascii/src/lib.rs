//! Tab-delimited text reader.
//!
//! Source layout: first line is a tab-delimited list of column names, every
//! following line a tab-delimited list of raw values in the same positional
//! order. No quoting or escaping — a literal tab always ends a field.

use std::fs::File;
use std::io::{BufRead, BufReader};

use intake_api::component::{ComponentDescriptor, ComponentKind, INTAKE_API_VERSION};
use intake_api::config::ConfigValues;
use intake_api::error::ReaderError;
use intake_api::mapping::{ColumnEntry, ColumnMap};
use intake_api::reader::{InputReader, RecordSink};
use intake_api::record::Record;
use intake_api::schema::Field;

/// Registry descriptor for this reader. The host registers it at startup.
pub fn descriptor() -> ComponentDescriptor {
    ComponentDescriptor {
        name: "ascii",
        version: None,
        api_version: INTAKE_API_VERSION,
        kind: ComponentKind::Reader,
        enabled: true,
        partial: false,
        factory: AsciiReader::from_config,
    }
}

/// Reader over an open tab-delimited file.
///
/// `file` and `columns` are both `Some` between a successful `init` and
/// `finish`, and `None` otherwise.
pub struct AsciiReader {
    fname: String,
    file: Option<BufReader<File>>,
    columns: Option<ColumnMap>,
    num_fields: usize,
    /// Maximum data line length in bytes (0 = unlimited).
    max_line_length: usize,
}

impl AsciiReader {
    pub fn new() -> Self {
        Self {
            fname: String::new(),
            file: None,
            columns: None,
            num_fields: 0,
            max_line_length: 0,
        }
    }

    /// Factory for the component registry.
    pub fn from_config(config: &ConfigValues) -> Result<Box<dyn InputReader>, ReaderError> {
        let mut reader = Self::new();
        if let Some(max) = config.get_u64("max_line_length") {
            reader.max_line_length = max as usize;
        }
        Ok(Box::new(reader))
    }

    /// Read one line, stripping the trailing `\n` / `\r\n`. `Ok(false)` at
    /// end-of-stream.
    fn read_line(file: &mut BufReader<File>, line: &mut String) -> Result<bool, ReaderError> {
        line.clear();
        if file.read_line(line)? == 0 {
            return Ok(false);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(true)
    }
}

/// Decode one data line into a record positioned per the declared schema.
fn decode_line(
    line: &str,
    columns: &ColumnMap,
    num_fields: usize,
    max_line_length: usize,
) -> Result<Record, ReaderError> {
    if max_line_length > 0 && line.len() > max_line_length {
        return Err(ReaderError::structure(format!(
            "line too long: {} bytes (max {})",
            line.len(),
            max_line_length
        )));
    }

    // An empty line has no columns at all, not one empty column. Splitting
    // would produce a single "" field and a one-string-field schema would
    // accept it as a record.
    if line.is_empty() {
        return Err(ReaderError::structure("curr_field != num_fields in DoUpdate"));
    }

    let mut record = Record::absent(num_fields);
    let mut curr_field = 0;

    for (curr_tab, raw) in line.split('\t').enumerate() {
        let entry = columns.get(curr_tab).ok_or_else(|| {
            ReaderError::structure("Tabs in heading do not match tabs in data?")
        })?;

        let mapping = match entry {
            ColumnEntry::Skipped => continue,
            ColumnEntry::Mapped(m) => m,
        };

        if curr_field >= num_fields {
            // Only reachable through duplicate header columns.
            return Err(ReaderError::structure(
                "internal error - fieldnum greater as possible",
            ));
        }

        let value = mapping
            .tag
            .decode(raw)
            .map_err(|e| e.with_context(format!("field '{}'", mapping.name)))?;
        record.0[mapping.position] = value;
        curr_field += 1;
    }

    // Guards against a data line shorter than the header: some mapped
    // position would still hold Absent.
    if curr_field != num_fields {
        return Err(ReaderError::structure("curr_field != num_fields in DoUpdate"));
    }

    Ok(record)
}

impl Default for AsciiReader {
    fn default() -> Self {
        Self::new()
    }
}

impl InputReader for AsciiReader {
    fn init(&mut self, path: &str, fields: &[Field]) -> Result<(), ReaderError> {
        self.fname = path.to_string();

        let file = File::open(path).map_err(|_| ReaderError::io(format!("cannot open {path}")))?;
        let mut file = BufReader::new(file);

        let mut line = String::new();
        let got_header = Self::read_line(&mut file, &mut line)
            .map_err(|_| ReaderError::schema("could not read first line"))?;
        if !got_header {
            return Err(ReaderError::schema("could not read first line"));
        }

        let columns = ColumnMap::from_header(&line, fields)?;
        tracing::debug!(
            path,
            columns = columns.len(),
            mapped = columns.mapped_count(),
            "header matched against declared schema"
        );

        self.num_fields = fields.len();
        self.columns = Some(columns);
        self.file = Some(file);
        Ok(())
    }

    fn update(&mut self, sink: &mut dyn RecordSink) -> Result<(), ReaderError> {
        let (file, columns) = match (self.file.as_mut(), self.columns.as_ref()) {
            (Some(f), Some(c)) => (f, c),
            _ => return Err(ReaderError::config("update called on uninitialized reader")),
        };

        let mut line = String::new();
        while Self::read_line(file, &mut line)? {
            let record = decode_line(&line, columns, self.num_fields, self.max_line_length)?;
            sink.emit(record);
        }
        Ok(())
    }

    fn finish(&mut self) {
        if self.file.take().is_some() {
            tracing::debug!(path = %self.fname, "reader finished");
        }
        self.columns = None;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use intake_api::config::ParamValue;
    use intake_api::error::ErrorKind;
    use intake_api::reader::VecSink;
    use intake_api::value::{TypeTag, Value};

    use super::*;

    fn log_file(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    fn path(f: &tempfile::NamedTempFile) -> &str {
        f.path().to_str().unwrap()
    }

    fn str_fields(names: &[&str]) -> Vec<Field> {
        names.iter().map(|n| Field::new(*n, TypeTag::Str)).collect()
    }

    #[test]
    fn wanted_column_decoded_unwanted_skipped() {
        let f = log_file("id\tvalue\n42\thello\n");
        let mut reader = AsciiReader::new();
        reader.init(path(&f), &str_fields(&["id"])).unwrap();

        let mut sink = VecSink::default();
        reader.update(&mut sink).unwrap();
        assert_eq!(sink.records.len(), 1);
        assert_eq!(sink.records[0].0, vec![Value::Str("42".into())]);
    }

    #[test]
    fn records_positioned_per_schema_not_per_file() {
        let f = log_file("b\ta\n1\t2\n");
        let mut reader = AsciiReader::new();
        reader.init(path(&f), &str_fields(&["a", "b"])).unwrap();

        let mut sink = VecSink::default();
        reader.update(&mut sink).unwrap();
        assert_eq!(
            sink.records[0].0,
            vec![Value::Str("2".into()), Value::Str("1".into())]
        );
    }

    #[test]
    fn typed_fields_decode_per_tag() {
        let f = log_file("n\tok\twho\n7\tT\talice\n8\tF\tbob\n");
        let fields = vec![
            Field::new("n", TypeTag::Count),
            Field::new("ok", TypeTag::Bool),
            Field::new("who", TypeTag::Str),
        ];
        let mut reader = AsciiReader::new();
        reader.init(path(&f), &fields).unwrap();

        let mut sink = VecSink::default();
        reader.update(&mut sink).unwrap();
        assert_eq!(
            sink.records[0].0,
            vec![Value::Count(7), Value::Bool(true), Value::Str("alice".into())]
        );
        assert_eq!(
            sink.records[1].0,
            vec![Value::Count(8), Value::Bool(false), Value::Str("bob".into())]
        );
    }

    #[test]
    fn missing_schema_field_fails_init() {
        let f = log_file("id\tvalue\n42\thello\n");
        let mut reader = AsciiReader::new();
        let err = reader
            .init(path(&f), &str_fields(&["id", "ts"]))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Schema);
    }

    #[test]
    fn missing_file_fails_init() {
        let mut reader = AsciiReader::new();
        let err = reader
            .init("/nonexistent/intake.log", &str_fields(&["id"]))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Io);
        assert!(err.message.contains("cannot open"));
    }

    #[test]
    fn empty_file_fails_init() {
        let f = log_file("");
        let mut reader = AsciiReader::new();
        let err = reader.init(path(&f), &str_fields(&["id"])).unwrap_err();
        assert!(err.message.contains("could not read first line"));
    }

    #[test]
    fn long_data_line_fails_without_emitting() {
        let f = log_file("a\tb\n1\t2\t3\n");
        let mut reader = AsciiReader::new();
        reader.init(path(&f), &str_fields(&["a", "b"])).unwrap();

        let mut sink = VecSink::default();
        let err = reader.update(&mut sink).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Structure);
        assert!(err.message.contains("Tabs in heading"));
        assert!(sink.records.is_empty());
    }

    #[test]
    fn short_data_line_fails_without_partial_record() {
        let f = log_file("a\tb\n1\n");
        let mut reader = AsciiReader::new();
        reader.init(path(&f), &str_fields(&["a", "b"])).unwrap();

        let mut sink = VecSink::default();
        let err = reader.update(&mut sink).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Structure);
        assert!(err.message.contains("curr_field != num_fields"));
        assert!(sink.records.is_empty());
    }

    #[test]
    fn blank_line_fails_even_for_one_string_field() {
        let f = log_file("id\n1\n\n2\n");
        let mut reader = AsciiReader::new();
        reader.init(path(&f), &str_fields(&["id"])).unwrap();

        let mut sink = VecSink::default();
        let err = reader.update(&mut sink).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Structure);
        assert!(err.message.contains("curr_field != num_fields"));
        // The line before the blank one was already emitted.
        assert_eq!(sink.records.len(), 1);
        assert_eq!(sink.records[0].0, vec![Value::Str("1".into())]);
    }

    #[test]
    fn failure_mid_file_keeps_earlier_emissions() {
        let f = log_file("a\n1\n2\n3\tx\n");
        let mut reader = AsciiReader::new();
        reader.init(path(&f), &str_fields(&["a"])).unwrap();

        let mut sink = VecSink::default();
        assert!(reader.update(&mut sink).is_err());
        assert_eq!(sink.records.len(), 2);
    }

    #[test]
    fn malformed_typed_value_names_the_field() {
        let f = log_file("n\nnot-a-number\n");
        let mut reader = AsciiReader::new();
        reader
            .init(path(&f), &[Field::new("n", TypeTag::Count)])
            .unwrap();

        let mut sink = VecSink::default();
        let err = reader.update(&mut sink).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decode);
        assert!(err.message.contains("field 'n'"));
    }

    #[test]
    fn second_update_resumes_at_eof() {
        let f = log_file("id\n1\n2\n");
        let mut reader = AsciiReader::new();
        reader.init(path(&f), &str_fields(&["id"])).unwrap();

        let mut sink = VecSink::default();
        reader.update(&mut sink).unwrap();
        assert_eq!(sink.records.len(), 2);

        reader.update(&mut sink).unwrap();
        assert_eq!(sink.records.len(), 2);
    }

    #[test]
    fn update_before_init_is_an_error() {
        let mut sink = VecSink::default();
        let err = AsciiReader::new().update(&mut sink).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Config);
    }

    #[test]
    fn finish_is_idempotent() {
        let f = log_file("id\n1\n");
        let mut reader = AsciiReader::new();
        reader.init(path(&f), &str_fields(&["id"])).unwrap();
        reader.finish();
        reader.finish();
        // Resource released: further updates report uninitialized.
        let mut sink = VecSink::default();
        assert!(reader.update(&mut sink).is_err());
    }

    #[test]
    fn max_line_length_guards_data_lines() {
        let f = log_file("id\n0123456789abcdef\n");
        let mut cfg = ConfigValues::new();
        cfg.set("max_line_length", ParamValue::U64(8));
        let mut reader = AsciiReader::from_config(&cfg).unwrap();
        reader.init(path(&f), &str_fields(&["id"])).unwrap();

        let mut sink = VecSink::default();
        let err = reader.update(&mut sink).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Structure);
        assert!(err.message.contains("line too long"));
    }

    #[test]
    fn crlf_line_endings_are_stripped() {
        let f = log_file("id\r\n42\r\n");
        let mut reader = AsciiReader::new();
        reader.init(path(&f), &str_fields(&["id"])).unwrap();

        let mut sink = VecSink::default();
        reader.update(&mut sink).unwrap();
        assert_eq!(sink.records[0].0, vec![Value::Str("42".into())]);
    }
}
