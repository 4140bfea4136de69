use crate::error::ReaderError;
use crate::record::Record;
use crate::schema::Field;

/// Receives decoded records, one per source line, in file line order.
///
/// No acknowledgment or backpressure at this layer — `emit` takes ownership
/// and the reader forgets the record immediately.
pub trait RecordSink {
    fn emit(&mut self, record: Record);
}

/// Collects emitted records into a `Vec`. Handy for hosts that want a batch,
/// and for tests.
#[derive(Debug, Default)]
pub struct VecSink {
    pub records: Vec<Record>,
}

impl RecordSink for VecSink {
    fn emit(&mut self, record: Record) {
        self.records.push(record);
    }
}

/// Input reader capability — the fixed lifecycle contract every reader
/// variant implements, dispatched through the component registry.
///
/// Single-threaded and blocking throughout. One instance must not be driven
/// from multiple threads; the host serializes access. Between a successful
/// `init` and `finish` the reader exclusively owns its source resource.
pub trait InputReader {
    /// Open `path`, read its header, and reconcile it against the declared
    /// schema. `fields` order defines the output position of every decoded
    /// value. Fails if the source cannot be opened, has no header line, or
    /// the header does not cover every declared field.
    fn init(&mut self, path: &str, fields: &[Field]) -> Result<(), ReaderError>;

    /// Drain the source from the current cursor to end-of-stream, emitting
    /// one record per data line.
    ///
    /// This is a batch contract, not a "next record" step: one call consumes
    /// everything currently readable. Calling again resumes at the cursor
    /// (normally EOF until the source grows). On failure the call aborts;
    /// records already emitted stay emitted, and the reader should be treated
    /// as terminal since the cursor has passed the offending line.
    fn update(&mut self, sink: &mut dyn RecordSink) -> Result<(), ReaderError>;

    /// Release the source resource. Idempotent, never fails.
    fn finish(&mut self);
}
