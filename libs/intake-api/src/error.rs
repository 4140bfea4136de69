use std::fmt;

/// Error kind for reader errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Io,
    /// Header cannot satisfy the declared schema.
    Schema,
    /// Data line disagrees with the header's column layout.
    Structure,
    /// Raw field cannot be decoded under its declared type.
    Decode,
}

/// Reader error — returned by all `InputReader` trait methods.
#[derive(Debug)]
pub struct ReaderError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ReaderError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Config, message: msg.into() }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Io, message: msg.into() }
    }

    pub fn schema(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Schema, message: msg.into() }
    }

    pub fn structure(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Structure, message: msg.into() }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Decode, message: msg.into() }
    }

    /// Add context to the error, preserving the original ErrorKind.
    ///
    /// Produces: `"context: original message"`.
    pub fn with_context(self, ctx: impl fmt::Display) -> Self {
        Self {
            kind: self.kind,
            message: format!("{ctx}: {}", self.message),
        }
    }
}

impl fmt::Display for ReaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ReaderError {}

impl From<std::io::Error> for ReaderError {
    fn from(e: std::io::Error) -> Self {
        Self::io(e.to_string())
    }
}

impl From<std::str::Utf8Error> for ReaderError {
    fn from(e: std::str::Utf8Error) -> Self {
        Self::decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_preserves_kind() {
        let e = ReaderError::schema("missing field").with_context("reader 'ascii'");
        assert_eq!(e.kind, ErrorKind::Schema);
        assert_eq!(e.message, "reader 'ascii': missing field");
    }

    #[test]
    fn io_errors_convert() {
        let e: ReaderError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file").into();
        assert_eq!(e.kind, ErrorKind::Io);
    }
}
