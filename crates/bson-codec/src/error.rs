//! Error types for binary and JSON encoding and decoding.

use bson_types::TypesError;
use thiserror::Error;

/// Errors that can occur while reading, writing or projecting BSON values.
///
/// All decode errors are permanent. Errors raised inside nested containers are
/// wrapped in [`BsonError::Field`] / [`BsonError::Element`] so the message
/// spells out the path to the failure; [`BsonError::root`] strips the wrappers.
#[derive(Error, Debug)]
pub enum BsonError {
    // --- binary decoding ---
    /// The input ended before the value was complete.
    #[error("unexpected end of input reading {what}")]
    Truncated { what: &'static str },

    /// A document length prefix outside `[5, max_document_len]`.
    #[error("invalid document length {0}")]
    InvalidDocumentLength(i32),

    /// A string or binary length prefix that cannot be valid.
    #[error("invalid {what} length {len}")]
    InvalidLength { what: &'static str, len: i32 },

    /// The document body ended without a zero terminator.
    #[error("document is not terminated")]
    Unterminated,

    /// Bytes were left inside the declared document length after the terminator.
    #[error("{count} unexpected bytes after the document terminator")]
    TrailingBytes { count: usize },

    /// A string value whose last byte is not zero.
    #[error("string is missing its zero terminator")]
    MissingTerminator,

    /// Not a BSON tag byte.
    #[error("unknown tag {0:#04x}")]
    UnknownTag(u8),

    /// A BSON tag outside the supported kind set.
    #[error("unsupported tag {tag:#04x} ({name})")]
    UnsupportedTag { tag: u8, name: &'static str },

    /// An array element key that does not match its position.
    #[error("array key {index} is {key:?}")]
    ArrayIndex { index: usize, key: String },

    /// Containers nested deeper than the configured limit.
    #[error("nesting depth exceeds {max}")]
    DepthLimitExceeded { max: usize },

    #[error("invalid UTF-8 in {0}")]
    InvalidUtf8(&'static str),

    /// A boolean byte other than `0x00` or `0x01`.
    #[error("invalid bool byte {0:#04x}")]
    InvalidBool(u8),

    // --- encoding ---
    /// A CString value containing a zero byte.
    #[error("cstring contains a zero byte")]
    ZeroByteInCString,

    /// The encoded document would exceed the maximum document length.
    #[error("document length {0} exceeds the maximum")]
    DocumentTooLarge(usize),

    // --- JSON projection ---
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A bare `null` where a typed projection was expected.
    #[error("null is not a valid {0} projection")]
    JsonNull(&'static str),

    /// Input left after the projected value.
    #[error("{count} bytes remain after the JSON value")]
    JsonTrailingBytes { count: usize },

    #[error("document projection is missing $k")]
    MissingKeyList,

    /// `$k` does not account for every other field.
    #[error("{keys} elements in $k, {total} in total")]
    KeyCountMismatch { keys: usize, total: usize },

    #[error("document projection is missing field {0:?}")]
    MissingField(String),

    /// A document field named `$k` cannot be projected.
    #[error("key {0:?} is reserved in the JSON projection")]
    ReservedKey(String),

    #[error("invalid $l value {0:?}")]
    InvalidInt64(String),

    #[error("invalid $f value {0}")]
    InvalidDouble(String),

    #[error("invalid base64 in $b: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// JSON that matches no projection.
    #[error("unhandled JSON value {0}")]
    UnhandledJson(String),

    // --- shared ---
    #[error(transparent)]
    Types(#[from] TypesError),

    #[error("I/O error: {0}")]
    Io(std::io::Error),

    // --- context ---
    #[error("field {key:?}: {source}")]
    Field {
        key: String,
        #[source]
        source: Box<BsonError>,
    },

    #[error("element {index}: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<BsonError>,
    },

    #[error("{op}: {source}")]
    Op {
        op: &'static str,
        #[source]
        source: Box<BsonError>,
    },
}

impl BsonError {
    pub(crate) fn in_field(self, key: &str) -> Self {
        BsonError::Field {
            key: key.to_string(),
            source: Box::new(self),
        }
    }

    pub(crate) fn in_element(self, index: usize) -> Self {
        BsonError::Element {
            index,
            source: Box::new(self),
        }
    }

    pub(crate) fn in_op(self, op: &'static str) -> Self {
        BsonError::Op {
            op,
            source: Box::new(self),
        }
    }

    /// Map an I/O error from a read, treating a short read as truncation.
    pub(crate) fn from_read(err: std::io::Error, what: &'static str) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            BsonError::Truncated { what }
        } else {
            BsonError::Io(err)
        }
    }

    /// Strip context wrappers and return the originating error.
    ///
    /// Value-model errors are returned as `Types` with their own path intact;
    /// use [`TypesError::root`] to go further.
    pub fn root(&self) -> &BsonError {
        match self {
            BsonError::Field { source, .. }
            | BsonError::Element { source, .. }
            | BsonError::Op { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<std::io::Error> for BsonError {
    fn from(err: std::io::Error) -> Self {
        BsonError::Io(err)
    }
}

/// Convenience alias used throughout bson-codec.
pub type Result<T> = std::result::Result<T, BsonError>;
