//! Error types for document construction and validation.

use thiserror::Error;

/// Errors raised while constructing, converting or mutating documents and arrays.
///
/// Validation errors are raised eagerly: a `Document` or `Array` that exists
/// has already passed every check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypesError {
    /// `Document::make` received a key/value list of odd length.
    #[error("invalid number of arguments: {0}")]
    OddArguments(usize),

    /// A key position in `Document::make` held something other than a string.
    #[error("invalid key type: {0}")]
    InvalidKeyType(&'static str),

    /// The key is empty or contains a zero byte.
    #[error("invalid key: {0:?}")]
    InvalidKey(String),

    /// The key appears more than once.
    #[error("duplicate key: {0:?}")]
    DuplicateKey(String),

    /// The key list names a key the value map does not contain.
    #[error("key not found: {0:?}")]
    KeyNotFound(String),

    /// The key list and the value map have different sizes.
    #[error("keys and values count mismatch: {keys} != {values}")]
    CountMismatch { keys: usize, values: usize },

    /// Array access outside `[0, len)`.
    #[error("index {index} is out of bounds [0-{len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Containers nested deeper than the supported maximum.
    #[error("nesting depth exceeds {max}")]
    NestingTooDeep { max: usize },

    /// A nested document value failed validation.
    #[error("field {key:?}: {source}")]
    InField {
        key: String,
        #[source]
        source: Box<TypesError>,
    },

    /// A nested array element failed validation.
    #[error("element {index}: {source}")]
    InElement {
        index: usize,
        #[source]
        source: Box<TypesError>,
    },
}

impl TypesError {
    /// Wrap this error with the document field it was found under.
    pub fn in_field(self, key: impl Into<String>) -> Self {
        TypesError::InField {
            key: key.into(),
            source: Box::new(self),
        }
    }

    /// Wrap this error with the array index it was found at.
    pub fn in_element(self, index: usize) -> Self {
        TypesError::InElement {
            index,
            source: Box::new(self),
        }
    }

    /// Strip the field/element path wrappers and return the originating error.
    pub fn root(&self) -> &TypesError {
        match self {
            TypesError::InField { source, .. } | TypesError::InElement { source, .. } => {
                source.root()
            }
            other => other,
        }
    }
}

/// Convenience alias used throughout bson-types.
pub type Result<T> = std::result::Result<T, TypesError>;
