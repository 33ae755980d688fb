//! The closed set of value kinds a document or array may hold.
//!
//! `Value` is the single place that decides which BSON types the system
//! accepts. Adding a kind means adding a `Value` variant, a `Kind` variant and
//! a wire tag in the codec; every dispatch over `Value` is an exhaustive
//! `match`, so the compiler points at each place that needs the new arm.

use crate::array::Array;
use crate::binary::Binary;
use crate::document::Document;
use crate::error::{Result, TypesError};

/// Maximum number of nested containers (documents and arrays) in one value.
pub const MAX_NESTING_DEPTH: usize = 100;

/// A document field or array element.
///
/// Equality follows `f64` semantics for `Double`, so a value holding `NaN`
/// is not equal to itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Double(f64),
    String(String),
    Document(Document),
    Array(Array),
    Binary(Binary),
    Bool(bool),
    Null,
    Int32(i32),
    Int64(i64),
}

/// Discriminant of a [`Value`], used in error messages and tag lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Double,
    String,
    Document,
    Array,
    Binary,
    Bool,
    Null,
    Int32,
    Int64,
}

impl Kind {
    /// Human-readable kind name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Kind::Double => "double",
            Kind::String => "string",
            Kind::Document => "document",
            Kind::Array => "array",
            Kind::Binary => "binary",
            Kind::Bool => "bool",
            Kind::Null => "null",
            Kind::Int32 => "int32",
            Kind::Int64 => "int64",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Value::Double(_) => Kind::Double,
            Value::String(_) => Kind::String,
            Value::Document(_) => Kind::Document,
            Value::Array(_) => Kind::Array,
            Value::Binary(_) => Kind::Binary,
            Value::Bool(_) => Kind::Bool,
            Value::Null => Kind::Null,
            Value::Int32(_) => Kind::Int32,
            Value::Int64(_) => Kind::Int64,
        }
    }

    #[must_use]
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(doc) => Some(doc),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int32(n) => Some(i64::from(*n)),
            Value::Int64(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(f) => Some(*f),
            _ => None,
        }
    }

    /// Number of nested container levels: 0 for scalars, `1 + max(children)`
    /// for documents and arrays.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Value::Document(doc) => 1 + doc.values().map(Value::depth).max().unwrap_or(0),
            Value::Array(arr) => 1 + arr.iter().map(Value::depth).max().unwrap_or(0),
            _ => 0,
        }
    }
}

/// Returns `false` if `key` cannot be used as a document field name.
///
/// Keys must be non-empty and must not contain a zero byte, since field names
/// are written as zero-terminated strings.
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && !key.as_bytes().contains(&0)
}

/// Validate a value that is about to become a top-level value or a member of a
/// container.
///
/// # Errors
///
/// Returns `InvalidKey` for a bad key anywhere inside, or `NestingTooDeep` if
/// the value holds more than [`MAX_NESTING_DEPTH`] container levels. Nested
/// failures are wrapped with the field name or index leading to them.
pub fn validate_value(value: &Value) -> Result<()> {
    validate_at(value, 0)
}

/// Same as [`validate_value`], for a value placed `depth` containers deep.
pub(crate) fn validate_at(value: &Value, depth: usize) -> Result<()> {
    match value {
        Value::Document(doc) => {
            if depth >= MAX_NESTING_DEPTH {
                return Err(TypesError::NestingTooDeep {
                    max: MAX_NESTING_DEPTH,
                });
            }
            for (key, v) in doc.iter() {
                if !is_valid_key(key) {
                    return Err(TypesError::InvalidKey(key.to_string()));
                }
                validate_at(v, depth + 1).map_err(|e| e.in_field(key))?;
            }
            Ok(())
        }
        Value::Array(arr) => {
            if depth >= MAX_NESTING_DEPTH {
                return Err(TypesError::NestingTooDeep {
                    max: MAX_NESTING_DEPTH,
                });
            }
            for (i, v) in arr.iter().enumerate() {
                validate_at(v, depth + 1).map_err(|e| e.in_element(i))?;
            }
            Ok(())
        }
        Value::Double(_)
        | Value::String(_)
        | Value::Binary(_)
        | Value::Bool(_)
        | Value::Null
        | Value::Int32(_)
        | Value::Int64(_) => Ok(()),
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Double(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::Document(doc)
    }
}

impl From<Array> for Value {
    fn from(arr: Array) -> Self {
        Value::Array(arr)
    }
}

impl From<Binary> for Value {
    fn from(bin: Binary) -> Self {
        Value::Binary(bin)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Null
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int32(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int64(n)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}
