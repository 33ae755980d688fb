//! Element tag bytes.
//!
//! Every document element starts with a 1-byte tag naming the wire type of the
//! value that follows its field name. The table covers the whole BSON format so
//! that unsupported types can be reported by name; [`Tag::kind`] decides which
//! of them this codec actually reads and writes.

use bson_types::Kind;

use crate::error::BsonError;

/// BSON element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    Double = 0x01,
    String = 0x02,
    Document = 0x03,
    Array = 0x04,
    Binary = 0x05,
    Undefined = 0x06,
    ObjectId = 0x07,
    Bool = 0x08,
    DateTime = 0x09,
    Null = 0x0A,
    Regex = 0x0B,
    DbPointer = 0x0C,
    JavaScript = 0x0D,
    Symbol = 0x0E,
    JavaScriptWithScope = 0x0F,
    Int32 = 0x10,
    Timestamp = 0x11,
    Int64 = 0x12,
    Decimal128 = 0x13,
    MaxKey = 0x7F,
    MinKey = 0xFF,
}

impl Tag {
    /// Get the raw tag byte.
    #[inline]
    #[must_use]
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Type name for error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Tag::Double => "Double",
            Tag::String => "String",
            Tag::Document => "Document",
            Tag::Array => "Array",
            Tag::Binary => "Binary",
            Tag::Undefined => "Undefined",
            Tag::ObjectId => "ObjectId",
            Tag::Bool => "Bool",
            Tag::DateTime => "DateTime",
            Tag::Null => "Null",
            Tag::Regex => "Regex",
            Tag::DbPointer => "DBPointer",
            Tag::JavaScript => "JavaScript",
            Tag::Symbol => "Symbol",
            Tag::JavaScriptWithScope => "JavaScriptWithScope",
            Tag::Int32 => "Int32",
            Tag::Timestamp => "Timestamp",
            Tag::Int64 => "Int64",
            Tag::Decimal128 => "Decimal128",
            Tag::MaxKey => "MaxKey",
            Tag::MinKey => "MinKey",
        }
    }

    /// The value kind this tag decodes to, or `None` if the codec does not
    /// support the type.
    #[must_use]
    pub fn kind(self) -> Option<Kind> {
        match self {
            Tag::Double => Some(Kind::Double),
            Tag::String => Some(Kind::String),
            Tag::Document => Some(Kind::Document),
            Tag::Array => Some(Kind::Array),
            Tag::Binary => Some(Kind::Binary),
            Tag::Bool => Some(Kind::Bool),
            Tag::Null => Some(Kind::Null),
            Tag::Int32 => Some(Kind::Int32),
            Tag::Int64 => Some(Kind::Int64),
            Tag::Undefined
            | Tag::ObjectId
            | Tag::DateTime
            | Tag::Regex
            | Tag::DbPointer
            | Tag::JavaScript
            | Tag::Symbol
            | Tag::JavaScriptWithScope
            | Tag::Timestamp
            | Tag::Decimal128
            | Tag::MaxKey
            | Tag::MinKey => None,
        }
    }

    /// The tag a value of `kind` is written with.
    #[must_use]
    pub fn for_kind(kind: Kind) -> Self {
        match kind {
            Kind::Double => Tag::Double,
            Kind::String => Tag::String,
            Kind::Document => Tag::Document,
            Kind::Array => Tag::Array,
            Kind::Binary => Tag::Binary,
            Kind::Bool => Tag::Bool,
            Kind::Null => Tag::Null,
            Kind::Int32 => Tag::Int32,
            Kind::Int64 => Tag::Int64,
        }
    }

    /// Resolve a tag byte to a supported kind.
    ///
    /// # Errors
    ///
    /// `UnknownTag` for bytes outside the BSON table, `UnsupportedTag` for BSON
    /// types outside the supported kind set.
    pub fn decode_kind(byte: u8) -> Result<Kind, BsonError> {
        let tag = Tag::try_from(byte)?;
        tag.kind().ok_or(BsonError::UnsupportedTag {
            tag: byte,
            name: tag.name(),
        })
    }
}

impl TryFrom<u8> for Tag {
    type Error = BsonError;

    fn try_from(b: u8) -> Result<Self, BsonError> {
        Ok(match b {
            0x01 => Tag::Double,
            0x02 => Tag::String,
            0x03 => Tag::Document,
            0x04 => Tag::Array,
            0x05 => Tag::Binary,
            0x06 => Tag::Undefined,
            0x07 => Tag::ObjectId,
            0x08 => Tag::Bool,
            0x09 => Tag::DateTime,
            0x0A => Tag::Null,
            0x0B => Tag::Regex,
            0x0C => Tag::DbPointer,
            0x0D => Tag::JavaScript,
            0x0E => Tag::Symbol,
            0x0F => Tag::JavaScriptWithScope,
            0x10 => Tag::Int32,
            0x11 => Tag::Timestamp,
            0x12 => Tag::Int64,
            0x13 => Tag::Decimal128,
            0x7F => Tag::MaxKey,
            0xFF => Tag::MinKey,
            _ => return Err(BsonError::UnknownTag(b)),
        })
    }
}
