//! Per-value dispatch between `bson_types::Value` and the wire types.
//!
//! Each function is one exhaustive `match` over the value kinds, so adding a
//! kind to the value model fails to compile here until the codec handles it.

use bson_types::{Kind, Value};
use serde_json::Value as JsonValue;

use crate::array::{array_from_json, array_to_json, read_nested_array, write_array};
use crate::codec::BsonType;
use crate::document::{document_from_json, document_to_json, read_nested_document, write_document};
use crate::error::{BsonError, Result};
use crate::limits::DecodeLimits;
use crate::scalar::{append_binary_data, append_text, Binary, Bool, Double, Int32, Int64, Text};
use crate::tag::Tag;

/// Read the value of an element whose tag resolved to `kind` from the body of
/// its enclosing container.
///
/// `depth` is the nesting level of the enclosing container.
pub(crate) fn read_value(
    kind: Kind,
    r: &mut &[u8],
    limits: &DecodeLimits,
    depth: usize,
) -> Result<Value> {
    Ok(match kind {
        Kind::Double => Value::Double(Double::read_from(r)?.0),
        Kind::String => Value::String(Text::read_from(r)?.0),
        Kind::Document => Value::Document(read_nested_document(r, limits, depth + 1)?),
        Kind::Array => Value::Array(read_nested_array(r, limits, depth + 1)?),
        Kind::Binary => Value::Binary(Binary::read_from(r)?.0),
        Kind::Bool => Value::Bool(Bool::read_from(r)?.0),
        Kind::Null => Value::Null,
        Kind::Int32 => Value::Int32(Int32::read_from(r)?.0),
        Kind::Int64 => Value::Int64(Int64::read_from(r)?.0),
    })
}

/// Append a value's payload (without tag or field name).
pub(crate) fn write_value(value: &Value, out: &mut Vec<u8>) -> Result<()> {
    match value {
        Value::Double(f) => Double(*f).append_binary(out),
        Value::String(s) => append_text(s, out),
        Value::Document(doc) => write_document(doc, out),
        Value::Array(arr) => write_array(arr, out),
        Value::Binary(bin) => append_binary_data(bin, out),
        Value::Bool(b) => Bool(*b).append_binary(out),
        Value::Null => Ok(()),
        Value::Int32(n) => Int32(*n).append_binary(out),
        Value::Int64(n) => Int64(*n).append_binary(out),
    }
}

/// The tag byte a value is written with.
pub(crate) fn tag_of(value: &Value) -> Tag {
    Tag::for_kind(value.kind())
}

pub(crate) fn value_to_json(value: &Value) -> Result<JsonValue> {
    match value {
        Value::Double(f) => Double(*f).to_json(),
        Value::String(s) => Ok(JsonValue::String(s.clone())),
        Value::Document(doc) => document_to_json(doc),
        Value::Array(arr) => array_to_json(arr),
        Value::Binary(bin) => Binary(bin.clone()).to_json(),
        Value::Bool(b) => Ok(JsonValue::Bool(*b)),
        Value::Null => Ok(JsonValue::Null),
        Value::Int32(n) => Ok(JsonValue::from(*n)),
        Value::Int64(n) => Int64(*n).to_json(),
    }
}

/// Interpret a nested JSON projection. `depth` is the nesting level of the
/// enclosing container.
///
/// Objects are told apart by their marker field: `$k` document, `$f` double,
/// `$l` int64, `$b` binary.
pub(crate) fn value_from_json(json: JsonValue, limits: &DecodeLimits, depth: usize) -> Result<Value> {
    match json {
        JsonValue::Null => Ok(Value::Null),
        JsonValue::Bool(b) => Ok(Value::Bool(b)),
        JsonValue::String(s) => Ok(Value::String(s)),
        JsonValue::Number(_) => Ok(Value::Int32(Int32::from_json(json)?.0)),
        JsonValue::Array(items) => Ok(Value::Array(array_from_json(items, limits, depth + 1)?)),
        JsonValue::Object(map) => {
            if map.contains_key("$k") {
                Ok(Value::Document(document_from_json(map, limits, depth + 1)?))
            } else if map.contains_key("$f") {
                Ok(Value::Double(Double::from_json(JsonValue::Object(map))?.0))
            } else if map.contains_key("$l") {
                Ok(Value::Int64(Int64::from_json(JsonValue::Object(map))?.0))
            } else if map.contains_key("$b") {
                Ok(Value::Binary(Binary::from_json(JsonValue::Object(map))?.0))
            } else {
                Err(BsonError::UnhandledJson(JsonValue::Object(map).to_string()))
            }
        }
    }
}
