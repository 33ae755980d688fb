//! Arrays: documents whose keys are the element positions.

use std::io::BufRead;

use serde_json::Value as JsonValue;

use crate::codec::{parse_json, BsonType, Sealed};
use crate::document::{read_entries, read_nested_entries, write_entries, Keys};
use crate::error::{BsonError, Result};
use crate::limits::DecodeLimits;
use crate::value::{value_from_json, value_to_json};

/// BSON array.
///
/// Encoded exactly like a document with keys `"0"`, `"1"`, … in order;
/// decoding rejects any other key. Projects to a plain JSON array.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array(pub bson_types::Array);

impl Array {
    #[must_use]
    pub fn into_inner(self) -> bson_types::Array {
        self.0
    }

    /// [`read_from`](BsonType::read_from) with caller-supplied limits.
    ///
    /// # Errors
    ///
    /// Any decode error, including limit violations.
    pub fn read_from_with_limits<R: BufRead>(r: &mut R, limits: &DecodeLimits) -> Result<Self> {
        read_array(r, limits, 1)
            .map(Self)
            .map_err(|e| e.in_op("Array::read_from"))
    }

    /// [`unmarshal_json`](BsonType::unmarshal_json) with caller-supplied limits.
    ///
    /// # Errors
    ///
    /// Any JSON or projection error, including limit violations.
    pub fn unmarshal_json_with_limits(data: &[u8], limits: &DecodeLimits) -> Result<Self> {
        let json = parse_json(data, Self::NAME).map_err(|e| e.in_op("Array::unmarshal_json"))?;
        Self::from_json_with_limits(json, limits).map_err(|e| e.in_op("Array::unmarshal_json"))
    }

    fn from_json_with_limits(json: JsonValue, limits: &DecodeLimits) -> Result<Self> {
        match json {
            JsonValue::Array(items) => array_from_json(items, limits, 1).map(Self),
            other => Err(BsonError::UnhandledJson(other.to_string())),
        }
    }
}

impl From<bson_types::Array> for Array {
    fn from(arr: bson_types::Array) -> Self {
        Self(arr)
    }
}

impl From<Array> for bson_types::Array {
    fn from(arr: Array) -> Self {
        arr.0
    }
}

impl Sealed for Array {}

impl BsonType for Array {
    const NAME: &'static str = "Array";

    fn read_from<R: BufRead>(r: &mut R) -> Result<Self> {
        Self::read_from_with_limits(r, &DecodeLimits::default())
    }

    fn append_binary(&self, out: &mut Vec<u8>) -> Result<()> {
        write_array(&self.0, out)
    }

    fn to_json(&self) -> Result<JsonValue> {
        array_to_json(&self.0)
    }

    fn from_json(json: JsonValue) -> Result<Self> {
        Self::from_json_with_limits(json, &DecodeLimits::default())
    }

    fn unmarshal_json(data: &[u8]) -> Result<Self> {
        Self::unmarshal_json_with_limits(data, &DecodeLimits::default())
    }
}

pub(crate) fn read_array<R: BufRead>(
    r: &mut R,
    limits: &DecodeLimits,
    depth: usize,
) -> Result<bson_types::Array> {
    let entries = read_entries(r, limits, depth, Keys::Indexed)?;
    let values: Vec<_> = entries.into_iter().map(|(_, v)| v).collect();
    Ok(bson_types::Array::try_from(values)?)
}

pub(crate) fn read_nested_array(
    r: &mut &[u8],
    limits: &DecodeLimits,
    depth: usize,
) -> Result<bson_types::Array> {
    let entries = read_nested_entries(r, limits, depth, Keys::Indexed)?;
    let values: Vec<_> = entries.into_iter().map(|(_, v)| v).collect();
    Ok(bson_types::Array::try_from(values)?)
}

pub(crate) fn write_array(arr: &bson_types::Array, out: &mut Vec<u8>) -> Result<()> {
    write_entries(
        arr.iter().enumerate().map(|(i, v)| (i.to_string(), v)),
        Keys::Indexed,
        out,
    )
}

pub(crate) fn array_to_json(arr: &bson_types::Array) -> Result<JsonValue> {
    arr.iter()
        .enumerate()
        .map(|(i, v)| value_to_json(v).map_err(|e| e.in_element(i)))
        .collect::<Result<Vec<_>>>()
        .map(JsonValue::Array)
}

pub(crate) fn array_from_json(
    items: Vec<JsonValue>,
    limits: &DecodeLimits,
    depth: usize,
) -> Result<bson_types::Array> {
    if depth > limits.max_depth {
        return Err(BsonError::DepthLimitExceeded {
            max: limits.max_depth,
        });
    }

    let values = items
        .into_iter()
        .enumerate()
        .map(|(i, json)| value_from_json(json, limits, depth).map_err(|e| e.in_element(i)))
        .collect::<Result<Vec<_>>>()?;
    Ok(bson_types::Array::try_from(values)?)
}
