//! Documents: the length-prefixed element list shared with arrays.
//!
//! ```text
//! document := int32 length, element*, 0x00
//! element  := tag byte, cstring key, value
//! ```
//!
//! `length` counts every byte of the document including itself and the
//! terminator, so the empty document is `05 00 00 00 00`.

use std::collections::HashMap;
use std::io::BufRead;

use bson_types::Value;
use serde_json::{Map, Value as JsonValue};

use crate::codec::{parse_json, read_i32, read_vec, BsonType, Sealed};
use crate::cstring::{append_cstring, CString};
use crate::error::{BsonError, Result};
use crate::limits::{DecodeLimits, MAX_DOCUMENT_LEN, MIN_DOCUMENT_LEN};
use crate::tag::Tag;
use crate::value::{read_value, tag_of, value_from_json, value_to_json, write_value};

/// Field name of the key list in a document projection.
pub(crate) const KEY_LIST: &str = "$k";

/// How element keys are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Keys {
    /// Free-form field names.
    Named,
    /// Decimal positions `"0"`, `"1"`, … in order.
    Indexed,
}

impl Keys {
    fn wrap(self, err: BsonError, index: usize, key: &str) -> BsonError {
        match self {
            Keys::Named => err.in_field(key),
            Keys::Indexed => err.in_element(index),
        }
    }
}

/// BSON document.
///
/// A thin wrapper over [`bson_types::Document`] that adds the binary and JSON
/// encodings. Conversions in both directions move the inner value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document(pub bson_types::Document);

impl Document {
    #[must_use]
    pub fn into_inner(self) -> bson_types::Document {
        self.0
    }

    /// [`read_from`](BsonType::read_from) with caller-supplied limits.
    ///
    /// # Errors
    ///
    /// Any decode error, including limit violations.
    pub fn read_from_with_limits<R: BufRead>(r: &mut R, limits: &DecodeLimits) -> Result<Self> {
        read_document(r, limits, 1)
            .map(Self)
            .map_err(|e| e.in_op("Document::read_from"))
    }

    /// [`unmarshal_json`](BsonType::unmarshal_json) with caller-supplied limits.
    ///
    /// # Errors
    ///
    /// Any JSON or projection error, including limit violations.
    pub fn unmarshal_json_with_limits(data: &[u8], limits: &DecodeLimits) -> Result<Self> {
        let json = parse_json(data, Self::NAME).map_err(|e| e.in_op("Document::unmarshal_json"))?;
        Self::from_json_with_limits(json, limits).map_err(|e| e.in_op("Document::unmarshal_json"))
    }

    fn from_json_with_limits(json: JsonValue, limits: &DecodeLimits) -> Result<Self> {
        match json {
            JsonValue::Object(map) => document_from_json(map, limits, 1).map(Self),
            other => Err(BsonError::UnhandledJson(other.to_string())),
        }
    }
}

impl From<bson_types::Document> for Document {
    fn from(doc: bson_types::Document) -> Self {
        Self(doc)
    }
}

impl From<Document> for bson_types::Document {
    fn from(doc: Document) -> Self {
        doc.0
    }
}

impl Sealed for Document {}

impl BsonType for Document {
    const NAME: &'static str = "Document";

    fn read_from<R: BufRead>(r: &mut R) -> Result<Self> {
        Self::read_from_with_limits(r, &DecodeLimits::default())
    }

    fn append_binary(&self, out: &mut Vec<u8>) -> Result<()> {
        write_document(&self.0, out)
    }

    fn to_json(&self) -> Result<JsonValue> {
        document_to_json(&self.0)
    }

    fn from_json(json: JsonValue) -> Result<Self> {
        Self::from_json_with_limits(json, &DecodeLimits::default())
    }

    fn unmarshal_json(data: &[u8]) -> Result<Self> {
        Self::unmarshal_json_with_limits(data, &DecodeLimits::default())
    }
}

// ============================================================================
// Binary form
// ============================================================================

fn check_depth(limits: &DecodeLimits, depth: usize) -> Result<()> {
    if depth > limits.max_depth {
        return Err(BsonError::DepthLimitExceeded {
            max: limits.max_depth,
        });
    }
    Ok(())
}

/// Validate a length prefix and return the size of the body after it.
fn body_len(len: i32, limits: &DecodeLimits) -> Result<usize> {
    if len < MIN_DOCUMENT_LEN || len > limits.max_document_len {
        return Err(BsonError::InvalidDocumentLength(len));
    }
    Ok(len as usize - 4)
}

/// Read a top-level element list from a stream. `depth` is the nesting level
/// of the container being read, 1 for the top level.
///
/// Only this level copies its bytes out of the reader; nested containers are
/// parsed in place from that buffer.
pub(crate) fn read_entries<R: BufRead>(
    r: &mut R,
    limits: &DecodeLimits,
    depth: usize,
    keys: Keys,
) -> Result<Vec<(String, Value)>> {
    check_depth(limits, depth)?;
    let len = body_len(read_i32(r, "document length")?, limits)?;
    let body = read_vec(r, len, "document")?;
    parse_entries(&body, limits, depth, keys)
}

/// Split a nested element list off the front of `r` and parse it.
pub(crate) fn read_nested_entries(
    r: &mut &[u8],
    limits: &DecodeLimits,
    depth: usize,
    keys: Keys,
) -> Result<Vec<(String, Value)>> {
    check_depth(limits, depth)?;
    let len = body_len(read_i32(r, "document length")?, limits)?;
    if len > r.len() {
        return Err(BsonError::Truncated { what: "document" });
    }
    let input: &[u8] = *r;
    let (body, rest) = input.split_at(len);
    *r = rest;
    parse_entries(body, limits, depth, keys)
}

/// Parse the elements and terminator that follow a length prefix.
fn parse_entries(
    mut body: &[u8],
    limits: &DecodeLimits,
    depth: usize,
    keys: Keys,
) -> Result<Vec<(String, Value)>> {
    let mut entries = Vec::new();

    loop {
        let Some((&tag, rest)) = body.split_first() else {
            return Err(BsonError::Unterminated);
        };
        body = rest;

        if tag == 0 {
            if !body.is_empty() {
                return Err(BsonError::TrailingBytes { count: body.len() });
            }
            return Ok(entries);
        }

        let index = entries.len();
        let key = CString::read_from(&mut body)
            .map_err(|e| e.in_element(index))?
            .into_string();

        if keys == Keys::Indexed && key != index.to_string() {
            return Err(BsonError::ArrayIndex { index, key });
        }

        let kind = Tag::decode_kind(tag).map_err(|e| keys.wrap(e, index, &key))?;
        let value = read_value(kind, &mut body, limits, depth)
            .map_err(|e| keys.wrap(e, index, &key))?;
        entries.push((key, value));
    }
}

/// Write one element list, patching in its length once the size is known.
pub(crate) fn write_entries<'a, K, I>(entries: I, keys: Keys, out: &mut Vec<u8>) -> Result<()>
where
    K: AsRef<str>,
    I: IntoIterator<Item = (K, &'a Value)>,
{
    let start = out.len();
    out.extend_from_slice(&[0; 4]);

    for (index, (key, value)) in entries.into_iter().enumerate() {
        let key = key.as_ref();
        out.push(tag_of(value).byte());
        append_cstring(key, out).map_err(|e| keys.wrap(e, index, key))?;
        write_value(value, out).map_err(|e| keys.wrap(e, index, key))?;
    }
    out.push(0);

    let len = out.len() - start;
    let n = i32::try_from(len)
        .ok()
        .filter(|&n| n <= MAX_DOCUMENT_LEN)
        .ok_or(BsonError::DocumentTooLarge(len))?;
    out[start..start + 4].copy_from_slice(&n.to_le_bytes());
    Ok(())
}

pub(crate) fn read_document<R: BufRead>(
    r: &mut R,
    limits: &DecodeLimits,
    depth: usize,
) -> Result<bson_types::Document> {
    let entries = read_entries(r, limits, depth, Keys::Named)?;
    Ok(bson_types::Document::from_entries(entries)?)
}

pub(crate) fn read_nested_document(
    r: &mut &[u8],
    limits: &DecodeLimits,
    depth: usize,
) -> Result<bson_types::Document> {
    let entries = read_nested_entries(r, limits, depth, Keys::Named)?;
    Ok(bson_types::Document::from_entries(entries)?)
}

pub(crate) fn write_document(doc: &bson_types::Document, out: &mut Vec<u8>) -> Result<()> {
    write_entries(doc.iter(), Keys::Named, out)
}

// ============================================================================
// JSON projection
// ============================================================================

/// `{"$k":[keys...], key: value, ...}` with `$k` first and fields in order.
pub(crate) fn document_to_json(doc: &bson_types::Document) -> Result<JsonValue> {
    let mut map = Map::with_capacity(doc.len() + 1);
    map.insert(
        KEY_LIST.to_string(),
        JsonValue::Array(doc.keys().map(JsonValue::from).collect()),
    );

    for (key, value) in doc.iter() {
        if key == KEY_LIST {
            return Err(BsonError::ReservedKey(key.to_string()));
        }
        map.insert(key.to_string(), value_to_json(value).map_err(|e| e.in_field(key))?);
    }
    Ok(JsonValue::Object(map))
}

/// Interpret a document projection. Field order comes from `$k` alone; the
/// order of the JSON object's own fields is ignored.
pub(crate) fn document_from_json(
    mut map: Map<String, JsonValue>,
    limits: &DecodeLimits,
    depth: usize,
) -> Result<bson_types::Document> {
    if depth > limits.max_depth {
        return Err(BsonError::DepthLimitExceeded {
            max: limits.max_depth,
        });
    }

    let total = map.len();
    let keys: Vec<String> = match map.remove(KEY_LIST) {
        Some(keys) => serde_json::from_value(keys)?,
        None => return Err(BsonError::MissingKeyList),
    };
    if keys.len() != map.len() {
        return Err(BsonError::KeyCountMismatch {
            keys: keys.len(),
            total,
        });
    }

    let mut values = HashMap::with_capacity(keys.len());
    for key in &keys {
        if values.contains_key(key) {
            return Err(bson_types::TypesError::DuplicateKey(key.clone()).into());
        }
        let Some(json) = map.remove(key) else {
            return Err(BsonError::MissingField(key.clone()));
        };
        let value = value_from_json(json, limits, depth).map_err(|e| e.in_field(key))?;
        values.insert(key.clone(), value);
    }

    Ok(bson_types::Document::from_parts(keys, values)?)
}
