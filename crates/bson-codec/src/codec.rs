//! The contract shared by every wire type, plus low-level read helpers.

use std::io::{BufRead, ErrorKind, Read, Write};

use serde::de::Error as _;
use serde_json::Value as JsonValue;

use crate::error::{BsonError, Result};

mod private {
    pub trait Sealed {}
}

pub(crate) use private::Sealed;

/// A value with a byte-exact binary encoding and a canonical JSON projection.
///
/// The set of implementors is closed: [`Document`](crate::Document),
/// [`Array`](crate::Array), [`CString`](crate::CString) and the scalar
/// wrappers in [`scalar`](crate::scalar).
///
/// For every input accepted by [`read_from`](BsonType::read_from),
/// [`marshal_binary`](BsonType::marshal_binary) reproduces the consumed bytes
/// exactly.
pub trait BsonType: Sized + Sealed {
    /// Type name used in error messages.
    const NAME: &'static str;

    /// Read one value, consuming exactly its encoding and nothing after it.
    ///
    /// # Errors
    ///
    /// Any structural decode error; `Truncated` on a short read.
    fn read_from<R: BufRead>(r: &mut R) -> Result<Self>;

    /// Append the canonical encoding to `out`.
    ///
    /// # Errors
    ///
    /// Values that cannot be encoded, such as an oversized document.
    fn append_binary(&self, out: &mut Vec<u8>) -> Result<()>;

    /// Build the JSON projection tree.
    ///
    /// # Errors
    ///
    /// Values without a projection, such as a document field named `$k`.
    fn to_json(&self) -> Result<JsonValue>;

    /// Interpret a JSON projection tree.
    ///
    /// # Errors
    ///
    /// Shape mismatches, unknown fields, and value-model validation failures.
    fn from_json(json: JsonValue) -> Result<Self>;

    /// The canonical encoding.
    ///
    /// # Errors
    ///
    /// Same as [`append_binary`](BsonType::append_binary).
    fn marshal_binary(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.append_binary(&mut out)?;
        Ok(out)
    }

    /// Write the canonical encoding to `w`.
    ///
    /// # Errors
    ///
    /// Encoding errors, or `Io` if the writer fails.
    fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        let b = self.marshal_binary()?;
        w.write_all(&b)?;
        Ok(())
    }

    /// Compact JSON projection.
    ///
    /// # Errors
    ///
    /// Same as [`to_json`](BsonType::to_json).
    fn marshal_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_json()?)?)
    }

    /// Parse a JSON projection.
    ///
    /// The input must hold exactly one JSON value; anything after it, including
    /// whitespace, is rejected. A bare `null` is rejected.
    ///
    /// # Errors
    ///
    /// JSON syntax errors, trailing input, and everything
    /// [`from_json`](BsonType::from_json) rejects.
    fn unmarshal_json(data: &[u8]) -> Result<Self> {
        Self::from_json(parse_json(data, Self::NAME)?)
    }
}

/// Parse exactly one non-null JSON value from `data`.
pub(crate) fn parse_json(data: &[u8], type_name: &'static str) -> Result<JsonValue> {
    let mut stream = serde_json::Deserializer::from_slice(data).into_iter::<JsonValue>();
    let value = match stream.next() {
        Some(v) => v?,
        None => return Err(serde_json::Error::custom("no JSON value in input").into()),
    };

    let count = data.len() - stream.byte_offset();
    if count != 0 {
        return Err(BsonError::JsonTrailingBytes { count });
    }
    if value.is_null() {
        return Err(BsonError::JsonNull(type_name));
    }
    Ok(value)
}

pub(crate) fn read_bytes<const N: usize, R: Read>(r: &mut R, what: &'static str) -> Result<[u8; N]> {
    let mut b = [0u8; N];
    r.read_exact(&mut b).map_err(|e| BsonError::from_read(e, what))?;
    Ok(b)
}

pub(crate) fn read_u8<R: Read>(r: &mut R, what: &'static str) -> Result<u8> {
    Ok(read_bytes::<1, R>(r, what)?[0])
}

pub(crate) fn read_i32<R: Read>(r: &mut R, what: &'static str) -> Result<i32> {
    Ok(i32::from_le_bytes(read_bytes::<4, R>(r, what)?))
}

/// Read exactly `len` bytes without allocating more than the input provides.
///
/// Slices and buffered readers hand over what they hold in one piece, so an
/// in-memory input is copied into an exactly sized buffer.
pub(crate) fn read_vec<R: BufRead>(r: &mut R, len: usize, what: &'static str) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    while buf.len() < len {
        let chunk = match r.fill_buf() {
            Ok(chunk) => chunk,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(BsonError::from_read(e, what)),
        };
        if chunk.is_empty() {
            return Err(BsonError::Truncated { what });
        }
        let n = chunk.len().min(len - buf.len());
        buf.extend_from_slice(&chunk[..n]);
        r.consume(n);
    }
    Ok(buf)
}
