//! Scalar wire types.
//!
//! | Type | Tag | Wire form | JSON projection |
//! |------|-----|-----------|-----------------|
//! | [`Double`] | 0x01 | 8 bytes LE IEEE-754 | `{"$f":1.5}`, `"Infinity"`, `"-Infinity"`, `"NaN"` |
//! | [`Text`] | 0x02 | int32 length + bytes + `0x00` | `"..."` |
//! | [`Binary`] | 0x05 | int32 length + subtype + bytes | `{"$b":"<base64>","s":4}` |
//! | [`Bool`] | 0x08 | `0x00` / `0x01` | `true` / `false` |
//! | [`Int32`] | 0x10 | 4 bytes LE | `42` |
//! | [`Int64`] | 0x12 | 8 bytes LE | `{"$l":"42"}` |
//!
//! Int64 projects through a decimal string because JSON numbers are commonly
//! read as float64. NaN payload bits survive the binary form but not JSON.

use std::io::BufRead;

use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value as JsonValue};

use crate::codec::{read_bytes, read_i32, read_u8, read_vec, BsonType, Sealed};
use crate::error::{BsonError, Result};

fn unexpected_json(expected: &str, json: &JsonValue) -> BsonError {
    BsonError::UnhandledJson(format!("{json} (expected {expected})"))
}

// ============================================================================
// Double
// ============================================================================

/// BSON double.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Double(pub f64);

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct DoubleJson {
    #[serde(rename = "$f")]
    f: JsonValue,
}

impl Sealed for Double {}

impl BsonType for Double {
    const NAME: &'static str = "Double";

    fn read_from<R: BufRead>(r: &mut R) -> Result<Self> {
        Ok(Self(f64::from_le_bytes(read_bytes::<8, R>(r, "double")?)))
    }

    fn append_binary(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(&self.0.to_le_bytes());
        Ok(())
    }

    fn to_json(&self) -> Result<JsonValue> {
        let f = self.0;
        let f = if f.is_nan() {
            JsonValue::from("NaN")
        } else if f == f64::INFINITY {
            JsonValue::from("Infinity")
        } else if f == f64::NEG_INFINITY {
            JsonValue::from("-Infinity")
        } else {
            Number::from_f64(f).map_or(JsonValue::Null, JsonValue::Number)
        };
        Ok(serde_json::to_value(DoubleJson { f })?)
    }

    fn from_json(json: JsonValue) -> Result<Self> {
        let o: DoubleJson = serde_json::from_value(json)?;
        let f = match &o.f {
            JsonValue::Number(n) => n.as_f64(),
            JsonValue::String(s) => match s.as_str() {
                "NaN" => Some(f64::NAN),
                "Infinity" => Some(f64::INFINITY),
                "-Infinity" => Some(f64::NEG_INFINITY),
                _ => None,
            },
            _ => None,
        };
        f.map(Self)
            .ok_or_else(|| BsonError::InvalidDouble(o.f.to_string()))
    }
}

// ============================================================================
// Text
// ============================================================================

/// BSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Text(pub String);

impl Sealed for Text {}

impl BsonType for Text {
    const NAME: &'static str = "String";

    fn read_from<R: BufRead>(r: &mut R) -> Result<Self> {
        let len = read_i32(r, "string length")?;
        if len < 1 {
            return Err(BsonError::InvalidLength {
                what: "string",
                len,
            });
        }

        let mut b = read_vec(r, len as usize, "string")?;
        if b.pop() != Some(0) {
            return Err(BsonError::MissingTerminator);
        }

        let s = String::from_utf8(b).map_err(|_| BsonError::InvalidUtf8("string"))?;
        Ok(Self(s))
    }

    fn append_binary(&self, out: &mut Vec<u8>) -> Result<()> {
        append_text(&self.0, out)
    }

    fn to_json(&self) -> Result<JsonValue> {
        Ok(JsonValue::String(self.0.clone()))
    }

    fn from_json(json: JsonValue) -> Result<Self> {
        match json {
            JsonValue::String(s) => Ok(Self(s)),
            other => Err(unexpected_json("string", &other)),
        }
    }
}

/// Append a string payload: length (bytes + terminator), bytes, `0x00`.
pub(crate) fn append_text(s: &str, out: &mut Vec<u8>) -> Result<()> {
    let len = i32::try_from(s.len() + 1).map_err(|_| BsonError::DocumentTooLarge(s.len() + 1))?;
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(s.as_bytes());
    out.push(0);
    Ok(())
}

// ============================================================================
// Binary
// ============================================================================

/// BSON binary data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Binary(pub bson_types::Binary);

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct BinaryJson {
    #[serde(rename = "$b")]
    b: String,
    s: u8,
}

impl Sealed for Binary {}

impl BsonType for Binary {
    const NAME: &'static str = "Binary";

    fn read_from<R: BufRead>(r: &mut R) -> Result<Self> {
        let len = read_i32(r, "binary length")?;
        if len < 0 {
            return Err(BsonError::InvalidLength {
                what: "binary",
                len,
            });
        }
        let subtype = read_u8(r, "binary subtype")?;
        let bytes = read_vec(r, len as usize, "binary")?;
        Ok(Self(bson_types::Binary::new(subtype.into(), bytes)))
    }

    fn append_binary(&self, out: &mut Vec<u8>) -> Result<()> {
        append_binary_data(&self.0, out)
    }

    fn to_json(&self) -> Result<JsonValue> {
        Ok(serde_json::to_value(BinaryJson {
            b: base64::engine::general_purpose::STANDARD.encode(&self.0.bytes),
            s: self.0.subtype.0,
        })?)
    }

    fn from_json(json: JsonValue) -> Result<Self> {
        let o: BinaryJson = serde_json::from_value(json)?;
        let bytes = base64::engine::general_purpose::STANDARD.decode(o.b)?;
        Ok(Self(bson_types::Binary::new(o.s.into(), bytes)))
    }
}

/// Append a binary payload: length, subtype, bytes.
pub(crate) fn append_binary_data(bin: &bson_types::Binary, out: &mut Vec<u8>) -> Result<()> {
    let len = i32::try_from(bin.bytes.len())
        .map_err(|_| BsonError::DocumentTooLarge(bin.bytes.len()))?;
    out.extend_from_slice(&len.to_le_bytes());
    out.push(bin.subtype.0);
    out.extend_from_slice(&bin.bytes);
    Ok(())
}

// ============================================================================
// Bool
// ============================================================================

/// BSON boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bool(pub bool);

impl Sealed for Bool {}

impl BsonType for Bool {
    const NAME: &'static str = "Bool";

    fn read_from<R: BufRead>(r: &mut R) -> Result<Self> {
        match read_u8(r, "bool")? {
            0 => Ok(Self(false)),
            1 => Ok(Self(true)),
            b => Err(BsonError::InvalidBool(b)),
        }
    }

    fn append_binary(&self, out: &mut Vec<u8>) -> Result<()> {
        out.push(u8::from(self.0));
        Ok(())
    }

    fn to_json(&self) -> Result<JsonValue> {
        Ok(JsonValue::Bool(self.0))
    }

    fn from_json(json: JsonValue) -> Result<Self> {
        match json {
            JsonValue::Bool(b) => Ok(Self(b)),
            other => Err(unexpected_json("bool", &other)),
        }
    }
}

// ============================================================================
// Int32
// ============================================================================

/// BSON 32-bit integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Int32(pub i32);

impl Sealed for Int32 {}

impl BsonType for Int32 {
    const NAME: &'static str = "Int32";

    fn read_from<R: BufRead>(r: &mut R) -> Result<Self> {
        Ok(Self(read_i32(r, "int32")?))
    }

    fn append_binary(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(&self.0.to_le_bytes());
        Ok(())
    }

    fn to_json(&self) -> Result<JsonValue> {
        Ok(JsonValue::from(self.0))
    }

    fn from_json(json: JsonValue) -> Result<Self> {
        json.as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(Self)
            .ok_or_else(|| unexpected_json("int32", &json))
    }
}

// ============================================================================
// Int64
// ============================================================================

/// BSON 64-bit integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Int64(pub i64);

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Int64Json {
    #[serde(rename = "$l")]
    l: String,
}

impl Sealed for Int64 {}

impl BsonType for Int64 {
    const NAME: &'static str = "Int64";

    fn read_from<R: BufRead>(r: &mut R) -> Result<Self> {
        Ok(Self(i64::from_le_bytes(read_bytes::<8, R>(r, "int64")?)))
    }

    fn append_binary(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(&self.0.to_le_bytes());
        Ok(())
    }

    fn to_json(&self) -> Result<JsonValue> {
        Ok(serde_json::to_value(Int64Json {
            l: self.0.to_string(),
        })?)
    }

    fn from_json(json: JsonValue) -> Result<Self> {
        let o: Int64Json = serde_json::from_value(json)?;
        o.l.parse()
            .map(Self)
            .map_err(|_| BsonError::InvalidInt64(o.l))
    }
}
