//! Zero-terminated strings, used for field names.

use std::io::BufRead;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::codec::{BsonType, Sealed};
use crate::error::{BsonError, Result};

/// A UTF-8 string without zero bytes.
///
/// Wire form: the string bytes followed by a single `0x00`.
/// JSON projection: `{"$c":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CString(String);

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CStringJson {
    #[serde(rename = "$c")]
    c: String,
}

impl CString {
    /// # Errors
    ///
    /// `ZeroByteInCString` if `s` contains a zero byte.
    pub fn new(s: impl Into<String>) -> Result<Self> {
        let s = s.into();
        if s.as_bytes().contains(&0) {
            return Err(BsonError::ZeroByteInCString);
        }
        Ok(Self(s))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Append `s` as a zero-terminated string.
pub(crate) fn append_cstring(s: &str, out: &mut Vec<u8>) -> Result<()> {
    if s.as_bytes().contains(&0) {
        return Err(BsonError::ZeroByteInCString);
    }
    out.extend_from_slice(s.as_bytes());
    out.push(0);
    Ok(())
}

impl Sealed for CString {}

impl BsonType for CString {
    const NAME: &'static str = "CString";

    fn read_from<R: BufRead>(r: &mut R) -> Result<Self> {
        let mut b = Vec::new();
        r.read_until(0, &mut b)
            .map_err(|e| BsonError::from_read(e, "cstring"))?;
        if b.pop() != Some(0) {
            return Err(BsonError::Truncated { what: "cstring" });
        }

        let s = String::from_utf8(b).map_err(|_| BsonError::InvalidUtf8("cstring"))?;
        Ok(Self(s))
    }

    fn append_binary(&self, out: &mut Vec<u8>) -> Result<()> {
        append_cstring(&self.0, out)
    }

    fn to_json(&self) -> Result<JsonValue> {
        Ok(serde_json::to_value(CStringJson { c: self.0.clone() })?)
    }

    fn from_json(json: JsonValue) -> Result<Self> {
        let o: CStringJson = serde_json::from_value(json)?;
        Self::new(o.c)
    }
}
