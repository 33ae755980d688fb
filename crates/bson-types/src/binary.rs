//! Binary data with a BSON subtype byte.

/// BSON binary subtype.
///
/// Every byte value is accepted and preserved; the constants name the subtypes
/// defined by the BSON format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BinarySubtype(pub u8);

impl BinarySubtype {
    pub const GENERIC: Self = Self(0x00);
    pub const FUNCTION: Self = Self(0x01);
    pub const OLD: Self = Self(0x02);
    pub const UUID_OLD: Self = Self(0x03);
    pub const UUID: Self = Self(0x04);
    pub const MD5: Self = Self(0x05);
    pub const ENCRYPTED: Self = Self(0x06);
    pub const USER: Self = Self(0x80);
}

impl Default for BinarySubtype {
    fn default() -> Self {
        Self::GENERIC
    }
}

impl From<u8> for BinarySubtype {
    fn from(b: u8) -> Self {
        Self(b)
    }
}

/// Binary payload with its subtype.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Binary {
    pub subtype: BinarySubtype,
    pub bytes: Vec<u8>,
}

impl Binary {
    #[must_use]
    pub fn new(subtype: BinarySubtype, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            subtype,
            bytes: bytes.into(),
        }
    }
}
