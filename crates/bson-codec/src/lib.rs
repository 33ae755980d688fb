//! # bson-codec
//!
//! Byte-exact codec for a subset of **BSON**, plus a private JSON projection
//! that round-trips through the same value model.
//!
//! Every wire type implements [`BsonType`]: it can be read from a byte stream,
//! re-encoded to exactly the bytes it was read from, and projected to and from
//! canonical JSON.
//!
//! ## Quick start
//!
//! ```rust
//! use bson_codec::{BsonType, Document};
//!
//! let doc = Document(bson_types::Document::from_pairs([("ismaster", true)]).unwrap());
//!
//! let bytes = doc.marshal_binary().unwrap();
//! let back = Document::read_from(&mut bytes.as_slice()).unwrap();
//! assert_eq!(back, doc);
//!
//! let json = doc.marshal_json().unwrap();
//! assert_eq!(json, r#"{"$k":["ismaster"],"ismaster":true}"#);
//! assert_eq!(Document::unmarshal_json(json.as_bytes()).unwrap(), doc);
//! ```
//!
//! ## Untrusted input
//!
//! Decoding checks every length prefix before allocating and refuses to nest
//! deeper than [`DecodeLimits::max_depth`]. Use
//! [`Document::read_from_with_limits`] to tighten the defaults.
//!
//! ## Modules
//!
//! - [`codec`] — the `BsonType` trait
//! - [`document`] / [`array`] — containers
//! - [`cstring`] — zero-terminated strings
//! - [`scalar`] — Double, String, Binary, Bool, Int32, Int64
//! - [`tag`] — element tag table
//! - [`limits`] — `DecodeLimits`
//! - [`error`] — `BsonError`

pub mod array;
pub mod codec;
pub mod cstring;
pub mod document;
pub mod error;
pub mod limits;
pub mod scalar;
pub mod tag;
mod value;

pub use array::Array;
pub use codec::BsonType;
pub use cstring::CString;
pub use document::Document;
pub use error::{BsonError, Result};
pub use limits::{DecodeLimits, MAX_DOCUMENT_LEN, MIN_DOCUMENT_LEN};
pub use scalar::{Binary, Bool, Double, Int32, Int64, Text};
pub use tag::Tag;
