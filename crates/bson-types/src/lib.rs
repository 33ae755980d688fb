//! # bson-types
//!
//! In-memory value model for a BSON subset: ordered documents, arrays and the
//! closed set of scalar kinds they may hold.
//!
//! This crate knows nothing about encodings. The `bson-codec` crate reads and
//! writes these values in binary and JSON form.
//!
//! ## Quick start
//!
//! ```rust
//! use bson_types::{Array, Document, Value};
//!
//! let mut doc = Document::from_pairs([("ismaster", Value::Bool(true))]).unwrap();
//! doc.add("compression", Array::try_from(vec![Value::from("none")]).unwrap()).unwrap();
//! assert_eq!(doc.keys().collect::<Vec<_>>(), ["ismaster", "compression"]);
//!
//! // Keys are unique.
//! assert!(doc.add("ismaster", false).is_err());
//! ```
//!
//! ## Permitted kinds
//!
//! string, double, bool, null, int32, int64, binary, and the containers
//! `Document` and `Array`. See [`Value`] and [`validate_value`].
//!
//! ## Modules
//!
//! - [`value`] — `Value`, `Kind`, validation
//! - [`document`] — ordered `Document`
//! - [`array`] — `Array`
//! - [`binary`] — `Binary` and subtypes
//! - [`error`] — `TypesError`

pub mod array;
pub mod binary;
pub mod document;
pub mod error;
pub mod value;

pub use array::Array;
pub use binary::{Binary, BinarySubtype};
pub use document::Document;
pub use error::{Result, TypesError};
pub use value::{is_valid_key, validate_value, Kind, Value, MAX_NESTING_DEPTH};
