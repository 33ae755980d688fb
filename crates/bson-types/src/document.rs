//! Ordered documents with unique, validated keys.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::{Result, TypesError};
use crate::value::{is_valid_key, validate_at, Value};

/// An ordered mapping from field names to values.
///
/// Iteration order is insertion (or decode) order, never sorted. Two documents
/// are equal only if they hold the same fields in the same order.
///
/// Every constructor validates eagerly, so a `Document` value always satisfies
/// its invariants: keys are unique, non-empty and free of zero bytes, and every
/// value is valid for its position.
#[derive(Debug, Clone, Default)]
pub struct Document {
    fields: IndexMap<String, Value>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from an alternating key/value argument list.
    ///
    /// ```
    /// use bson_types::{Document, Value};
    ///
    /// let doc = Document::make(vec!["ismaster".into(), true.into()]).unwrap();
    /// assert_eq!(doc.get("ismaster"), Some(&Value::Bool(true)));
    /// ```
    ///
    /// # Errors
    ///
    /// Fails on the first violation: an odd argument count, a key position that
    /// does not hold a string, an invalid or repeated key, or an invalid value.
    pub fn make(args: Vec<Value>) -> Result<Self> {
        let l = args.len();
        if l % 2 != 0 {
            return Err(TypesError::OddArguments(l));
        }

        let mut doc = Self {
            fields: IndexMap::with_capacity(l / 2),
        };
        let mut args = args.into_iter();
        while let (Some(key), Some(value)) = (args.next(), args.next()) {
            let Value::String(key) = key else {
                return Err(TypesError::InvalidKeyType(key.kind().name()));
            };
            doc.add(key, value)?;
        }
        Ok(doc)
    }

    /// Build a document from typed key/value pairs.
    ///
    /// # Errors
    ///
    /// Same key and value checks as [`Document::make`].
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut doc = Self::new();
        for (key, value) in pairs {
            doc.add(key, value)?;
        }
        Ok(doc)
    }

    /// Build a document from decoded entries, keeping their order.
    ///
    /// # Errors
    ///
    /// Fails on an invalid or repeated key, or an invalid value.
    pub fn from_entries(entries: Vec<(String, Value)>) -> Result<Self> {
        let mut doc = Self {
            fields: IndexMap::with_capacity(entries.len()),
        };
        for (key, value) in entries {
            doc.add(key, value)?;
        }
        Ok(doc)
    }

    /// Build a document from a key list and a separate value map.
    ///
    /// This is the bridge for any representation that keeps field order in one
    /// place and values in another. The map is consumed; nothing is copied.
    ///
    /// # Errors
    ///
    /// Fails if the sizes differ, a key is invalid or repeated, a listed key has
    /// no value, or a value is invalid.
    pub fn from_parts(keys: Vec<String>, mut map: HashMap<String, Value>) -> Result<Self> {
        if keys.len() != map.len() {
            return Err(TypesError::CountMismatch {
                keys: keys.len(),
                values: map.len(),
            });
        }

        let mut doc = Self {
            fields: IndexMap::with_capacity(keys.len()),
        };
        for key in keys {
            if !is_valid_key(&key) {
                return Err(TypesError::InvalidKey(key));
            }
            if doc.fields.contains_key(&key) {
                return Err(TypesError::DuplicateKey(key));
            }
            let Some(value) = map.remove(&key) else {
                return Err(TypesError::KeyNotFound(key));
            };
            doc.add(key, value)?;
        }
        Ok(doc)
    }

    /// Append a field.
    ///
    /// # Errors
    ///
    /// Fails if the key is already present or invalid, or the value is invalid.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        let key = key.into();
        if self.fields.contains_key(&key) {
            return Err(TypesError::DuplicateKey(key));
        }
        if !is_valid_key(&key) {
            return Err(TypesError::InvalidKey(key));
        }

        let value = value.into();
        validate_at(&value, 1).map_err(|e| e.in_field(key.as_str()))?;

        self.fields.insert(key, value);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Field names in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.values()
    }

    /// Fields in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consume the document, yielding its fields in order.
    #[must_use]
    pub fn into_entries(self) -> Vec<(String, Value)> {
        self.fields.into_iter().collect()
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len() && self.fields.iter().eq(other.fields.iter())
    }
}
