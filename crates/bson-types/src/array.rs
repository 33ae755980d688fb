//! Ordered arrays of values.

use crate::error::{Result, TypesError};
use crate::value::{validate_at, Value};

/// An ordered sequence of values.
///
/// Elements go through the same validation as document values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Array(Vec<Value>);

impl Array {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value at `index`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if `index` is not in `[0, len)`.
    pub fn get(&self, index: usize) -> Result<&Value> {
        self.0.get(index).ok_or(TypesError::IndexOutOfBounds {
            index,
            len: self.0.len(),
        })
    }

    /// Replaces the value at `index`. The array is unchanged on error.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if `index` is not in `[0, len)`, or a validation
    /// error for `value`.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<()> {
        let len = self.0.len();
        if index >= len {
            return Err(TypesError::IndexOutOfBounds { index, len });
        }

        let value = value.into();
        validate_at(&value, 1).map_err(|e| e.in_element(index))?;

        self.0[index] = value;
        Ok(())
    }

    /// Appends a value.
    ///
    /// # Errors
    ///
    /// A validation error for `value`.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        validate_at(&value, 1).map_err(|e| e.in_element(self.0.len()))?;
        self.0.push(value);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Value> {
        self.0
    }
}

impl TryFrom<Vec<Value>> for Array {
    type Error = TypesError;

    fn try_from(values: Vec<Value>) -> Result<Self> {
        for (i, v) in values.iter().enumerate() {
            validate_at(v, 1).map_err(|e| e.in_element(i))?;
        }
        Ok(Self(values))
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
