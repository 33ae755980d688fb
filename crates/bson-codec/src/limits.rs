//! Decode-time resource limits.

use bson_types::MAX_NESTING_DEPTH;

/// Largest accepted document, in bytes, including its length prefix.
pub const MAX_DOCUMENT_LEN: i32 = 16_777_216;

/// Smallest possible document: the length prefix plus the terminator.
pub const MIN_DOCUMENT_LEN: i32 = 5;

/// Limits applied while decoding untrusted input.
///
/// The length cap is checked against the length prefix before anything is
/// allocated; the depth cap is checked before descending into a nested
/// document or array. Limits can only be tightened below the format maximums.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Maximum number of nested containers, counting the top-level one.
    pub max_depth: usize,
    /// Maximum length of any single document or array, in bytes.
    pub max_document_len: i32,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_depth: MAX_NESTING_DEPTH,
            max_document_len: MAX_DOCUMENT_LEN,
        }
    }
}

impl DecodeLimits {
    /// Lower the depth limit. Values above [`MAX_NESTING_DEPTH`] are clamped.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_NESTING_DEPTH);
        self
    }

    /// Lower the document length limit. Values are clamped to
    /// `[MIN_DOCUMENT_LEN, MAX_DOCUMENT_LEN]`.
    #[must_use]
    pub fn with_max_document_len(mut self, max_document_len: i32) -> Self {
        self.max_document_len = max_document_len.clamp(MIN_DOCUMENT_LEN, MAX_DOCUMENT_LEN);
        self
    }
}
