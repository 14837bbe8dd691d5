//! String extraction with explicit ownership.
//!
//! UTF-8 text is read in place. Any other encoding needs a transcoding pass,
//! which produces a fresh buffer the caller must hand to a
//! [`DeferredStringRegistry`].

use crate::error::{CoercionError, CoercionResult};
use crate::registry::DeferredStringRegistry;
use opdesc_core::{DynamicValue, TextValue};
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// Raw result of [`extract`], tagged with who owns the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedStr<'a> {
    /// Points into the source value; valid while the source is alive
    Borrowed(&'a str),
    /// Produced by transcoding; must be registered for deferred release
    OwnedDeferred(String),
}

impl<'a> ExtractedStr<'a> {
    /// Whether the buffer was produced by transcoding.
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::OwnedDeferred(_))
    }

    /// Settle ownership: borrowed buffers pass through, owned buffers are
    /// appended to `registry` exactly once.
    pub fn settle(self, registry: &mut DeferredStringRegistry) -> StrBuf<'a> {
        match self {
            Self::Borrowed(s) => StrBuf::Borrowed(s),
            Self::OwnedDeferred(s) => StrBuf::Deferred(registry.register(s)),
        }
    }
}

/// Extract a string from a dynamic value.
pub fn extract(value: &DynamicValue) -> CoercionResult<ExtractedStr<'_>> {
    match value {
        DynamicValue::Text(TextValue::Utf8(s)) => Ok(ExtractedStr::Borrowed(s)),
        DynamicValue::Text(TextValue::Utf16(units)) => String::from_utf16(units)
            .map(ExtractedStr::OwnedDeferred)
            .map_err(|_| CoercionError::conversion_failure("Invalid UTF-16 in string value")),
        other => Err(CoercionError::type_mismatch(format!(
            "String value required, got {}",
            other.type_name()
        ))),
    }
}

/// String buffer valid for at least the current construction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrBuf<'a> {
    /// Borrowed from the descriptor
    Borrowed(&'a str),
    /// Shared with the pass's [`DeferredStringRegistry`]
    Deferred(Rc<str>),
}

impl StrBuf<'_> {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Borrowed(s) => s,
            Self::Deferred(s) => s.as_ref(),
        }
    }

    /// Whether this buffer was registered for deferred release.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

impl Deref for StrBuf<'_> {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for StrBuf<'_> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for StrBuf<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for StrBuf<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
