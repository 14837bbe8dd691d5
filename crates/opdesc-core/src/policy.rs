//! Serializer selection for values without a native typed form.

use crate::dynamic::OpaqueValue;
use std::fmt;
use std::sync::Arc;

/// Caller-supplied encoder for opaque values.
pub trait OpaqueSerializer: Send + Sync {
    /// Encode an opaque value into bytes.
    fn serialize(&self, value: &OpaqueValue) -> anyhow::Result<Vec<u8>>;
}

impl<F> OpaqueSerializer for F
where
    F: Fn(&OpaqueValue) -> anyhow::Result<Vec<u8>> + Send + Sync,
{
    fn serialize(&self, value: &OpaqueValue) -> anyhow::Result<Vec<u8>> {
        self(value)
    }
}

/// How opaque values are encoded into the typed-value form.
#[derive(Clone, Default)]
pub enum SerializerPolicy {
    /// Opaque values are rejected
    #[default]
    None,

    /// Opaque payloads are encoded as JSON bytes
    Json,

    /// Opaque values are handed to a caller-supplied serializer
    User(Arc<dyn OpaqueSerializer>),
}

impl SerializerPolicy {
    /// Wrap a caller-supplied serializer.
    pub fn user(serializer: impl OpaqueSerializer + 'static) -> Self {
        Self::User(Arc::new(serializer))
    }

    /// Short name of the policy, used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Json => "json",
            Self::User(_) => "user",
        }
    }
}

impl fmt::Debug for SerializerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SerializerPolicy").field(&self.name()).finish()
    }
}
