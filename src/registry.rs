//! Deferred ownership of transcoded string buffers.

use std::rc::Rc;

/// Owned string buffers accumulated during one operation-construction pass.
///
/// The registry holds one reference to every buffer handed to
/// [`register`](Self::register) and drops each reference exactly once, when
/// the registry is dropped at the end of the pass. That holds on every exit
/// path, so a pass that fails half-way still gives up whatever it
/// registered. A buffer is freed once the registry and every handle
/// returned for it are gone.
///
/// A registry belongs to a single pass; concurrent passes each use their own.
#[derive(Debug, Default)]
pub struct DeferredStringRegistry {
    buffers: Vec<Rc<str>>,
}

impl DeferredStringRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a buffer and return a handle to it.
    ///
    /// The handle stays valid independently of the value it was transcoded
    /// from.
    pub fn register(&mut self, buffer: String) -> Rc<str> {
        let shared: Rc<str> = Rc::from(buffer);
        self.buffers.push(Rc::clone(&shared));
        tracing::trace!(len = self.buffers.len(), "Registered deferred string");
        shared
    }

    /// Number of registered buffers.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Registered buffers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.buffers.iter().map(|b| &**b)
    }
}

impl Drop for DeferredStringRegistry {
    fn drop(&mut self) {
        if !self.buffers.is_empty() {
            tracing::trace!(
                references = self.buffers.len(),
                "Dropping registry references to deferred strings"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_appends_in_order() {
        let mut registry = DeferredStringRegistry::new();
        assert!(registry.is_empty());

        registry.register("first".to_string());
        registry.register("second".to_string());

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.iter().collect::<Vec<_>>(), vec!["first", "second"]);
    }

    #[test]
    fn test_handle_outlives_registry() {
        let handle = {
            let mut registry = DeferredStringRegistry::new();
            registry.register("bin".to_string())
        };
        assert_eq!(&*handle, "bin");
        assert_eq!(Rc::strong_count(&handle), 1);
    }

    #[test]
    fn test_drop_releases_registry_references() {
        let mut registry = DeferredStringRegistry::new();
        let handle = registry.register("bin".to_string());
        assert_eq!(Rc::strong_count(&handle), 2);
        drop(registry);
        assert_eq!(Rc::strong_count(&handle), 1);
    }
}
