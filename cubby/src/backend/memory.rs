use crate::backend::{Backend, BackendProvider};
use crate::errors::CubbyResult;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// In-memory key-value backend.
///
/// # Purpose
/// `MemoryBackend` keeps all entries in process memory in insertion order,
/// so key enumeration behaves like a freshly written browser-style storage
/// area. It is the default backend for both partitions of an in-memory
/// [`StorageEnvironment`](crate::backend::StorageEnvironment) and the
/// substrate of choice for tests.
///
/// # Characteristics
/// - **Insertion-Ordered**: `key_at` walks keys in the order they were first set
/// - **Thread-Safe**: can be cloned and shared; all clones see the same entries
/// - **No Persistence**: all data is lost when the last clone is dropped
///
/// # Usage
/// ```text
/// let backend = Backend::new(MemoryBackend::new());
/// backend.set("greeting", "hello")?;
/// assert_eq!(backend.get("greeting")?, Some("hello".to_string()));
/// ```
#[derive(Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<MemoryBackendInner>,
}

impl MemoryBackend {
    /// Creates a new, empty in-memory backend.
    pub fn new() -> Self {
        MemoryBackend::default()
    }

    /// Wraps this backend in a shareable [`Backend`] facade.
    pub fn into_backend(self) -> Backend {
        Backend::new(self)
    }
}

impl BackendProvider for MemoryBackend {
    fn get(&self, key: &str) -> CubbyResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> CubbyResult<()> {
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> CubbyResult<()> {
        self.inner.remove(key)
    }

    fn size(&self) -> CubbyResult<usize> {
        self.inner.size()
    }

    fn key_at(&self, index: usize) -> CubbyResult<Option<String>> {
        self.inner.key_at(index)
    }
}

#[derive(Default)]
struct MemoryBackendInner {
    entries: RwLock<IndexMap<String, String>>,
}

impl MemoryBackendInner {
    fn get(&self, key: &str) -> CubbyResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CubbyResult<()> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> CubbyResult<()> {
        // shift_remove keeps the remaining keys in insertion order
        self.entries.write().shift_remove(key);
        Ok(())
    }

    fn size(&self) -> CubbyResult<usize> {
        Ok(self.entries.read().len())
    }

    fn key_at(&self, index: usize) -> CubbyResult<Option<String>> {
        Ok(self
            .entries
            .read()
            .get_index(index)
            .map(|(key, _)| key.clone()))
    }
}
