use crate::errors::CubbyResult;
use std::ops::Deref;
use std::sync::Arc;

/// Low-level interface to a flat key-value substrate.
///
/// # Purpose
/// Defines the contract every backend implementation must follow. A backend
/// holds string keys mapped to string values and supports enumeration of its
/// key space by index, which stores use for full-scan membership checks.
///
/// # Key Responsibilities
/// - **Lookup**: fetch the value stored under a key
/// - **Mutation**: set and remove single entries
/// - **Enumeration**: report the key count and the key at a given position
///
/// # Guarantees
/// Each call is atomic on its own; there is no transaction or ordering
/// guarantee across calls. Implementations decide key enumeration order, and
/// stores must not rely on it.
///
/// # Thread Safety
/// Implementers must be `Send + Sync` for safe use in concurrent contexts,
/// but the engine itself issues only direct, blocking calls.
pub trait BackendProvider: Send + Sync {
    /// Returns the value stored under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> CubbyResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> CubbyResult<()>;

    /// Removes the entry under `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> CubbyResult<()>;

    /// Returns the number of keys currently held.
    fn size(&self) -> CubbyResult<usize>;

    /// Returns the key at position `index`, or `None` if `index` is out of range.
    fn key_at(&self, index: usize) -> CubbyResult<Option<String>>;
}

/// A cloneable facade over a backend implementation.
///
/// # Purpose
/// `Backend` wraps an implementation of `BackendProvider` behind an `Arc`
/// trait object and exposes all provider methods through `Deref`, so stores
/// can share one backend reference without caring which implementation is
/// underneath.
///
/// # Characteristics
/// - **Cloneable**: cloning only increments the Arc reference count
/// - **Shared**: every store minted by one factory holds a clone of the
///   same backend; no store may assume exclusive access
#[derive(Clone)]
pub struct Backend {
    inner: Arc<dyn BackendProvider>,
}

impl Backend {
    /// Wraps a backend implementation in a shareable facade.
    pub fn new<P: BackendProvider + 'static>(provider: P) -> Self {
        Backend {
            inner: Arc::new(provider),
        }
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend").finish_non_exhaustive()
    }
}

impl Deref for Backend {
    type Target = Arc<dyn BackendProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{CubbyError, ErrorKind};

    struct FixedBackend;

    impl BackendProvider for FixedBackend {
        fn get(&self, key: &str) -> CubbyResult<Option<String>> {
            if key == "present" {
                Ok(Some("value".to_string()))
            } else {
                Ok(None)
            }
        }

        fn set(&self, _key: &str, _value: &str) -> CubbyResult<()> {
            Err(CubbyError::new("read-only backend", ErrorKind::BackendError))
        }

        fn remove(&self, _key: &str) -> CubbyResult<()> {
            Ok(())
        }

        fn size(&self) -> CubbyResult<usize> {
            Ok(1)
        }

        fn key_at(&self, index: usize) -> CubbyResult<Option<String>> {
            if index == 0 {
                Ok(Some("present".to_string()))
            } else {
                Ok(None)
            }
        }
    }

    #[test]
    fn test_facade_delegates_get() {
        let backend = Backend::new(FixedBackend);
        assert_eq!(backend.get("present").unwrap(), Some("value".to_string()));
        assert_eq!(backend.get("absent").unwrap(), None);
    }

    #[test]
    fn test_facade_delegates_enumeration() {
        let backend = Backend::new(FixedBackend);
        assert_eq!(backend.size().unwrap(), 1);
        assert_eq!(backend.key_at(0).unwrap(), Some("present".to_string()));
        assert_eq!(backend.key_at(5).unwrap(), None);
    }

    #[test]
    fn test_facade_surfaces_provider_errors() {
        let backend = Backend::new(FixedBackend);
        let result = backend.set("k", "v");
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::BackendError);
    }

    #[test]
    fn test_facade_clone_shares_provider() {
        let backend = Backend::new(FixedBackend);
        let clone = backend.clone();
        assert_eq!(clone.size().unwrap(), backend.size().unwrap());
    }
}
