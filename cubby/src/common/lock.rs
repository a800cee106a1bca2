use parking_lot::RwLock;
use std::sync::Arc;

/// A shared, lock-guarded cell used throughout the crate for interior mutability.
pub type Atomic<T> = Arc<RwLock<T>>;

/// Wraps a value in an [`Atomic`] cell.
pub fn atomic<T>(value: T) -> Atomic<T> {
    Arc::new(RwLock::new(value))
}
