//! Key-value backend abstractions.
//!
//! This module provides the persistence substrate abstraction for Cubby.
//! Backends are pluggable: any flat, string-keyed, string-valued store that
//! can get, set, remove, and enumerate keys can host Cubby stores.
//!
//! # Backend Providers
//!
//! Backend providers implement `BackendProvider`. Cubby includes:
//! - **In-Memory Backend**: `MemoryBackend`, insertion-ordered, for testing
//!   and session-scoped data
//!
//! # Partitions
//!
//! A hosting environment may expose two logical partitions, `Durable` and
//! `Session`. `StorageEnvironment` gathers the backends a host actually
//! provides and is passed explicitly to the store factory, so tests can
//! substitute an in-memory backend deterministically.
//!
//! # Guarantees
//!
//! Backends promise per-call atomicity and nothing more: no transactions,
//! no ordering beyond key enumeration, no cross-writer coordination.

mod backend;
mod environment;
mod memory;

pub use backend::*;
pub use environment::*;
pub use memory::*;
