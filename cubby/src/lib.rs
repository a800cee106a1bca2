#![allow(
    dead_code,
    unused_imports,
)]
//! # Cubby - Typed Object Storage
//!
//! Cubby is a lightweight, embedded object-storage facade written in Rust.
//! It persists typed domain objects into any flat, string-keyed key-value
//! backend, and keeps unrelated stores sharing one backend from ever seeing
//! each other's entries.
//!
//! ## Key Features
//!
//! - **Embedded**: No separate server process required
//! - **Typed Stores**: One store per domain type, minted from a namespaced factory
//! - **Managed Identity**: Collision-free, namespaced ids assigned on first save
//! - **Envelope Metadata**: Creation and last-saved stamps maintained automatically
//! - **List and Sort**: Full-scan listing with field ordering, stable on ties
//! - **Pluggable Backends**: Any `get`/`set`/`remove`/enumerate substrate works
//! - **Clean API**: PIMPL pattern provides stable, encapsulated interface
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cubby::entity::Entity;
//! use cubby::factory::StoreFactory;
//! use cubby::record::Tracked;
//! use cubby::store::StoreOptions;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! impl Entity for Person {
//!     fn type_tag(&self) -> String {
//!         "Person".to_string()
//!     }
//! }
//!
//! # fn main() -> cubby::errors::CubbyResult<()> {
//! // Build a factory scoped to one namespace
//! let factory = StoreFactory::builder().namespace("myapp").build()?;
//!
//! // Mint a store for the Person type
//! let store = factory.create_store::<Person>(StoreOptions::new())?;
//!
//! // Save a record; an envelope with id and stamps is attached in place
//! let mut record = Tracked::new(Person { name: "Ola".to_string(), age: 28 });
//! let id = store.save(&mut record)?;
//!
//! // Retrieve it back, fully typed
//! let found = store.retrieve(&id)?;
//! assert!(found.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`backend`] - Key-value backend abstraction, in-memory backend, partitions
//! - [`common`] - Common types, constants, and utilities
//! - [`entity`] - The trait connecting domain types to stores
//! - [`envelope`] - Identity and timestamp metadata for stored records
//! - [`errors`] - Error types and result definitions
//! - [`factory`] - Namespace-scoped minter of stores
//! - [`keys`] - Key prefix derivation and membership parsing
//! - [`record`] - The tagged record wrapper carrying payload and envelope
//! - [`sorter`] - Comparator construction for ordered listings
//! - [`store`] - The per-type persistence handle

use crate::common::StampGenerator;
use std::sync::LazyLock;

pub mod backend;
pub mod common;
pub mod entity;
pub mod envelope;
pub mod errors;
pub mod factory;
pub mod keys;
pub mod record;
pub mod sorter;
pub mod store;

pub(crate) static STAMP_GENERATOR: LazyLock<StampGenerator> =
    LazyLock::new(StampGenerator::new);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamp_generator_initialization() {
        let token = STAMP_GENERATOR.next_token();
        assert!(!token.is_empty());
    }
}
