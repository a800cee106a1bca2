//! The per-type persistence handle.
//!
//! An `ObjectStore<T>` owns one (type, namespace) pairing and performs
//! create/update, retrieval, removal, listing, counting, and clearing
//! against the backend through keys its codec derives. Stores are minted by
//! a [`StoreFactory`](crate::factory::StoreFactory) and never share a key
//! prefix.

mod descriptor;
mod object_store;
mod options;

pub use descriptor::*;
pub use object_store::*;
pub use options::*;
