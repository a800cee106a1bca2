use crate::backend::Partition;
use crate::keys::KeyCodec;

/// The immutable identity of one store.
///
/// # Purpose
/// A `StoreDescriptor` fixes, at mint time, the triple that defines a store:
/// the type tag it accepts, the key codec carrying its collision-free key
/// prefix, and the backend partition it targets. Descriptors never change
/// after the store is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreDescriptor {
    type_tag: String,
    codec: KeyCodec,
    partition: Partition,
}

impl StoreDescriptor {
    pub(crate) fn new(type_tag: String, codec: KeyCodec, partition: Partition) -> Self {
        StoreDescriptor {
            type_tag,
            codec,
            partition,
        }
    }

    /// The type tag this store accepts and re-tags retrieved payloads with.
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// The derived key prefix; every key this store persists begins with it.
    pub fn key_prefix(&self) -> &str {
        self.codec.key_prefix()
    }

    /// The backend partition this store targets.
    pub fn partition(&self) -> Partition {
        self.partition
    }

    pub(crate) fn codec(&self) -> &KeyCodec {
        &self.codec
    }
}
