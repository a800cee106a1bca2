use crate::backend::Backend;
use crate::entity::Entity;
use crate::envelope::{Envelope, EnvelopeField};
use crate::errors::{CubbyError, CubbyResult, ErrorKind};
use crate::record::{decode_record, encode_record, Tracked};
use crate::sorter::{SortScope, Sorter};
use crate::store::{ListOptions, StoreDescriptor};
use crate::STAMP_GENERATOR;
use std::marker::PhantomData;
use std::sync::Arc;

/// What a removal targets: a raw id string or a tracked record.
///
/// Built implicitly through `From`, so both forms read naturally at the
/// call site:
///
/// ```ignore
/// store.remove(id.as_str())?;
/// store.remove(record)?;
/// ```
pub enum RemoveTarget<T> {
    /// Remove by id; the string must have the store's id-key shape.
    Id(String),
    /// Remove a previously retrieved or saved record.
    Object(Tracked<T>),
}

impl<T> From<&str> for RemoveTarget<T> {
    fn from(id: &str) -> Self {
        RemoveTarget::Id(id.to_string())
    }
}

impl<T> From<String> for RemoveTarget<T> {
    fn from(id: String) -> Self {
        RemoveTarget::Id(id)
    }
}

impl<T> From<Tracked<T>> for RemoveTarget<T> {
    fn from(record: Tracked<T>) -> Self {
        RemoveTarget::Object(record)
    }
}

/// The per-type persistence handle.
///
/// # Purpose
/// `ObjectStore<T>` performs all persistence operations for one domain type
/// within one namespace: `save`, `retrieve`, `remove`, `list`, `count`,
/// `clear`, and the `info` metadata accessor. Every key it touches is derived
/// through its descriptor's codec, so stores sharing a backend never see each
/// other's entries.
///
/// # Characteristics
/// - **Typed**: accepts and returns `Tracked<T>` records; wrongly-tagged
///   records are rejected with `TypeMismatch`
/// - **Synchronous**: every operation is a direct, blocking call into the
///   backend
/// - **Cloneable**: clones share the same descriptor and backend reference
///
/// # Failure Semantics
/// `TypeMismatch` and `InvalidKey` are caller errors and always surfaced. A
/// missing id on `retrieve`/`remove` is a normal absent result, not an
/// error. A record that fails to decode during a `list` scan is skipped with
/// a warning, since the backend may genuinely hold malformed entries left by
/// another version.
pub struct ObjectStore<T: Entity> {
    inner: Arc<ObjectStoreInner<T>>,
}

impl<T: Entity> Clone for ObjectStore<T> {
    fn clone(&self) -> Self {
        ObjectStore {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Entity> ObjectStore<T> {
    pub(crate) fn new(descriptor: StoreDescriptor, backend: Backend) -> Self {
        ObjectStore {
            inner: Arc::new(ObjectStoreInner {
                descriptor,
                backend,
                _phantom: PhantomData,
            }),
        }
    }

    /// The immutable identity of this store.
    pub fn descriptor(&self) -> &StoreDescriptor {
        &self.inner.descriptor
    }

    /// Persists a record and returns the id it is stored under.
    ///
    /// A record saved for the first time gets a fresh envelope: a generated
    /// id and one stamp token for both `created` and `saved`. A record saved
    /// again keeps its id and creation stamp and gets a new saved stamp. The
    /// caller's record is updated in place only after the backend write
    /// succeeds.
    ///
    /// # Errors
    ///
    /// - `TypeMismatch` if the record does not carry this store's type tag
    /// - `IdentifierAssignment` if an existing envelope carries no id
    /// - `EncodingError` if the payload does not serialize to an object
    pub fn save(&self, record: &mut Tracked<T>) -> CubbyResult<String> {
        self.inner.save(record)
    }

    /// Retrieves the record stored under `id`.
    ///
    /// Returns `Ok(None)` when nothing is stored under `id`; absence is not
    /// an error. A present record is decoded, re-tagged with this store's
    /// type tag, and returned with its envelope.
    pub fn retrieve(&self, id: &str) -> CubbyResult<Option<Tracked<T>>> {
        self.inner.retrieve(id)
    }

    /// Removes a record, by id string or by record.
    ///
    /// Returns the removed record with its envelope stripped, or `Ok(None)`
    /// if nothing was stored under the resolved id. The backend is left
    /// unchanged in the absent case.
    ///
    /// # Errors
    ///
    /// - `InvalidKey` if an id string does not have this store's id-key shape
    /// - `TypeMismatch` if a record does not carry this store's type tag
    pub fn remove(&self, target: impl Into<RemoveTarget<T>>) -> CubbyResult<Option<Tracked<T>>> {
        self.inner.remove(target.into())
    }

    /// Lists every record of this store, optionally ordered.
    ///
    /// Each call takes a fresh full scan of the backend's key space and
    /// keeps the keys this store recognizes as its own. Entries that fail to
    /// decode are skipped. With `order_by` set, the listing is sorted by the
    /// named field: an envelope field name compares envelope values, any
    /// other name compares top-level payload fields; ties keep scan order.
    pub fn list(&self, options: Option<&ListOptions>) -> CubbyResult<Vec<Tracked<T>>> {
        self.inner.list(options)
    }

    /// The number of records in this store.
    pub fn count(&self) -> CubbyResult<usize> {
        self.inner.count()
    }

    /// Removes every backend entry belonging to this store.
    ///
    /// Membership is decided by key prefix alone, so entries that would not
    /// decode are swept too. Returns the number of entries removed.
    pub fn clear(&self) -> CubbyResult<usize> {
        self.inner.clear()
    }

    /// Returns one envelope field of a record, or `None` if the record has
    /// never been persisted.
    pub fn info(&self, record: &Tracked<T>, field: EnvelopeField) -> Option<String> {
        record.envelope().map(|envelope| envelope.field(field).to_string())
    }
}

impl<T: Entity> std::fmt::Debug for ObjectStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStore")
            .field("descriptor", &self.inner.descriptor)
            .finish()
    }
}

struct ObjectStoreInner<T> {
    descriptor: StoreDescriptor,
    backend: Backend,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: Entity> ObjectStoreInner<T> {
    fn check_type(&self, type_tag: &str) -> CubbyResult<()> {
        if type_tag != self.descriptor.type_tag() {
            log::error!(
                "Record of type '{}' passed to the '{}' store",
                type_tag,
                self.descriptor.type_tag()
            );
            return Err(CubbyError::new(
                &format!(
                    "Could not handle record of type '{}' via this store (should be type '{}')",
                    type_tag,
                    self.descriptor.type_tag()
                ),
                ErrorKind::TypeMismatch,
            ));
        }
        Ok(())
    }

    fn save(&self, record: &mut Tracked<T>) -> CubbyResult<String> {
        self.check_type(record.type_tag())?;

        let envelope = match record.envelope() {
            None => {
                let token = STAMP_GENERATOR.next_token();
                let id = self.descriptor.codec().id_key(&token);
                Envelope::first_save(id, token)
            }
            Some(existing) => {
                if existing.id().is_empty() {
                    log::error!(
                        "No identifier available while saving into '{}'",
                        self.descriptor.key_prefix()
                    );
                    return Err(CubbyError::new(
                        "Could not obtain an id to save the record under",
                        ErrorKind::IdentifierAssignment,
                    ));
                }
                existing.resaved(STAMP_GENERATOR.next_token())
            }
        };

        let encoded = encode_record(record.payload(), &envelope, record.type_tag())?;
        let id = envelope.id().to_string();
        log::debug!("storing record with id [{}]", id);
        self.backend.set(&id, &encoded)?;

        // The caller's record is only touched once the write went through
        record.set_envelope(Some(envelope));
        Ok(id)
    }

    fn retrieve(&self, id: &str) -> CubbyResult<Option<Tracked<T>>> {
        let Some(raw) = self.backend.get(id)? else {
            return Ok(None);
        };
        log::debug!("retrieving record with id [{}]", id);
        let record = decode_record(&raw, self.descriptor.type_tag())?;
        Ok(Some(record))
    }

    fn remove(&self, target: RemoveTarget<T>) -> CubbyResult<Option<Tracked<T>>> {
        let mut record = match target {
            RemoveTarget::Id(id) => {
                if !self.descriptor.codec().is_id_key(&id) {
                    log::error!(
                        "Remove by id failed for invalid id ({}) in '{}'",
                        id,
                        self.descriptor.key_prefix()
                    );
                    return Err(CubbyError::new(
                        &format!("Remove by id failed for invalid id ({})", id),
                        ErrorKind::InvalidKey,
                    ));
                }
                match self.retrieve(&id)? {
                    Some(record) => record,
                    None => return Ok(None),
                }
            }
            RemoveTarget::Object(record) => {
                self.check_type(record.type_tag())?;
                record
            }
        };

        let id = match record.envelope() {
            Some(envelope) => envelope.id().to_string(),
            None => return Ok(None),
        };
        log::debug!("removing record with id [{}]", id);
        self.backend.remove(&id)?;
        record.set_envelope(None);
        Ok(Some(record))
    }

    fn member_keys(&self) -> CubbyResult<Vec<String>> {
        let mut keys = Vec::new();
        let length = self.backend.size()?;
        for index in 0..length {
            if let Some(key) = self.backend.key_at(index)? {
                if self.descriptor.codec().is_member(&key) {
                    keys.push(key);
                }
            }
        }
        Ok(keys)
    }

    fn list(&self, options: Option<&ListOptions>) -> CubbyResult<Vec<Tracked<T>>> {
        let mut items = Vec::new();
        for key in self.member_keys()? {
            match self.retrieve(&key) {
                Ok(Some(record)) => items.push(record),
                Ok(None) => {}
                Err(err) => {
                    log::warn!("skipping undecodable entry under [{}]: {}", key, err);
                }
            }
        }

        if let Some(order_by) = options.and_then(|options| options.order_by.as_deref()) {
            let direction = options
                .map(|options| options.direction)
                .unwrap_or_default();
            let scope = if EnvelopeField::from_name(order_by).is_some() {
                SortScope::Envelope
            } else {
                SortScope::Payload
            };
            let sorter = Sorter::new(order_by, direction, scope);
            items = sorter.sort(items)?;
        }
        Ok(items)
    }

    fn count(&self) -> CubbyResult<usize> {
        Ok(self.list(None)?.len())
    }

    fn clear(&self) -> CubbyResult<usize> {
        let keys = self.member_keys()?;
        let mut removed = 0;
        for key in &keys {
            self.backend.remove(key)?;
            removed += 1;
        }
        Ok(removed)
    }
}
