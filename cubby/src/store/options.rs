use crate::backend::Partition;
use crate::common::SortOrder;

/// Options recognized when minting a store.
///
/// # Fields
/// - `prefix`: the store's key-prefix component; defaults to the type tag,
///   lowercased
/// - `partition`: which backend partition the store targets; defaults to
///   `Durable`
///
/// # Usage
/// ```text
/// let store = factory.create_store::<Person>(
///     StoreOptions::new().prefix("people").partition(Partition::Session),
/// )?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct StoreOptions {
    pub(crate) prefix: Option<String>,
    pub(crate) partition: Partition,
}

impl StoreOptions {
    pub fn new() -> Self {
        StoreOptions::default()
    }

    /// Overrides the store's key-prefix component.
    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    /// Selects the backend partition the store targets.
    pub fn partition(mut self, partition: Partition) -> Self {
        self.partition = partition;
        self
    }
}

/// Options recognized when listing a store.
///
/// Without `order_by` the listing carries scan order. With it, records are
/// ordered on the named field: an envelope field name (`id`, `created`,
/// `saved`) compares envelope values, anything else compares top-level
/// payload fields.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub(crate) order_by: Option<String>,
    pub(crate) direction: SortOrder,
}

impl ListOptions {
    pub fn new() -> Self {
        ListOptions::default()
    }

    /// Names the field to order the listing by.
    pub fn order_by(mut self, field: &str) -> Self {
        self.order_by = Some(field.to_string());
        self
    }

    /// Sets the ordering direction.
    pub fn direction(mut self, direction: SortOrder) -> Self {
        self.direction = direction;
        self
    }
}

/// Convenience constructor for an ordered listing.
///
/// ```text
/// let records = store.list(Some(&order_by("age", SortOrder::Descending)))?;
/// ```
pub fn order_by(field: &str, direction: SortOrder) -> ListOptions {
    ListOptions::new().order_by(field).direction(direction)
}
