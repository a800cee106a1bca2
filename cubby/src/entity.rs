//! The trait connecting domain types to stores.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Trait that defines the storage metadata for a domain type.
///
/// # Purpose
/// Provides the type tag a store uses to validate records passed to `save`
/// and `remove`, and to re-tag decoded payloads on `retrieve`. Types must
/// serialize to a JSON object for their fields to live at the top level of
/// the stored record.
///
/// # Characteristics
/// - Must implement `Default` so a store can derive the tag of its type
/// - Must round-trip through serde (`Serialize` + `DeserializeOwned`)
///
/// # Usage
/// ```ignore
/// #[derive(Debug, Default, Serialize, Deserialize)]
/// pub struct Person {
///     name: String,
///     age: u32,
/// }
///
/// impl Entity for Person {
///     fn type_tag(&self) -> String {
///         "Person".to_string()
///     }
/// }
/// ```
pub trait Entity: Default + Serialize + DeserializeOwned {
    /// Returns the type tag identifying this domain type.
    ///
    /// # Behavior
    /// - Usually constant per type (the type name)
    /// - May vary per instance for enum entities whose variants are stored
    ///   separately
    fn type_tag(&self) -> String;
}

/// The type tag a store minted for `T` validates against.
pub(crate) fn type_tag_of<T: Entity>() -> String {
    T::default().type_tag()
}
