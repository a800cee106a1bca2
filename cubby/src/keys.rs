//! Key prefix derivation and membership parsing.
//!
//! Every key a store writes is composed from three namespacing components,
//! each followed by a fixed delimiter:
//!
//! ```text
//! _cubby_<namespace>_<prefix>-id-<token>
//! \____factory prefix____/
//! \________key prefix________/
//! ```
//!
//! The trailing delimiter after every component guarantees that no store's
//! prefix can be a strict textual prefix of a sibling's, so membership checks
//! during a full scan never produce false positives.

use crate::common::{COMPONENT_SEPARATOR, ID_TAG, PREFIX_SEPARATOR};
use crate::errors::{CubbyError, CubbyResult, ErrorKind};

/// Derives and parses the namespaced keys of one store.
///
/// A `KeyCodec` is a pure value: the same `(factory name, namespace, store
/// prefix)` triple always reproduces the same prefixes, and two stores with
/// different triples never share one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCodec {
    key_prefix: String,
    id_prefix: String,
}

impl KeyCodec {
    /// Composes the codec for a `(factory name, namespace, store prefix)` triple.
    pub fn new(factory_name: &str, namespace: &str, store_prefix: &str) -> Self {
        let key_prefix = format!(
            "{}{}{}",
            Self::factory_prefix(factory_name, namespace),
            store_prefix,
            PREFIX_SEPARATOR
        );
        let id_prefix = format!("{}{}", key_prefix, ID_TAG);
        KeyCodec {
            key_prefix,
            id_prefix,
        }
    }

    /// Composes the factory-level prefix shared by every store of one
    /// factory. Useful for bulk cleanup by an external collaborator.
    pub fn factory_prefix(factory_name: &str, namespace: &str) -> String {
        format!(
            "{0}{1}{0}{2}{0}",
            COMPONENT_SEPARATOR,
            factory_name.to_lowercase(),
            namespace.to_lowercase()
        )
    }

    /// The full key prefix of this store. Every key the store persists
    /// begins with it.
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// Builds the full object key for a generated stamp token.
    pub fn id_key(&self, token: &str) -> String {
        format!("{}{}{}", self.id_prefix, PREFIX_SEPARATOR, token)
    }

    /// Reports whether a backend key belongs to this store.
    pub fn is_member(&self, key: &str) -> bool {
        key.starts_with(&self.id_prefix)
    }

    /// Reports whether a string has the shape of one of this store's id keys.
    ///
    /// Stricter than [`is_member`](Self::is_member): the remainder after the
    /// id prefix must begin with the token delimiter.
    pub fn is_id_key(&self, key: &str) -> bool {
        key.strip_prefix(self.id_prefix.as_str())
            .is_some_and(|rest| rest.starts_with(PREFIX_SEPARATOR))
    }
}

/// Validates a caller-chosen namespacing component.
///
/// Components must be non-empty and free of the key delimiters and
/// whitespace; anything else would let one store's prefix textually contain
/// a sibling's.
pub(crate) fn validate_component(value: &str, what: &str) -> CubbyResult<()> {
    if value.is_empty()
        || value.contains(COMPONENT_SEPARATOR)
        || value.contains(PREFIX_SEPARATOR)
        || value.contains(char::is_whitespace)
    {
        log::error!("Invalid {} '{}'", what, value);
        return Err(CubbyError::new(
            &format!(
                "Invalid {} '{}': must be non-empty and must not contain '{}', '{}' or whitespace",
                what, value, COMPONENT_SEPARATOR, PREFIX_SEPARATOR
            ),
            ErrorKind::InvalidOperation,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_prefix_layout() {
        assert_eq!(KeyCodec::factory_prefix("cubby", "myapp"), "_cubby_myapp_");
    }

    #[test]
    fn test_factory_prefix_lowercases_components() {
        assert_eq!(KeyCodec::factory_prefix("Cubby", "MyApp"), "_cubby_myapp_");
    }

    #[test]
    fn test_key_prefix_layout() {
        let codec = KeyCodec::new("cubby", "myapp", "person");
        assert_eq!(codec.key_prefix(), "_cubby_myapp_person-");
    }

    #[test]
    fn test_codec_is_deterministic() {
        let first = KeyCodec::new("cubby", "myapp", "person");
        let second = KeyCodec::new("cubby", "myapp", "person");
        assert_eq!(first, second);
    }

    #[test]
    fn test_id_key_layout() {
        let codec = KeyCodec::new("cubby", "myapp", "person");
        assert_eq!(codec.id_key("18f2ab"), "_cubby_myapp_person-id-18f2ab");
    }

    #[test]
    fn test_is_member_accepts_own_keys() {
        let codec = KeyCodec::new("cubby", "myapp", "person");
        let key = codec.id_key("18f2ab");
        assert!(codec.is_member(&key));
    }

    #[test]
    fn test_is_member_rejects_sibling_store_keys() {
        let person = KeyCodec::new("cubby", "myapp", "person");
        let personx = KeyCodec::new("cubby", "myapp", "personx");
        let key = personx.id_key("18f2ab");
        assert!(!person.is_member(&key));
    }

    #[test]
    fn test_is_member_rejects_other_namespace_keys() {
        let app_a = KeyCodec::new("cubby", "appa", "person");
        let app_b = KeyCodec::new("cubby", "appb", "person");
        let key = app_b.id_key("18f2ab");
        assert!(!app_a.is_member(&key));
    }

    #[test]
    fn test_is_id_key_accepts_well_formed_ids() {
        let codec = KeyCodec::new("cubby", "myapp", "person");
        assert!(codec.is_id_key(&codec.id_key("18f2ab")));
    }

    #[test]
    fn test_is_id_key_rejects_missing_token_delimiter() {
        let codec = KeyCodec::new("cubby", "myapp", "person");
        assert!(!codec.is_id_key("_cubby_myapp_person-id18f2ab"));
        assert!(!codec.is_id_key("_cubby_myapp_person-id"));
    }

    #[test]
    fn test_is_id_key_rejects_foreign_keys() {
        let codec = KeyCodec::new("cubby", "myapp", "person");
        assert!(!codec.is_id_key("person-id-18f2ab"));
        assert!(!codec.is_id_key(""));
    }

    #[test]
    fn test_validate_component_accepts_plain_names() {
        assert!(validate_component("person", "store prefix").is_ok());
        assert!(validate_component("myapp2", "namespace").is_ok());
    }

    #[test]
    fn test_validate_component_rejects_empty() {
        let result = validate_component("", "namespace");
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_validate_component_rejects_delimiters() {
        assert!(validate_component("my_app", "namespace").is_err());
        assert!(validate_component("person-id", "store prefix").is_err());
        assert!(validate_component("my app", "namespace").is_err());
    }
}
