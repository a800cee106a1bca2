//! The tagged record wrapper carrying a payload and its envelope.

use crate::entity::Entity;
use crate::envelope::Envelope;
use crate::common::{META_FIELD, TYPE_FIELD};
use crate::errors::{CubbyError, CubbyResult, ErrorKind};
use serde_json::Value;

/// A domain object together with its storage metadata.
///
/// # Purpose
/// `Tracked<T>` is what a store accepts and returns: the domain payload plus
/// the type tag it was constructed with and, once persisted, its
/// [`Envelope`]. A record with no envelope has never been saved.
///
/// Retrieval decodes the stored JSON into a plain structural record, splits
/// the metadata off, and rebuilds the payload through its normal serde
/// deserializer, so a retrieved `Tracked<T>` is indistinguishable from a
/// freshly constructed one.
///
/// # Usage
/// ```ignore
/// let mut record = Tracked::new(Person { name: "Ola".to_string(), age: 28 });
/// assert!(!record.is_persisted());
/// let id = store.save(&mut record)?;
/// assert_eq!(record.envelope().map(|e| e.id()), Some(id.as_str()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tracked<T> {
    type_tag: String,
    envelope: Option<Envelope>,
    payload: T,
}

impl<T: Entity> Tracked<T> {
    /// Wraps a payload in a fresh, never-persisted record.
    pub fn new(payload: T) -> Self {
        Tracked {
            type_tag: payload.type_tag(),
            envelope: None,
            payload,
        }
    }

    pub(crate) fn from_parts(type_tag: String, envelope: Option<Envelope>, payload: T) -> Self {
        Tracked {
            type_tag,
            envelope,
            payload,
        }
    }

    /// The type tag this record carries.
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// The storage metadata, if the record has been persisted.
    pub fn envelope(&self) -> Option<&Envelope> {
        self.envelope.as_ref()
    }

    /// Whether the record has been persisted.
    pub fn is_persisted(&self) -> bool {
        self.envelope.is_some()
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut T {
        &mut self.payload
    }

    /// Unwraps the record into its payload, discarding the metadata.
    pub fn into_payload(self) -> T {
        self.payload
    }

    pub(crate) fn set_envelope(&mut self, envelope: Option<Envelope>) {
        self.envelope = envelope;
    }
}

/// Encodes a payload and its envelope into the stored JSON text.
///
/// The record is the payload's own top-level fields plus the reserved
/// `_meta` and `_type` fields inlined alongside them.
pub(crate) fn encode_record<T: Entity>(
    payload: &T,
    envelope: &Envelope,
    type_tag: &str,
) -> CubbyResult<String> {
    let value = serde_json::to_value(payload)?;
    let Value::Object(mut map) = value else {
        return Err(CubbyError::new(
            &format!(
                "Could not encode record of type '{}': payload must serialize to an object",
                type_tag
            ),
            ErrorKind::EncodingError,
        ));
    };
    map.insert(META_FIELD.to_string(), serde_json::to_value(envelope)?);
    map.insert(TYPE_FIELD.to_string(), Value::String(type_tag.to_string()));
    let encoded = serde_json::to_string(&Value::Object(map))?;
    Ok(encoded)
}

/// Decodes stored JSON text back into a tracked record.
///
/// The decoded payload is re-tagged with the store's own type tag, so
/// records written by an older version under a different tag still pass
/// downstream type checks.
pub(crate) fn decode_record<T: Entity>(raw: &str, type_tag: &str) -> CubbyResult<Tracked<T>> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Object(mut map) = value else {
        return Err(CubbyError::new(
            "Could not decode record: stored value is not an object",
            ErrorKind::EncodingError,
        ));
    };
    let meta = map.remove(META_FIELD).ok_or_else(|| {
        CubbyError::new(
            "Could not decode record: stored value has no envelope",
            ErrorKind::EncodingError,
        )
    })?;
    let envelope: Envelope = serde_json::from_value(meta)?;
    map.remove(TYPE_FIELD);
    let payload: T = serde_json::from_value(Value::Object(map))?;
    Ok(Tracked::from_parts(
        type_tag.to_string(),
        Some(envelope),
        payload,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    struct Person {
        name: String,
        age: u32,
    }

    impl Entity for Person {
        fn type_tag(&self) -> String {
            "Person".to_string()
        }
    }

    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    struct Plain(u32);

    impl Entity for Plain {
        fn type_tag(&self) -> String {
            "Plain".to_string()
        }
    }

    fn person() -> Person {
        Person {
            name: "Ola".to_string(),
            age: 28,
        }
    }

    #[test]
    fn test_new_record_is_not_persisted() {
        let record = Tracked::new(person());
        assert!(!record.is_persisted());
        assert!(record.envelope().is_none());
        assert_eq!(record.type_tag(), "Person");
    }

    #[test]
    fn test_payload_access() {
        let mut record = Tracked::new(person());
        assert_eq!(record.payload().name, "Ola");
        record.payload_mut().age = 29;
        assert_eq!(record.into_payload().age, 29);
    }

    #[test]
    fn test_encode_inlines_envelope_and_tag() {
        let envelope = Envelope::first_save("k-id-1a".to_string(), "1a".to_string());
        let encoded = encode_record(&person(), &envelope, "Person").unwrap();
        let value: Value = serde_json::from_str(&encoded).unwrap();
        let map = value.as_object().unwrap();

        assert_eq!(map.get("name"), Some(&Value::String("Ola".to_string())));
        assert_eq!(map.get("_type"), Some(&Value::String("Person".to_string())));
        let meta = map.get("_meta").unwrap().as_object().unwrap();
        assert_eq!(meta.get("id"), Some(&Value::String("k-id-1a".to_string())));
    }

    #[test]
    fn test_encode_rejects_non_object_payload() {
        let envelope = Envelope::first_save("k-id-1a".to_string(), "1a".to_string());
        let result = encode_record(&Plain(7), &envelope, "Plain");
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::EncodingError);
    }

    #[test]
    fn test_decode_round_trip() {
        let envelope = Envelope::first_save("k-id-1a".to_string(), "1a".to_string());
        let encoded = encode_record(&person(), &envelope, "Person").unwrap();
        let decoded: Tracked<Person> = decode_record(&encoded, "Person").unwrap();

        assert_eq!(decoded.payload(), &person());
        assert_eq!(decoded.envelope(), Some(&envelope));
        assert_eq!(decoded.type_tag(), "Person");
    }

    #[test]
    fn test_decode_retags_foreign_records() {
        let envelope = Envelope::first_save("k-id-1a".to_string(), "1a".to_string());
        let encoded = encode_record(&person(), &envelope, "LegacyPerson").unwrap();
        let decoded: Tracked<Person> = decode_record(&encoded, "Person").unwrap();
        assert_eq!(decoded.type_tag(), "Person");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result: CubbyResult<Tracked<Person>> = decode_record("not json", "Person");
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::EncodingError);
    }

    #[test]
    fn test_decode_rejects_record_without_envelope() {
        let result: CubbyResult<Tracked<Person>> =
            decode_record("{\"name\":\"Ola\",\"age\":28}", "Person");
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::EncodingError);
    }

    #[test]
    fn test_decode_rejects_non_object() {
        let result: CubbyResult<Tracked<Person>> = decode_record("[1,2,3]", "Person");
        assert!(result.is_err());
    }
}
