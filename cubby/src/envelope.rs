//! Identity and timestamp metadata for stored records.

use crate::common::{token_to_datetime, ENVELOPE_CREATED, ENVELOPE_ID, ENVELOPE_SAVED};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The metadata record attached to every stored object.
///
/// # Purpose
/// An `Envelope` carries the identity and lifecycle stamps of one persisted
/// record: the id it is stored under, the stamp token issued at first save,
/// and the stamp token of the most recent save.
///
/// # Invariants
/// - `id` is assigned exactly once, on first save, and never changes
/// - `created` never exceeds `saved` in stamp-token ordering
/// - a record without an envelope has never been persisted
///
/// The calendar datetimes behind the stamps are derived on demand via
/// [`created_at`](Self::created_at) and [`saved_at`](Self::saved_at); they
/// are never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    id: String,
    created: String,
    saved: String,
}

impl Envelope {
    /// Builds the envelope for a record's first save: both stamps carry the
    /// same token.
    pub(crate) fn first_save(id: String, token: String) -> Self {
        Envelope {
            id,
            created: token.clone(),
            saved: token,
        }
    }

    /// Builds the refreshed envelope for a subsequent save: identity and
    /// creation stamp are preserved, the saved stamp takes the new token.
    pub(crate) fn resaved(&self, token: String) -> Self {
        Envelope {
            id: self.id.clone(),
            created: self.created.clone(),
            saved: token,
        }
    }

    /// The id this record is stored under.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The stamp token issued at first save.
    pub fn created(&self) -> &str {
        &self.created
    }

    /// The stamp token of the most recent save.
    pub fn saved(&self) -> &str {
        &self.saved
    }

    /// The calendar datetime the creation stamp encodes, if it parses.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        token_to_datetime(&self.created)
    }

    /// The calendar datetime the last-saved stamp encodes, if it parses.
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        token_to_datetime(&self.saved)
    }

    /// Returns the raw value of one envelope field.
    pub fn field(&self, field: EnvelopeField) -> &str {
        match field {
            EnvelopeField::Id => &self.id,
            EnvelopeField::Created => &self.created,
            EnvelopeField::Saved => &self.saved,
        }
    }
}

/// Names the three fields of an [`Envelope`].
///
/// Used by the `info` accessor and by list ordering to decide whether a sort
/// field lives in the envelope or in the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeField {
    Id,
    Created,
    Saved,
}

impl EnvelopeField {
    /// Resolves a field name to an envelope field, if it names one.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            ENVELOPE_ID => Some(EnvelopeField::Id),
            ENVELOPE_CREATED => Some(EnvelopeField::Created),
            ENVELOPE_SAVED => Some(EnvelopeField::Saved),
            _ => None,
        }
    }

    /// The field name as it appears in sort specifications.
    pub fn name(&self) -> &'static str {
        match self {
            EnvelopeField::Id => ENVELOPE_ID,
            EnvelopeField::Created => ENVELOPE_CREATED,
            EnvelopeField::Saved => ENVELOPE_SAVED,
        }
    }
}
