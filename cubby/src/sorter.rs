//! Comparator construction for ordered listings.

use crate::common::SortOrder;
use crate::entity::Entity;
use crate::envelope::EnvelopeField;
use crate::errors::CubbyResult;
use crate::record::Tracked;
use serde_json::Value;
use std::cmp::Ordering;

/// Whether a sort field resolves inside the envelope or the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortScope {
    Envelope,
    Payload,
}

/// Orders a listed batch of records by one field.
///
/// # Purpose
/// A `Sorter` is built from a sort specification - field name, direction,
/// and the scope the field resolves in - and applies it to a retrieved
/// list. The direction is applied by swapping the operands before
/// comparison; equal, absent, and cross-typed values compare as ties, and
/// the underlying sort is stable, so tied records keep their scan order.
pub struct Sorter {
    order_by: String,
    descending: bool,
    scope: SortScope,
}

impl Sorter {
    /// Builds a sorter from a sort specification.
    pub fn new(order_by: &str, direction: SortOrder, scope: SortScope) -> Self {
        Sorter {
            order_by: order_by.to_string(),
            descending: direction == SortOrder::Descending,
            scope,
        }
    }

    /// Sorts a batch of records, returning them in order.
    pub fn sort<T: Entity>(&self, items: Vec<Tracked<T>>) -> CubbyResult<Vec<Tracked<T>>> {
        let mut keyed = Vec::with_capacity(items.len());
        for item in items {
            let key = self.sort_key(&item)?;
            keyed.push((key, item));
        }
        // Vec::sort_by is stable: ties retain scan order
        keyed.sort_by(|(a, _), (b, _)| self.compare(a, b));
        Ok(keyed.into_iter().map(|(_, item)| item).collect())
    }

    fn sort_key<T: Entity>(&self, item: &Tracked<T>) -> CubbyResult<Option<Value>> {
        match self.scope {
            SortScope::Envelope => Ok(item.envelope().and_then(|envelope| {
                EnvelopeField::from_name(&self.order_by)
                    .map(|field| Value::String(envelope.field(field).to_string()))
            })),
            SortScope::Payload => {
                let value = serde_json::to_value(item.payload())?;
                match value {
                    Value::Object(mut map) => Ok(map.remove(&self.order_by)),
                    _ => Ok(None),
                }
            }
        }
    }

    fn compare(&self, a: &Option<Value>, b: &Option<Value>) -> Ordering {
        let (lhs, rhs) = if self.descending { (b, a) } else { (a, b) };
        if greater_than(lhs, rhs) {
            Ordering::Greater
        } else if greater_than(rhs, lhs) {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }
}

fn greater_than(a: &Option<Value>, b: &Option<Value>) -> bool {
    match (a, b) {
        (Some(lhs), Some(rhs)) => value_greater(lhs, rhs),
        _ => false,
    }
}

// Scalar comparison only; incomparable operands are never greater, so they
// fall through as ties.
fn value_greater(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(lhs), Value::Number(rhs)) => {
            lhs.as_f64().unwrap_or(f64::NAN) > rhs.as_f64().unwrap_or(f64::NAN)
        }
        (Value::String(lhs), Value::String(rhs)) => lhs > rhs,
        (Value::Bool(lhs), Value::Bool(rhs)) => *lhs && !*rhs,
        _ => false,
    }
}
