use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use crate::validation::lookup::{MockRelatedLookup, MockUniqueIndex};
use crate::validation::{FieldValue, RawInput, RelatedLookup, UniqueIndex};

pub fn input(value: Value) -> RawInput {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

/// A lookup containing exactly `ids`, whoever asks
pub fn lookup_of(ids: Vec<Uuid>) -> Arc<dyn RelatedLookup> {
    let mut lookup = MockRelatedLookup::new();
    lookup.expect_contains().returning(move |id, _| ids.contains(&id));
    Arc::new(lookup)
}

/// A lookup containing `ids` only for the requester `owner`
pub fn owned_lookup(owner: Uuid, ids: Vec<Uuid>) -> Arc<dyn RelatedLookup> {
    let mut lookup = MockRelatedLookup::new();
    lookup.expect_contains().returning(move |id, ctx| {
        ctx.requester().map(|r| r.id) == Some(owner) && ids.contains(&id)
    });
    Arc::new(lookup)
}

pub fn no_conflicts() -> Arc<dyn UniqueIndex> {
    let mut index = MockUniqueIndex::new();
    index.expect_is_taken().returning(|_, _, _| false);
    Arc::new(index)
}

/// An index where `value` is already used in `field` by the record `owner`
pub fn taken_by(field: &'static str, value: FieldValue, owner: Uuid) -> Arc<dyn UniqueIndex> {
    let mut index = MockUniqueIndex::new();
    index
        .expect_is_taken()
        .returning(move |f, v, exclude| f == field && *v == value && exclude != Some(owner));
    Arc::new(index)
}
