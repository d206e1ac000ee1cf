use uuid::Uuid;

use super::context::ValidationContext;
use super::value::FieldValue;

/// The set of objects a reference field may point at.
///
/// Implementations may narrow the set using the context, e.g. to objects owned
/// by the requester. A lookup that needs a requester and finds none should
/// report every id as absent.
#[cfg_attr(test, mockall::automock)]
pub trait RelatedLookup: Send + Sync {
    fn contains(&self, id: Uuid, ctx: &ValidationContext) -> bool;
}

/// Answers whether a value is already used by another stored record
#[cfg_attr(test, mockall::automock)]
pub trait UniqueIndex: Send + Sync {
    /// `exclude` is the id of the record being updated, which never conflicts with itself
    fn is_taken(&self, field: &str, value: &FieldValue, exclude: Option<Uuid>) -> bool;
}
