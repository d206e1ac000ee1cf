use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use services::validation::{FieldValue, RelatedLookup, UniqueIndex, ValidationContext};
use uuid::Uuid;

use crate::errors::RepositoryError;

/// A stored model addressable by id
pub trait Record: Clone + Send + Sync + 'static {
    const KIND: &'static str;

    /// Fields no two records of this kind may share a value in
    const UNIQUE_FIELDS: &'static [&'static str] = &[];

    fn id(&self) -> Uuid;

    /// Whether a reference field may point at this record for the given request
    fn visible_to(&self, _ctx: &ValidationContext) -> bool {
        true
    }

    /// Value of a uniquely-indexed field, as a validator would see it
    fn unique_value(&self, _field: &str) -> Option<FieldValue> {
        None
    }
}

type IndexKey = (&'static str, String);

fn index_key(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(text) => text.clone(),
        FieldValue::Reference(id) => id.to_string(),
        other => format!("{:?}", other),
    }
}

fn unique_keys<T: Record>(record: &T) -> Vec<IndexKey> {
    T::UNIQUE_FIELDS
        .iter()
        .filter_map(|field| record.unique_value(field).map(|value| (*field, index_key(&value))))
        .collect()
}

/// In-memory table of records keyed by id.
///
/// Values of `Record::UNIQUE_FIELDS` are claimed in a secondary index before a
/// row is written, so two writers racing for the same value cannot both land.
pub struct Table<T: Record> {
    rows: DashMap<Uuid, T>,
    unique: DashMap<IndexKey, Uuid>,
}

impl<T: Record> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Table<T> {
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
            unique: DashMap::new(),
        }
    }

    /// Claim `keys` for `id`. Keys `id` already holds are left as they are;
    /// on conflict everything claimed by this call is released again.
    fn claim(&self, id: Uuid, keys: &[IndexKey]) -> Result<Vec<IndexKey>, RepositoryError> {
        let mut claimed = Vec::new();
        for key in keys {
            // the entry guard must be gone before `release` touches the index
            let taken = match self.unique.entry(key.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(id);
                    claimed.push(key.clone());
                    false
                }
                Entry::Occupied(slot) => *slot.get() != id,
            };
            if taken {
                self.release(id, &claimed);
                tracing::info!(kind = T::KIND, %id, field = key.0, "unique value already taken");
                return Err(RepositoryError::Conflict { kind: T::KIND, field: key.0 });
            }
        }
        Ok(claimed)
    }

    fn release(&self, id: Uuid, keys: &[IndexKey]) {
        for key in keys {
            self.unique.remove_if(key, |_, owner| *owner == id);
        }
    }

    pub fn insert(&self, record: T) -> Result<T, RepositoryError> {
        let id = record.id();
        let claimed = self.claim(id, &unique_keys(&record))?;
        let stored = match self.rows.entry(id) {
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                true
            }
            Entry::Occupied(_) => false,
        };
        if !stored {
            self.release(id, &claimed);
            return Err(RepositoryError::Duplicate { kind: T::KIND, id });
        }
        tracing::info!(kind = T::KIND, %id, "record inserted");
        Ok(record)
    }

    /// Overwrite an existing record
    pub fn replace(&self, record: T) -> Result<T, RepositoryError> {
        let id = record.id();
        let mut row = self
            .rows
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound { kind: T::KIND, id })?;

        let keys = unique_keys(&record);
        self.claim(id, &keys)?;
        let stale: Vec<IndexKey> = unique_keys(&*row)
            .into_iter()
            .filter(|key| !keys.contains(key))
            .collect();
        *row = record.clone();
        drop(row);

        self.release(id, &stale);
        tracing::info!(kind = T::KIND, %id, "record updated");
        Ok(record)
    }

    pub fn delete(&self, id: Uuid) -> Result<Uuid, RepositoryError> {
        match self.rows.remove(&id) {
            Some((_, record)) => {
                self.release(id, &unique_keys(&record));
                tracing::info!(kind = T::KIND, %id, "record deleted");
                Ok(id)
            }
            None => Err(RepositoryError::NotFound { kind: T::KIND, id }),
        }
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<T> {
        self.rows.get(&id).map(|row| row.value().clone())
    }

    pub fn get(&self, id: Uuid) -> Result<T, RepositoryError> {
        self.find_by_id(id)
            .ok_or(RepositoryError::NotFound { kind: T::KIND, id })
    }

    pub fn all(&self) -> Vec<T> {
        self.rows.iter().map(|row| row.value().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T: Record> RelatedLookup for Table<T> {
    fn contains(&self, id: Uuid, ctx: &ValidationContext) -> bool {
        self.rows
            .get(&id)
            .map(|row| row.visible_to(ctx))
            .unwrap_or(false)
    }
}

impl<T: Record> UniqueIndex for Table<T> {
    fn is_taken(&self, field: &str, value: &FieldValue, exclude: Option<Uuid>) -> bool {
        let Some(field) = T::UNIQUE_FIELDS.iter().find(|indexed| **indexed == field) else {
            return false;
        };
        self.unique
            .get(&(*field, index_key(value)))
            .is_some_and(|owner| Some(*owner.value()) != exclude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::*;
    use crate::test_helpers::*;
    use models::prelude::{Author, Requester, UserProfile};

    #[test]
    fn test_insert_and_get() {
        let table = AuthorRepository::new();
        let author = table.insert(sample_author("Ada")).unwrap();

        assert_eq!(table.get(author.id).unwrap(), author);
        assert!(matches!(
            table.insert(author.clone()),
            Err(RepositoryError::Duplicate { kind: "Author", .. })
        ));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_replace_and_delete_missing() {
        let table = AuthorRepository::new();
        let author = sample_author("Ada");

        assert!(matches!(table.replace(author.clone()), Err(RepositoryError::NotFound { .. })));
        table.insert(author.clone()).unwrap();

        let renamed = Author {
            name: "Grace".to_string(),
            ..author.clone()
        };
        table.replace(renamed).unwrap();
        assert_eq!(table.get(author.id).unwrap().name, "Grace");

        table.delete(author.id).unwrap();
        assert!(table.is_empty());
        assert!(table.delete(author.id).is_err());
    }

    #[test]
    fn test_tags_only_visible_to_owner() {
        let table = TagRepository::new();
        let owner = Requester::new(Uuid::new_v4(), "owner");
        let tag = table.insert(sample_tag("rust", owner.id)).unwrap();

        let as_owner = ValidationContext::new().with_requester(owner);
        let as_other = ValidationContext::new().with_requester(Requester::new(Uuid::new_v4(), "other"));

        assert!(table.contains(tag.id, &as_owner));
        assert!(!table.contains(tag.id, &as_other));
        assert!(!table.contains(tag.id, &ValidationContext::new()));
        assert!(!table.contains(Uuid::new_v4(), &as_owner));
    }

    #[test]
    fn test_unique_index_excludes_instance() {
        let table = UserProfileRepository::new();
        let profile = table.insert(sample_profile(Uuid::new_v4(), "555-0100")).unwrap();
        let phone = FieldValue::Text("555-0100".to_string());

        assert!(table.is_taken("phone_no", &phone, None));
        assert!(!table.is_taken("phone_no", &phone, Some(profile.id)));
        assert!(!table.is_taken("city", &FieldValue::Text("Lisbon".to_string()), None));
    }

    #[test]
    fn test_insert_rejects_taken_unique_value() {
        let table = UserProfileRepository::new();
        let first = table.insert(sample_profile(Uuid::new_v4(), "555-0100")).unwrap();

        let clashing = sample_profile(Uuid::new_v4(), "555-0100");
        assert!(matches!(
            table.insert(clashing.clone()),
            Err(RepositoryError::Conflict { kind: "UserProfile", field: "phone_no" })
        ));
        assert_eq!(table.len(), 1);

        // the failed insert released the `user` key it had claimed
        table
            .insert(UserProfile {
                phone_no: "555-0199".to_string(),
                ..clashing
            })
            .unwrap();

        table.delete(first.id).unwrap();
        table.insert(sample_profile(Uuid::new_v4(), "555-0100")).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_duplicate_id_keeps_existing_unique_keys() {
        let table = UserProfileRepository::new();
        let profile = table.insert(sample_profile(Uuid::new_v4(), "555-0100")).unwrap();

        assert!(matches!(table.insert(profile.clone()), Err(RepositoryError::Duplicate { .. })));
        assert!(table.is_taken("phone_no", &FieldValue::Text("555-0100".to_string()), None));
    }

    #[test]
    fn test_replace_moves_unique_keys() {
        let table = UserProfileRepository::new();
        let profile = table.insert(sample_profile(Uuid::new_v4(), "555-0100")).unwrap();
        let other = table.insert(sample_profile(Uuid::new_v4(), "555-0200")).unwrap();

        table
            .replace(UserProfile {
                phone_no: "555-0300".to_string(),
                ..profile.clone()
            })
            .unwrap();
        assert!(!table.is_taken("phone_no", &FieldValue::Text("555-0100".to_string()), None));
        assert!(table.is_taken("phone_no", &FieldValue::Text("555-0300".to_string()), None));

        let clash = table.replace(UserProfile {
            phone_no: "555-0300".to_string(),
            ..other.clone()
        });
        assert!(matches!(clash, Err(RepositoryError::Conflict { field: "phone_no", .. })));
        assert_eq!(table.get(other.id).unwrap().phone_no, "555-0200");
    }

    #[test]
    fn test_concurrent_inserts_claim_unique_value_once() {
        let table = UserProfileRepository::new();
        let stored: usize = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| table.insert(sample_profile(Uuid::new_v4(), "555-0100")).is_ok()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap() as usize).sum()
        });

        assert_eq!(stored, 1);
        assert_eq!(table.len(), 1);
    }
}
