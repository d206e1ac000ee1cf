use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tag belongs to the user who created it; only its owner may attach it to a blog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub owner: Uuid,
}
