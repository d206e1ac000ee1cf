use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use services::serializers::blog::word_count;
use uuid::Uuid;

#[derive(SimpleObject)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: Uuid,
    pub tags: Vec<Uuid>,
    pub cover_image: Uuid,
    pub word_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<models::blogs::Blog> for Blog {
    fn from(b: models::blogs::Blog) -> Self {
        Blog {
            word_count: word_count(&b.content) as u64,
            id: b.id,
            title: b.title,
            content: b.content,
            author: b.author,
            tags: b.tags,
            cover_image: b.cover_image,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}
