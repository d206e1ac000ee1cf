use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(SimpleObject)]
pub struct CoverImage {
    pub id: Uuid,
    pub image_link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<models::cover_images::CoverImage> for CoverImage {
    fn from(c: models::cover_images::CoverImage) -> Self {
        CoverImage {
            id: c.id,
            image_link: c.image_link,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
