use async_graphql::SimpleObject;
use uuid::Uuid;

#[derive(SimpleObject)]
pub struct UserProfile {
    pub id: Uuid,
    pub user: Uuid,
    pub phone_no: String,
    pub city: String,
}

impl From<models::user_profiles::UserProfile> for UserProfile {
    fn from(p: models::user_profiles::UserProfile) -> Self {
        UserProfile {
            id: p.id,
            user: p.user,
            phone_no: p.phone_no,
            city: p.city,
        }
    }
}
