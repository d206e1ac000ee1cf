use models::prelude::*;
use services::validation::{FieldValue, ValidationContext};
use uuid::Uuid;

use crate::table::{Record, Table};

pub type BlogRepository = Table<Blog>;
pub type AuthorRepository = Table<Author>;
pub type TagRepository = Table<Tag>;
pub type CoverImageRepository = Table<CoverImage>;
pub type UserProfileRepository = Table<UserProfile>;
pub type UserRepository = Table<Requester>;

impl Record for Blog {
    const KIND: &'static str = "Blog";
    const UNIQUE_FIELDS: &'static [&'static str] = &["cover_image"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn unique_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "cover_image" => Some(FieldValue::Reference(self.cover_image)),
            _ => None,
        }
    }
}

impl Record for Author {
    const KIND: &'static str = "Author";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for Tag {
    const KIND: &'static str = "Tag";

    fn id(&self) -> Uuid {
        self.id
    }

    /// Tags can only be attached by their owner
    fn visible_to(&self, ctx: &ValidationContext) -> bool {
        ctx.requester().is_some_and(|requester| requester.id == self.owner)
    }
}

impl Record for CoverImage {
    const KIND: &'static str = "CoverImage";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for UserProfile {
    const KIND: &'static str = "UserProfile";
    const UNIQUE_FIELDS: &'static [&'static str] = &["user", "phone_no"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn unique_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "user" => Some(FieldValue::Reference(self.user)),
            "phone_no" => Some(FieldValue::Text(self.phone_no.clone())),
            _ => None,
        }
    }
}

impl Record for Requester {
    const KIND: &'static str = "User";

    fn id(&self) -> Uuid {
        self.id
    }
}
