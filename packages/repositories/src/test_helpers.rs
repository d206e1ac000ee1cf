use chrono::Utc;
use models::prelude::*;
use uuid::Uuid;

pub fn sample_author(name: &str) -> Author {
    Author {
        id: Uuid::new_v4(),
        name: name.to_string(),
        bio: String::new(),
    }
}

pub fn sample_tag(name: &str, owner: Uuid) -> Tag {
    Tag {
        id: Uuid::new_v4(),
        name: name.to_string(),
        owner,
    }
}

pub fn sample_cover_image() -> CoverImage {
    let now = Utc::now();
    CoverImage {
        id: Uuid::new_v4(),
        image_link: "https://example.com/cover.png".to_string(),
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_blog(author: Uuid, title: &str, cover_image: Uuid) -> Blog {
    let now = Utc::now();
    Blog {
        id: Uuid::new_v4(),
        title: title.to_string(),
        content: format!("{} body", title),
        author,
        tags: Vec::new(),
        cover_image,
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_profile(user: Uuid, phone_no: &str) -> UserProfile {
    UserProfile {
        id: Uuid::new_v4(),
        user,
        phone_no: phone_no.to_string(),
        city: "Lisbon".to_string(),
    }
}
