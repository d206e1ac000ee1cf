use chrono::Utc;
use models::prelude::*;
use repositories::Registry;
use serde_json::{json, Value};
use uuid::Uuid;

const WRITER_ID: Uuid = Uuid::from_u128(0x1);
const EDITOR_ID: Uuid = Uuid::from_u128(0x2);
const VIEWER_ID: Uuid = Uuid::from_u128(0x3);

/// Can write blogs but not retitle them
pub fn writer() -> Requester {
    Requester::new(WRITER_ID, "writer")
}

pub fn editor() -> Requester {
    Requester::new(EDITOR_ID, "editor").with_permission("blog.update_title")
}

pub fn viewer() -> Requester {
    Requester::new(VIEWER_ID, "viewer").with_group("can_view_blog")
}

pub struct SeededRegistry {
    pub registry: Registry,
    pub author: Author,
    pub cover_image: CoverImage,
}

impl SeededRegistry {
    pub fn blog_input(&self, title: &str, content: &str) -> Value {
        json!({
            "title": title,
            "content": content,
            "author": self.author.id,
            "cover_image": self.cover_image.id,
        })
    }
}

pub fn seeded_registry() -> SeededRegistry {
    let registry = Registry::new();
    for user in [writer(), editor(), viewer()] {
        registry.users.insert(user).unwrap();
    }
    let author = registry
        .authors
        .insert(Author {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            bio: String::new(),
        })
        .unwrap();
    let cover_image = registry.cover_images.insert(new_cover_image()).unwrap();

    SeededRegistry {
        registry,
        author,
        cover_image,
    }
}

fn new_cover_image() -> CoverImage {
    let now = Utc::now();
    CoverImage {
        id: Uuid::new_v4(),
        image_link: "https://example.com/cover.png".to_string(),
        created_at: now,
        updated_at: now,
    }
}

/// Store a blog directly, with a cover image of its own
pub fn insert_blog(registry: &Registry, fixture: &SeededRegistry, title: &str, content: &str) -> Blog {
    let cover_image = registry.cover_images.insert(new_cover_image()).unwrap();
    let now = Utc::now();
    registry
        .blogs
        .insert(Blog {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content: content.to_string(),
            author: fixture.author.id,
            tags: Vec::new(),
            cover_image: cover_image.id,
            created_at: now,
            updated_at: now,
        })
        .unwrap()
}
