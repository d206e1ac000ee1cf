use services::serializers::{BlogDependencies, UserProfileDependencies};
use std::sync::Arc;

use crate::errors::RepositoryError;
use crate::fixtures::Fixtures;
use crate::records::*;
use crate::table::{Record, Table};

/// Every table the serializers resolve against, shared across requests
#[derive(Clone, Default)]
pub struct Registry {
    pub authors: Arc<AuthorRepository>,
    pub tags: Arc<TagRepository>,
    pub cover_images: Arc<CoverImageRepository>,
    pub blogs: Arc<BlogRepository>,
    pub user_profiles: Arc<UserProfileRepository>,
    pub users: Arc<UserRepository>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fixtures(fixtures: Fixtures) -> Result<Self, RepositoryError> {
        let registry = Self::new();
        load(&registry.users, fixtures.users)?;
        load(&registry.authors, fixtures.authors)?;
        load(&registry.tags, fixtures.tags)?;
        load(&registry.cover_images, fixtures.cover_images)?;
        load(&registry.blogs, fixtures.blogs)?;
        load(&registry.user_profiles, fixtures.user_profiles)?;
        tracing::info!(
            blogs = registry.blogs.len(),
            authors = registry.authors.len(),
            tags = registry.tags.len(),
            "fixtures loaded"
        );
        Ok(registry)
    }

    pub fn blog_dependencies(&self) -> BlogDependencies {
        BlogDependencies {
            authors: self.authors.clone(),
            tags: self.tags.clone(),
            cover_images: self.cover_images.clone(),
            blogs: self.blogs.clone(),
        }
    }

    pub fn user_profile_dependencies(&self) -> UserProfileDependencies {
        UserProfileDependencies {
            users: self.users.clone(),
            profiles: self.user_profiles.clone(),
        }
    }
}

fn load<T: Record>(table: &Table<T>, rows: Vec<T>) -> Result<(), RepositoryError> {
    for row in rows {
        table.insert(row)?;
    }
    Ok(())
}
