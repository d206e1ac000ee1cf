use models::prelude::*;
use serde::Deserialize;

use crate::errors::RepositoryError;

/// Seed data for a [`crate::Registry`], read from a JSON document with one
/// array per table. Missing tables are empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Fixtures {
    pub users: Vec<Requester>,
    pub authors: Vec<Author>,
    pub tags: Vec<Tag>,
    pub cover_images: Vec<CoverImage>,
    pub blogs: Vec<Blog>,
    pub user_profiles: Vec<UserProfile>,
}

impl Fixtures {
    pub fn from_json(json: &str) -> Result<Self, RepositoryError> {
        Ok(serde_json::from_str(json)?)
    }
}
