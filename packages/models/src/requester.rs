use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The identity behind a request, as seen by validators and permission checks
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    pub id: Uuid,
    pub username: String,
    #[serde(default)]
    pub groups: Vec<String>,
    /// Permission codenames such as `blog.update_title`
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub is_superuser: bool,
}

impl Requester {
    pub fn new(id: Uuid, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            groups: Vec::new(),
            permissions: Vec::new(),
            is_superuser: false,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.push(permission.into());
        self
    }

    pub fn superuser(mut self) -> Self {
        self.is_superuser = true;
        self
    }
}
