use models::requester::Requester;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionDenied {
    #[error("Authentication credentials were not provided.")]
    Anonymous,
    #[error("User does not have permission `{0}`")]
    MissingPermission(String),
    #[error("User is not a member of group `{0}`")]
    NotInGroup(String),
}

/// Superusers hold every permission
pub fn has_permission(requester: &Requester, permission: &str) -> bool {
    requester.is_superuser || requester.permissions.iter().any(|p| p == permission)
}

pub fn in_group(requester: &Requester, group: &str) -> bool {
    requester.groups.iter().any(|g| g == group)
}

pub fn require_permission<'a>(
    requester: Option<&'a Requester>,
    permission: &str,
) -> Result<&'a Requester, PermissionDenied> {
    let requester = requester.ok_or(PermissionDenied::Anonymous)?;
    if !has_permission(requester, permission) {
        tracing::debug!(user = %requester.username, %permission, "permission denied");
        return Err(PermissionDenied::MissingPermission(permission.to_string()));
    }
    Ok(requester)
}

pub fn require_group<'a>(requester: Option<&'a Requester>, group: &str) -> Result<&'a Requester, PermissionDenied> {
    let requester = requester.ok_or(PermissionDenied::Anonymous)?;
    if !in_group(requester, group) {
        tracing::debug!(user = %requester.username, %group, "group check failed");
        return Err(PermissionDenied::NotInGroup(group.to_string()));
    }
    Ok(requester)
}
