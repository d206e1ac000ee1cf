//! Record serializers for the blog domain: the schemas incoming data is
//! validated against, the conversion of validated data into models, and the
//! outgoing representation of stored models.

pub mod accounts;
pub mod blog;
pub mod cover_image;
pub mod user_profile;

pub use accounts::{ChangePasswordSerializer, SignUpSerializer};
pub use blog::{BlogDependencies, BlogSerializer};
pub use cover_image::CoverImageSerializer;
pub use user_profile::{UserProfileDependencies, UserProfileSerializer};

use thiserror::Error;
use uuid::Uuid;

use crate::validation::ValidatedData;

/// Validated data lacked a value its model needs; the schema and the model disagree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validated data has no usable `{0}` value")]
pub struct IncompleteRecord(pub String);

pub(crate) fn required_text(data: &ValidatedData, field: &str) -> Result<String, IncompleteRecord> {
    data.text(field)
        .map(str::to_string)
        .ok_or_else(|| IncompleteRecord(field.to_string()))
}

pub(crate) fn required_reference(data: &ValidatedData, field: &str) -> Result<Uuid, IncompleteRecord> {
    data.reference(field)
        .ok_or_else(|| IncompleteRecord(field.to_string()))
}
