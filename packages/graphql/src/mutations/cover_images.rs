use crate::errors::{AuthError, ValidationErrorType};
use crate::serializers::Serializers;
use crate::types::cover_image::CoverImage as CoverImageType;
use crate::utilities::requires_auth::RequiresAuth;
use async_graphql::{Context, Json, Object, Result, Union};
use repositories::Registry;
use services::JsonMap;

use super::report_fault;

#[derive(Union)]
pub enum CoverImageMutationResult {
    ChangedCoverImage(CoverImageType),
    ValidationError(ValidationErrorType),
    AuthError(AuthError),
}

#[derive(Default)]
pub struct CoverImageMutation;

impl RequiresAuth for CoverImageMutation {}

#[Object]
impl CoverImageMutation {
    async fn add_cover_image(&self, ctx: &Context<'_>, input: Json<JsonMap>) -> Result<CoverImageMutationResult> {
        if let Err(e) = self.require_authenticated(ctx) {
            return Ok(CoverImageMutationResult::AuthError(e.into()));
        }
        let registry = ctx.data::<Registry>()?;
        let serializers = ctx.data::<Serializers>()?;

        let outcome = serializers
            .cover_image
            .validate(&input.0, &self.validation_context(ctx))
            .map_err(report_fault)?;
        let data = match outcome.into_result() {
            Ok(data) => data,
            Err(errors) => return Ok(CoverImageMutationResult::ValidationError(errors.into())),
        };

        let image = registry.cover_images.insert(serializers.cover_image.create(&data)?)?;
        Ok(CoverImageMutationResult::ChangedCoverImage(image.into()))
    }
}
