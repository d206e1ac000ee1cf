use crate::errors::{AuthError, NotFoundError, ValidationErrorType};
use crate::serializers::Serializers;
use crate::types::blog::Blog as BlogType;
use crate::utilities::requires_auth::RequiresAuth;
use async_graphql::{Context, Json, Object, Result, Union};
use repositories::{Registry, RepositoryError};
use services::{JsonMap, ValidationOutcome};
use uuid::Uuid;

use super::{report_fault, stored};

#[derive(Union)]
pub enum BlogMutationResult {
    ChangedBlog(BlogType),
    ValidationError(ValidationErrorType),
    AuthError(AuthError),
    NotFoundError(NotFoundError),
}

#[derive(Default)]
pub struct BlogMutation;

impl RequiresAuth for BlogMutation {}

#[Object]
impl BlogMutation {
    /// Validate `input` as a new blog and store it
    async fn add_blog(&self, ctx: &Context<'_>, input: Json<JsonMap>) -> Result<BlogMutationResult> {
        if let Err(e) = self.require_authenticated(ctx) {
            return Ok(BlogMutationResult::AuthError(e.into()));
        }
        let registry = ctx.data::<Registry>()?;
        let serializers = ctx.data::<Serializers>()?;
        let validation_ctx = self.validation_context(ctx);

        let data = match serializers
            .blog
            .validate_create(&input.0, &validation_ctx)
            .map_err(report_fault)?
        {
            ValidationOutcome::Valid(data) => data,
            ValidationOutcome::Invalid(errors) => {
                return Ok(BlogMutationResult::ValidationError(errors.into()));
            }
        };

        let blog = serializers.blog.create(&data)?;
        match stored(registry.blogs.insert(blog))? {
            Ok(blog) => Ok(BlogMutationResult::ChangedBlog(blog.into())),
            Err(errors) => Ok(BlogMutationResult::ValidationError(errors)),
        }
    }

    /// Validate the fields present in `input` and apply them to blog `id`
    async fn update_blog(&self, ctx: &Context<'_>, id: Uuid, input: Json<JsonMap>) -> Result<BlogMutationResult> {
        if let Err(e) = self.require_authenticated(ctx) {
            return Ok(BlogMutationResult::AuthError(e.into()));
        }
        let registry = ctx.data::<Registry>()?;
        let serializers = ctx.data::<Serializers>()?;

        let blog = match registry.blogs.get(id) {
            Ok(blog) => blog,
            Err(e @ RepositoryError::NotFound { .. }) => {
                return Ok(BlogMutationResult::NotFoundError(e.into()));
            }
            Err(e) => return Err(e.into()),
        };

        let validation_ctx = self.validation_context(ctx);
        let data = match serializers
            .blog
            .validate_update(id, &input.0, &validation_ctx)
            .map_err(report_fault)?
        {
            ValidationOutcome::Valid(data) => data,
            ValidationOutcome::Invalid(errors) => {
                return Ok(BlogMutationResult::ValidationError(errors.into()));
            }
        };

        match stored(registry.blogs.replace(serializers.blog.update(blog, &data)))? {
            Ok(blog) => Ok(BlogMutationResult::ChangedBlog(blog.into())),
            Err(errors) => Ok(BlogMutationResult::ValidationError(errors)),
        }
    }
}
