use async_graphql::{Context, Json, Object, Result};
use repositories::Registry;
use services::JsonMap;
use uuid::Uuid;

use crate::errors::AuthError;
use crate::serializers::Serializers;
use crate::types::blog::Blog as BlogType;
use crate::types::sort::{BlogSortBy, SortDirection};
use crate::utilities::requires_auth::RequiresAuth;

pub const VIEW_BLOG_GROUP: &str = "can_view_blog";

#[derive(Default)]
pub struct BlogQueries;

impl RequiresAuth for BlogQueries {}

#[Object]
impl BlogQueries {
    /// List blogs; only members of `can_view_blog` may see them
    async fn blogs(
        &self,
        ctx: &Context<'_>,
        sort_by: Option<BlogSortBy>,
        direction: Option<SortDirection>,
        first: Option<i32>,
    ) -> Result<Vec<BlogType>> {
        self.require_group(ctx, VIEW_BLOG_GROUP).map_err(AuthError::from)?;
        let registry = ctx.data::<Registry>()?;

        let first = first.map(|n| n.max(0) as usize);
        let blogs = registry.blogs.list(
            sort_by.unwrap_or_default().into(),
            direction.unwrap_or_default().into(),
            first,
        );
        Ok(blogs.into_iter().map(BlogType::from).collect())
    }

    /// Outgoing representation of a single blog, with computed fields; same group as `blogs`
    async fn blog(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Json<JsonMap>>> {
        self.require_group(ctx, VIEW_BLOG_GROUP).map_err(AuthError::from)?;
        let registry = ctx.data::<Registry>()?;
        let serializers = ctx.data::<Serializers>()?;

        let Some(blog) = registry.blogs.find_by_id(id) else {
            return Ok(None);
        };
        let representation = serializers.blog.represent(&blog, &self.validation_context(ctx))?;
        Ok(Some(Json(representation)))
    }
}
