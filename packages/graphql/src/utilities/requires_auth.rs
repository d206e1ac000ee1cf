use async_graphql::Context;
use models::requester::Requester;
use services::{PermissionDenied, ValidationContext};

/// Resolvers read the requester from per-request `Requester` data;
/// a request without it is anonymous.
pub trait RequiresAuth {
    fn requester<'a>(&self, ctx: &Context<'a>) -> Option<&'a Requester> {
        ctx.data_opt::<Requester>()
    }

    fn require_authenticated<'a>(&self, ctx: &Context<'a>) -> Result<&'a Requester, PermissionDenied> {
        self.requester(ctx).ok_or(PermissionDenied::Anonymous)
    }

    fn require_group<'a>(&self, ctx: &Context<'a>, group: &str) -> Result<&'a Requester, PermissionDenied> {
        services::require_group(self.requester(ctx), group)
    }

    fn validation_context(&self, ctx: &Context<'_>) -> ValidationContext {
        match self.requester(ctx) {
            Some(requester) => ValidationContext::new().with_requester(requester.clone()),
            None => ValidationContext::new(),
        }
    }
}
