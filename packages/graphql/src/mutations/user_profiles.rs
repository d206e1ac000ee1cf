use crate::errors::{AuthError, ValidationErrorType};
use crate::serializers::Serializers;
use crate::types::user_profile::UserProfile as UserProfileType;
use crate::utilities::requires_auth::RequiresAuth;
use async_graphql::{Context, Json, Object, Result, Union};
use repositories::Registry;
use services::{JsonMap, ValidationOutcome};

use super::{report_fault, stored};

#[derive(Union)]
pub enum UserProfileMutationResult {
    ChangedUserProfile(UserProfileType),
    ValidationError(ValidationErrorType),
    AuthError(AuthError),
}

#[derive(Default)]
pub struct UserProfileMutation;

impl RequiresAuth for UserProfileMutation {}

#[Object]
impl UserProfileMutation {
    async fn add_user_profile(&self, ctx: &Context<'_>, input: Json<JsonMap>) -> Result<UserProfileMutationResult> {
        if let Err(e) = self.require_authenticated(ctx) {
            return Ok(UserProfileMutationResult::AuthError(e.into()));
        }
        let registry = ctx.data::<Registry>()?;
        let serializers = ctx.data::<Serializers>()?;

        let data = match serializers
            .user_profile
            .validate(&input.0, &self.validation_context(ctx))
            .map_err(report_fault)?
        {
            ValidationOutcome::Valid(data) => data,
            ValidationOutcome::Invalid(errors) => {
                return Ok(UserProfileMutationResult::ValidationError(errors.into()));
            }
        };

        match stored(registry.user_profiles.insert(serializers.user_profile.create(&data)?))? {
            Ok(profile) => Ok(UserProfileMutationResult::ChangedUserProfile(profile.into())),
            Err(errors) => Ok(UserProfileMutationResult::ValidationError(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helpers::*;
    use async_graphql::{Request, Variables};
    use serde_json::json;

    const ADD_USER_PROFILE: &str = r#"mutation AddUserProfile($input: JSON!) {
        addUserProfile(input: $input) {
            __typename
            ... on UserProfile { phoneNo city }
            ... on ValidationErrorType { fieldErrors { field messages } }
        }
    }"#;

    #[tokio::test]
    async fn test_phone_numbers_are_unique() {
        let fixture = seeded_registry();
        let schema = crate::build_schema(fixture.registry.clone());
        let user = writer();

        let input = json!({ "user": user.id, "phone_no": "555-0100", "city": "Lisbon" });
        let vars = Variables::from_json(json!({ "input": input }));
        let res = schema
            .execute(Request::new(ADD_USER_PROFILE).variables(vars).data(user.clone()))
            .await;
        let data = res.data.into_json().unwrap();
        assert_eq!(data["addUserProfile"]["__typename"], "UserProfile");
        assert_eq!(data["addUserProfile"]["phoneNo"], "555-0100");

        let other = editor();
        let input = json!({ "user": other.id, "phone_no": "555-0100", "city": "Porto" });
        let vars = Variables::from_json(json!({ "input": input }));
        let res = schema
            .execute(Request::new(ADD_USER_PROFILE).variables(vars).data(other))
            .await;
        let data = res.data.into_json().unwrap();
        assert_eq!(data["addUserProfile"]["fieldErrors"][0]["field"], "phone_no");
        assert_eq!(
            data["addUserProfile"]["fieldErrors"][0]["messages"][0],
            "This field must be unique."
        );
    }

    #[tokio::test]
    async fn test_city_length_is_limited() {
        let fixture = seeded_registry();
        let schema = crate::build_schema(fixture.registry.clone());
        let user = writer();

        let input = json!({ "user": user.id, "phone_no": "555-0101", "city": "x".repeat(41) });
        let vars = Variables::from_json(json!({ "input": input }));
        let res = schema
            .execute(Request::new(ADD_USER_PROFILE).variables(vars).data(user))
            .await;
        let data = res.data.into_json().unwrap();
        assert_eq!(data["addUserProfile"]["fieldErrors"][0]["field"], "city");
    }
}
