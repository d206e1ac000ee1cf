use models::user_profiles::UserProfile;
use std::sync::Arc;
use uuid::Uuid;

use super::{required_reference, required_text, IncompleteRecord};
use crate::validation::field_validators::unique;
use crate::validation::{
    FieldDeclaration, RawInput, RecordSchema, RelatedLookup, SchemaFault, UniqueIndex, ValidatedData,
    ValidationContext, ValidationOutcome,
};

pub const PHONE_NO_MAX_LENGTH: usize = 20;
pub const CITY_MAX_LENGTH: usize = 40;

#[derive(Clone)]
pub struct UserProfileDependencies {
    pub users: Arc<dyn RelatedLookup>,
    pub profiles: Arc<dyn UniqueIndex>,
}

pub struct UserProfileSerializer {
    schema: RecordSchema,
}

impl UserProfileSerializer {
    pub fn new(deps: UserProfileDependencies) -> Self {
        let schema = RecordSchema::builder("user_profile")
            .field(
                FieldDeclaration::reference("user", deps.users.clone())
                    .validator(unique(deps.profiles.clone(), "user")),
            )
            .field(
                FieldDeclaration::text("phone_no")
                    .max_length(PHONE_NO_MAX_LENGTH)
                    .validator(unique(deps.profiles, "phone_no")),
            )
            .field(FieldDeclaration::text("city").max_length(CITY_MAX_LENGTH))
            .build();
        Self { schema }
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    pub fn validate(&self, input: &RawInput, ctx: &ValidationContext) -> Result<ValidationOutcome, SchemaFault> {
        self.schema.validate(input, ctx)
    }

    pub fn create(&self, data: &ValidatedData) -> Result<UserProfile, IncompleteRecord> {
        Ok(UserProfile {
            id: Uuid::new_v4(),
            user: required_reference(data, "user")?,
            phone_no: required_text(data, "phone_no")?,
            city: required_text(data, "city")?,
        })
    }
}
