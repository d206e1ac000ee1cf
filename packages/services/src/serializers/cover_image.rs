use chrono::Utc;
use models::cover_images::CoverImage;
use uuid::Uuid;

use super::{required_text, IncompleteRecord};
use crate::validation::{
    FieldDeclaration, JsonMap, RawInput, RecordSchema, RepresentationError, SchemaFault, ValidatedData,
    ValidationContext, ValidationOutcome,
};

pub struct CoverImageSerializer {
    schema: RecordSchema,
}

impl Default for CoverImageSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl CoverImageSerializer {
    pub fn new() -> Self {
        Self {
            schema: RecordSchema::builder("cover_image")
                .field(FieldDeclaration::url("image_link"))
                .build(),
        }
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    pub fn validate(&self, input: &RawInput, ctx: &ValidationContext) -> Result<ValidationOutcome, SchemaFault> {
        self.schema.validate(input, ctx)
    }

    pub fn create(&self, data: &ValidatedData) -> Result<CoverImage, IncompleteRecord> {
        let now = Utc::now();
        Ok(CoverImage {
            id: Uuid::new_v4(),
            image_link: required_text(data, "image_link")?,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn represent(&self, image: &CoverImage, ctx: &ValidationContext) -> Result<JsonMap, RepresentationError> {
        self.schema.represent(image, ctx)
    }
}
