use chrono::Utc;
use models::blogs::Blog;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use super::{required_reference, required_text, IncompleteRecord};
use crate::validation::field_validators::{forbid_chars, requires_permission, unique};
use crate::validation::{
    fields_differ, FieldDeclaration, FieldValue, JsonMap, RawInput, RecordSchema, RelatedLookup,
    RepresentationError, SchemaFault, UniqueIndex, ValidatedData, ValidationContext,
    ValidationOutcome,
};

pub const TITLE_MAX_LENGTH: usize = 200;
pub const UPDATE_TITLE_PERMISSION: &str = "blog.update_title";

/// Lookups the blog schema resolves references and uniqueness against
#[derive(Clone)]
pub struct BlogDependencies {
    pub authors: Arc<dyn RelatedLookup>,
    /// Expected to only contain tags owned by the requester
    pub tags: Arc<dyn RelatedLookup>,
    pub cover_images: Arc<dyn RelatedLookup>,
    pub blogs: Arc<dyn UniqueIndex>,
}

pub struct BlogSerializer {
    create_schema: RecordSchema,
    update_schema: RecordSchema,
}

pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

fn title_field(for_update: bool) -> FieldDeclaration {
    // `*` is checked before `_`; a title with both reports the asterisk
    let field = FieldDeclaration::text("title")
        .max_length(TITLE_MAX_LENGTH)
        .validator(forbid_chars("no_asterisk", "*", "Illegal char"))
        .validator(forbid_chars("no_underscore", "_", "Illegal char"));
    if for_update {
        field.validator(requires_permission(UPDATE_TITLE_PERMISSION))
    } else {
        field
    }
}

fn blog_schema(deps: &BlogDependencies, for_update: bool) -> RecordSchema {
    RecordSchema::builder("blog")
        .field(title_field(for_update))
        .field(FieldDeclaration::text("content"))
        .field(FieldDeclaration::reference("author", deps.authors.clone()))
        .field(FieldDeclaration::references("tags", deps.tags.clone(), true).default(FieldValue::References(Vec::new())))
        .field(
            FieldDeclaration::reference("cover_image", deps.cover_images.clone())
                .validator(unique(deps.blogs.clone(), "cover_image")),
        )
        .object_validator(fields_differ(
            "title_differs_from_content",
            "title",
            "content",
            None,
            "Title and content cannot have the same value",
        ))
        .computed_field("word_count", |repr| {
            let count = repr
                .get("content")
                .and_then(Value::as_str)
                .map(word_count)
                .unwrap_or(0);
            json!(count)
        })
        .to_representation(|mut repr, _| {
            if let Some(Value::String(title)) = repr.get("title").cloned() {
                repr.insert("title".to_string(), Value::String(title.to_uppercase()));
            }
            repr
        })
        .build()
}

impl BlogSerializer {
    pub fn new(deps: BlogDependencies) -> Self {
        Self {
            create_schema: blog_schema(&deps, false),
            update_schema: blog_schema(&deps, true),
        }
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.create_schema
    }

    pub fn validate_create(&self, input: &RawInput, ctx: &ValidationContext) -> Result<ValidationOutcome, SchemaFault> {
        self.create_schema.validate(input, ctx)
    }

    /// Partial validation of changes to `id`; changing the title requires `blog.update_title`
    pub fn validate_update(
        &self,
        id: Uuid,
        input: &RawInput,
        ctx: &ValidationContext,
    ) -> Result<ValidationOutcome, SchemaFault> {
        let ctx = ctx.clone().for_instance(id);
        self.update_schema.validate_partial(input, &ctx)
    }

    /// Build a new blog from data that passed `validate_create`
    pub fn create(&self, data: &ValidatedData) -> Result<Blog, IncompleteRecord> {
        let now = Utc::now();
        let blog = Blog {
            id: Uuid::new_v4(),
            title: required_text(data, "title")?,
            content: required_text(data, "content")?,
            author: required_reference(data, "author")?,
            tags: data.references("tags").map(<[Uuid]>::to_vec).unwrap_or_default(),
            cover_image: required_reference(data, "cover_image")?,
            created_at: now,
            updated_at: now,
        };
        tracing::info!(blog = %blog.id, "Custom create method is called");
        Ok(blog)
    }

    /// Apply data that passed `validate_update`; fields absent from it are left untouched
    pub fn update(&self, mut blog: Blog, data: &ValidatedData) -> Blog {
        if let Some(title) = data.text("title") {
            blog.title = title.to_string();
        }
        if let Some(content) = data.text("content") {
            blog.content = content.to_string();
        }
        if let Some(author) = data.reference("author") {
            blog.author = author;
        }
        if let Some(tags) = data.references("tags") {
            blog.tags = tags.to_vec();
        }
        if let Some(cover_image) = data.reference("cover_image") {
            blog.cover_image = cover_image;
        }
        blog.updated_at = Utc::now();
        tracing::info!(blog = %blog.id, "Custom update method is called");
        blog
    }

    pub fn represent(&self, blog: &Blog, ctx: &ValidationContext) -> Result<JsonMap, RepresentationError> {
        self.create_schema.represent(blog, ctx)
    }
}
