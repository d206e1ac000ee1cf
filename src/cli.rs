use clap::{Args, Parser, Subcommand, ValueEnum};
use models::requester::Requester;
use repositories::{Fixtures, Registry};
use serde_json::{json, Value};
use services::serializers::{
    BlogSerializer, ChangePasswordSerializer, CoverImageSerializer, SignUpSerializer, UserProfileSerializer,
};
use services::{PasswordPolicy, RawInput, RecordSchema, SchemaFault, ValidationContext, ValidationOutcome};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::AppError;

#[derive(Parser, Debug)]
#[command(author, version, about = "Validate blog documents against their record schemas")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a JSON document and print the validated data or the errors
    Validate(ValidateArgs),
    /// List the schemas and their declared fields
    Schemas,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[arg(short, long, value_enum)]
    pub schema: SchemaName,
    /// Input document; stdin when absent or `-`
    #[arg(short, long)]
    pub input: Option<PathBuf>,
    /// Seed records that references and uniqueness are checked against
    #[arg(short, long)]
    pub fixtures: Option<PathBuf>,
    /// JSON file describing the requester
    #[arg(short, long)]
    pub requester: Option<PathBuf>,
    /// Skip absent fields instead of reporting them
    #[arg(long)]
    pub partial: bool,
    /// Validate as a partial update of this stored blog; implies --partial
    #[arg(long)]
    pub instance: Option<Uuid>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaName {
    Blog,
    CoverImage,
    UserProfile,
    SignUp,
    ChangePassword,
}

impl SchemaName {
    pub const ALL: [SchemaName; 5] = [
        SchemaName::Blog,
        SchemaName::CoverImage,
        SchemaName::UserProfile,
        SchemaName::SignUp,
        SchemaName::ChangePassword,
    ];
}

/// All serializers, resolved against one registry
struct Serializers {
    blog: BlogSerializer,
    cover_image: CoverImageSerializer,
    user_profile: UserProfileSerializer,
    sign_up: SignUpSerializer,
    change_password: ChangePasswordSerializer,
}

impl Serializers {
    fn new(registry: &Registry, policy: PasswordPolicy) -> Self {
        Self {
            blog: BlogSerializer::new(registry.blog_dependencies()),
            cover_image: CoverImageSerializer::new(),
            user_profile: UserProfileSerializer::new(registry.user_profile_dependencies()),
            sign_up: SignUpSerializer::new(policy.clone()),
            change_password: ChangePasswordSerializer::new(policy),
        }
    }

    fn schema(&self, name: SchemaName) -> &RecordSchema {
        match name {
            SchemaName::Blog => self.blog.schema(),
            SchemaName::CoverImage => self.cover_image.schema(),
            SchemaName::UserProfile => self.user_profile.schema(),
            SchemaName::SignUp => self.sign_up.schema(),
            SchemaName::ChangePassword => self.change_password.schema(),
        }
    }
}

/// Options of one validation run, after files have been read
pub struct ValidationRequest<'a> {
    pub schema: SchemaName,
    pub input: &'a RawInput,
    pub ctx: &'a ValidationContext,
    pub partial: bool,
    pub instance: Option<Uuid>,
}

/// Result printed on stdout
#[derive(Debug, PartialEq)]
pub struct Report {
    pub valid: bool,
    pub body: Value,
}

pub fn run(command: Command, config: &AppConfig) -> Result<ExitCode, AppError> {
    match command {
        Command::Validate(args) => {
            let report = run_validate(&args, config)?;
            println!("{}", pretty(&report.body)?);
            Ok(if report.valid { ExitCode::SUCCESS } else { ExitCode::from(1) })
        }
        Command::Schemas => {
            let serializers = Serializers::new(&Registry::new(), password_policy(config));
            for name in SchemaName::ALL {
                let schema = serializers.schema(name);
                let fields: Vec<&str> = schema.field_names().collect();
                println!("{}: {}", schema.name(), fields.join(", "));
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

pub fn run_validate(args: &ValidateArgs, config: &AppConfig) -> Result<Report, AppError> {
    let input = read_input(args.input.as_deref())?;

    let registry = match args.fixtures.as_ref().or(config.fixtures.as_ref()) {
        Some(path) => Registry::from_fixtures(Fixtures::from_json(&read_file(path)?)?)?,
        None => Registry::new(),
    };

    let mut ctx = ValidationContext::new();
    if let Some(path) = &args.requester {
        let requester: Requester = serde_json::from_str(&read_file(path)?).map_err(|source| AppError::Json {
            what: "requester",
            source,
        })?;
        ctx = ctx.with_requester(requester);
    }

    let request = ValidationRequest {
        schema: args.schema,
        input: &input,
        ctx: &ctx,
        partial: args.partial,
        instance: args.instance,
    };
    validate_document(&registry, password_policy(config), &request)
}

pub fn validate_document(
    registry: &Registry,
    policy: PasswordPolicy,
    request: &ValidationRequest<'_>,
) -> Result<Report, AppError> {
    let serializers = Serializers::new(registry, policy);

    let outcome = match (request.schema, request.instance) {
        (SchemaName::Blog, Some(id)) => {
            registry.blogs.get(id)?;
            serializers.blog.validate_update(id, request.input, request.ctx)?
        }
        (_, Some(_)) => return Err(AppError::InstanceUnsupported),
        (name, None) => check(serializers.schema(name), request)?,
    };

    tracing::debug!(schema = ?request.schema, valid = outcome.is_valid(), "document validated");
    let report = match outcome {
        ValidationOutcome::Valid(data) => Report {
            valid: true,
            body: json!({ "valid": true, "data": data.to_json() }),
        },
        ValidationOutcome::Invalid(errors) => Report {
            valid: false,
            body: json!({ "valid": false, "errors": errors }),
        },
    };
    Ok(report)
}

fn check(schema: &RecordSchema, request: &ValidationRequest<'_>) -> Result<ValidationOutcome, SchemaFault> {
    if request.partial {
        schema.validate_partial(request.input, request.ctx)
    } else {
        schema.validate(request.input, request.ctx)
    }
}

fn password_policy(config: &AppConfig) -> PasswordPolicy {
    let mut policy = PasswordPolicy::default();
    if let Some(min_length) = config.password_min_length {
        policy.min_length = min_length;
    }
    policy
}

fn read_file(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn read_input(path: Option<&Path>) -> Result<RawInput, AppError> {
    let text = match path {
        Some(path) if path != Path::new("-") => read_file(path)?,
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|source| AppError::Read {
                    path: PathBuf::from("-"),
                    source,
                })?;
            text
        }
    };
    parse_input(&text)
}

pub fn parse_input(text: &str) -> Result<RawInput, AppError> {
    let value: Value = serde_json::from_str(text).map_err(|source| AppError::Json { what: "input", source })?;
    match value {
        Value::Object(map) => Ok(map),
        Value::Array(_) => Err(AppError::NotAnObject("an array")),
        Value::String(_) => Err(AppError::NotAnObject("a string")),
        Value::Number(_) => Err(AppError::NotAnObject("a number")),
        Value::Bool(_) => Err(AppError::NotAnObject("a boolean")),
        Value::Null => Err(AppError::NotAnObject("null")),
    }
}

fn pretty(value: &Value) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|source| AppError::Json { what: "report", source })
}
