use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use tracing_subscriber::fmt as tracing_fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::errors::AppError;

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("unknown log format `{}`", other))),
        }
    }
}

/// Settings read from the environment (and `.env`, when present)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log_format: LogFormat,
    pub log_filter: String,
    /// Used when `--fixtures` is not given
    pub fixtures: Option<PathBuf>,
    pub password_min_length: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            fixtures: None,
            password_min_length: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(format) = lookup("INKWELL_LOG_FORMAT") {
            config.log_format = format.parse()?;
        }
        if let Some(filter) = lookup("RUST_LOG") {
            config.log_filter = filter;
        }
        config.fixtures = lookup("INKWELL_FIXTURES").map(PathBuf::from);
        if let Some(length) = lookup("INKWELL_PASSWORD_MIN_LENGTH") {
            let length = length
                .parse()
                .map_err(|_| AppError::Config(format!("invalid password length `{}`", length)))?;
            config.password_min_length = Some(length);
        }
        Ok(config)
    }

    /// Logs go to stderr; stdout carries the validation report
    pub fn init_logger(&self) -> Result<(), AppError> {
        let env_filter = EnvFilter::try_new(&self.log_filter)
            .map_err(|e| AppError::Config(format!("invalid log filter: {}", e)))?;
        let registry = tracing_subscriber::registry().with(env_filter);

        match self.log_format {
            LogFormat::Text => registry
                .with(tracing_fmt::layer().with_writer(std::io::stderr))
                .init(),
            LogFormat::Json => registry
                .with(tracing_fmt::layer().json().with_writer(std::io::stderr))
                .init(),
        }
        Ok(())
    }
}
