//! Process configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use menuprofit_infra::DirectorySource;
use menuprofit_observability::{LogFormat, ParseLogFormatError};

pub const BIND_ADDR_VAR: &str = "MENUPROFIT_BIND_ADDR";
pub const ARTIFACT_DIR_VAR: &str = "MENUPROFIT_ARTIFACT_DIR";
pub const MODEL_FILE_VAR: &str = "MENUPROFIT_MODEL_FILE";
pub const ENCODERS_FILE_VAR: &str = "MENUPROFIT_ENCODERS_FILE";
pub const LABELS_FILE_VAR: &str = "MENUPROFIT_LABELS_FILE";
pub const LOG_FORMAT_VAR: &str = "MENUPROFIT_LOG_FORMAT";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ARTIFACT_DIR: &str = "artifacts";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: {value:?} is not a socket address")]
    InvalidBindAddr { var: &'static str, value: String },

    #[error("{var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub artifact_dir: PathBuf,
    pub model_file: Option<String>,
    pub encoders_file: Option<String>,
    pub labels_file: Option<String>,
    pub log_format: LogFormat,
    /// Variables that were absent and fell back to a default.
    defaulted: Vec<&'static str>,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup (tests, alternative sources).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut defaulted = Vec::new();
        let mut get = |var: &'static str| {
            let value = lookup(var).filter(|v| !v.trim().is_empty());
            if value.is_none() {
                defaulted.push(var);
            }
            value
        };

        let bind_raw = get(BIND_ADDR_VAR);
        let artifact_dir = get(ARTIFACT_DIR_VAR);
        let log_format = get(LOG_FORMAT_VAR);
        // File-name overrides are optional; their absence is not worth a warning.
        let model_file = lookup(MODEL_FILE_VAR).filter(|v| !v.trim().is_empty());
        let encoders_file = lookup(ENCODERS_FILE_VAR).filter(|v| !v.trim().is_empty());
        let labels_file = lookup(LABELS_FILE_VAR).filter(|v| !v.trim().is_empty());

        let bind_raw = bind_raw.unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.trim().parse().map_err(|_| ConfigError::InvalidBindAddr {
            var: BIND_ADDR_VAR,
            value: bind_raw.clone(),
        })?;

        let log_format = match log_format {
            Some(v) => v.parse().map_err(|e: ParseLogFormatError| ConfigError::Invalid {
                var: LOG_FORMAT_VAR,
                reason: e.to_string(),
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            artifact_dir: PathBuf::from(
                artifact_dir.unwrap_or_else(|| DEFAULT_ARTIFACT_DIR.to_string()),
            ),
            model_file,
            encoders_file,
            labels_file,
            log_format,
            defaulted,
        })
    }

    /// Where the pipeline's artifacts are read from.
    pub fn artifact_source(&self) -> DirectorySource {
        let mut source = DirectorySource::new(&self.artifact_dir);
        if let Some(f) = &self.model_file {
            source = source.with_model_file(f);
        }
        if let Some(f) = &self.encoders_file {
            source = source.with_encoders_file(f);
        }
        if let Some(f) = &self.labels_file {
            source = source.with_labels_file(f);
        }
        source
    }

    pub fn defaulted(&self) -> &[&'static str] {
        &self.defaulted
    }

    /// Warn about every variable that fell back to its default. Call after
    /// logging is initialized.
    pub fn log_defaults(&self) {
        for var in &self.defaulted {
            tracing::warn!(var = *var, "environment variable not set; using default");
        }
    }
}
