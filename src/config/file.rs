use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

fn default_batch_size() -> usize {
    4
}

fn default_poll_interval_ms() -> u64 {
    3000
}

fn default_delimiter() -> String {
    ",".to_string()
}

fn default_framing() -> String {
    "delimited".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    pub destination: DestinationConfig,
    pub source: SourceConfig,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Free-form run tags attached to every reported failure.
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationConfig {
    pub endpoint: String,
    pub database: String,
    pub table: String,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: String,
    /// "delimited" or "fixed".
    #[serde(default = "default_framing")]
    pub framing: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

impl ImportConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: ImportConfig = toml::from_str(&raw)?;
        Ok(config)
    }
}

impl Validate for ImportConfig {
    fn validate(&self) -> Result<()> {
        validate_url("destination.endpoint", &self.destination.endpoint)?;
        validate_non_empty_string("destination.database", &self.destination.database)?;
        validate_non_empty_string("destination.table", &self.destination.table)?;
        validate_non_empty_string("source.path", &self.source.path)?;
        validate_one_of("source.framing", &self.source.framing, &["delimited", "fixed"])?;
        validate_positive_number("batch_size", self.batch_size, 1)?;
        if self.source.delimiter.len() != 1 {
            return Err(crate::utils::error::ImportError::InvalidConfigValueError {
                field: "source.delimiter".to_string(),
                value: self.source.delimiter.clone(),
                reason: "Delimiter must be a single byte".to_string(),
            });
        }
        Ok(())
    }
}
