use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: failed to parse config file: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Schema error: {message}")]
    SchemaError { message: String },

    #[error("Record mapping failed: {message}")]
    MappingError { message: String },

    #[error("Cannot connect to destination at {endpoint}: {reason}")]
    ConnectError { endpoint: String, reason: String },

    #[error("Bulk statement rejected by destination (status {status}): {detail}")]
    ExecuteError { status: u16, detail: String },

    #[error("Import run cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, ImportError>;
