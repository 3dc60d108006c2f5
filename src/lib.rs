pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::Cli;

pub use crate::app::{user_validator, App, User};
pub use crate::config::ImportConfig;
pub use crate::core::error_handler::{ErrorHandler, ReportContext};
pub use crate::core::importer::Importer;
pub use crate::core::writer::StreamWriter;
pub use crate::domain::model::{CancelFlag, ImportSummary};
pub use crate::utils::error::{ImportError, Result};
