#[cfg(feature = "cli")]
pub mod cli;
pub mod file;

pub use file::{DestinationConfig, ImportConfig, SourceConfig};
