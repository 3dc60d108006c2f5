use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "masterdata-import")]
#[command(about = "Bulk-imports delimited record files into a tabular data store")]
pub struct Cli {
    /// Path to the TOML import configuration.
    #[arg(long, default_value = "import.toml")]
    pub config: String,

    /// Overrides the input file from the configuration.
    #[arg(long)]
    pub input: Option<String>,

    /// Overrides the destination table from the configuration.
    #[arg(long)]
    pub table: Option<String>,

    /// Overrides the batch size from the configuration.
    #[arg(long)]
    pub batch_size: Option<usize>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit JSON-formatted logs")]
    pub json_logs: bool,
}
