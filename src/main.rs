use clap::Parser;
use masterdata_import::utils::{logger, validation::Validate};
use masterdata_import::{App, CancelFlag, Cli, ImportConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting masterdata-import");
    if cli.verbose {
        tracing::debug!("CLI options: {:?}", cli);
    }

    let mut config = ImportConfig::from_file(&cli.config)?;
    if let Some(input) = cli.input {
        config.source.path = input;
    }
    if let Some(table) = cli.table {
        config.destination.table = table;
    }
    if let Some(batch_size) = cli.batch_size {
        config.batch_size = batch_size;
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let cancel = CancelFlag::new();
    let signal_flag = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing current record and stopping");
            signal_flag.cancel();
        }
    });

    let app = App::build(&config, cancel).await?;
    let (summary, error) = app.import().await;

    match error {
        None => {
            tracing::info!(
                "✅ Import completed: {} succeeded, {} failed",
                summary.succeeded,
                summary.failed
            );
            println!(
                "✅ Import completed: {} succeeded, {} failed",
                summary.succeeded, summary.failed
            );
            Ok(())
        }
        Some(e) => {
            tracing::error!(
                "❌ Import aborted after {} succeeded, {} failed: {}",
                summary.succeeded,
                summary.failed,
                e
            );
            eprintln!(
                "❌ Import aborted after {} succeeded, {} failed: {}",
                summary.succeeded, summary.failed, e
            );
            std::process::exit(1);
        }
    }
}
