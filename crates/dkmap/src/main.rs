mod cli;
mod error;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use dkmap_core::Exporter;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = dkmap_config::load_config(cli.config.as_deref())?;
    if let Some(timeout) = cli.timeout {
        config.timeout = timeout;
    }
    let export_config = config.to_export_config()?;

    if !cli.output_dir.is_dir() {
        return Err(CliError::Validation {
            field: "OUTPUT_DIR".into(),
            reason: format!("not an existing directory: {}", cli.output_dir.display()),
        });
    }

    let mut exporter = Exporter::connect(&export_config)
        .await?
        .on_unmatched(|name| println!("Location not found: '{name}'"));
    let result = exporter.run(&cli.output_dir).await;

    let (_, geometry, _) = exporter.into_parts();
    if let Err(e) = geometry.close().await {
        debug!(error = %e, "closing database connection failed");
    }

    let summary = result?;
    info!(
        rows = summary.rows,
        features = summary.features,
        unmatched = summary.unmatched.len(),
        output = %summary.output.display(),
        "export complete"
    );
    Ok(())
}
