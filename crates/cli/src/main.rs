mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::CommandFactory;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use audiomirror_core::{
    load_config, load_default_config, validate_config, Config, FfmpegTranscoder, FsCopier,
    SizeReport, Transcoder, TreeConverter,
};

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Rejects unknown formats before anything else happens, unless help
    // was asked for.
    let cli = match Cli::parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn load(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => load_default_config().context("Failed to load default config")?,
    };
    validate_config(&config).context("Configuration validation failed")?;
    Ok(config)
}

async fn run(cli: Cli) -> Result<ExitCode> {
    if cli.help {
        let config = load(&cli).unwrap_or_default();
        print_help(&FfmpegTranscoder::new(config.transcoder)).await?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = load(&cli)?;
    debug!("Configuration: {:?}", config);

    let transcoder = FfmpegTranscoder::new(config.transcoder.clone());
    if cli.dry_run {
        info!("Dry run: nothing will be written");
    } else {
        transcoder
            .validate()
            .await
            .context("ffmpeg is required to convert files")?;
    }

    let request = cli.request();
    info!(
        "Mirroring {} into {} as {}{}",
        request.input_root.display(),
        request.output_root.display(),
        request.target_format,
        if request.recurse { " (recursive)" } else { "" }
    );

    let walker = TreeConverter::new(transcoder, FsCopier::new(config.copier.clone()));
    let summary = walker.run(request.clone()).await;

    info!(
        "Finished: {} converted, {} copied, {} skipped, {} planned, {} failed, {} directories abandoned",
        summary.converted,
        summary.copied,
        summary.skipped,
        summary.planned,
        summary.failures.len(),
        summary.failed_directories.len()
    );

    if request.compare {
        let input = request.input_root.clone();
        let output = request.output_root.clone();
        let report = tokio::task::spawn_blocking(move || SizeReport::compare(&input, &output))
            .await
            .context("Size comparison task failed")?;
        match report {
            Some(report) => info!("{}", report),
            None => debug!("Skipping size comparison, one of the trees is empty"),
        }
    }

    if summary.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        warn!("Some entries failed, rerun to retry them");
        Ok(ExitCode::FAILURE)
    }
}

/// Prints this tool's usage followed by the transcoder's own help.
async fn print_help(transcoder: &FfmpegTranscoder) -> Result<()> {
    Cli::command()
        .print_long_help()
        .context("Failed to print usage")?;
    println!();

    match transcoder.help().await {
        Ok(text) => {
            println!("{} help:", transcoder.name());
            println!("{}", text);
        }
        Err(e) => warn!("Could not get {} help: {}", transcoder.name(), e),
    }
    Ok(())
}
