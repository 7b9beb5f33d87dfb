//! Global temperature heatmap generator.
//!
//! Fetches the monthly temperature-variance dataset, renders the year ×
//! month heatmap with its color legend, and writes SVG, HTML or PNG.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use heatmap_common::HeatmapError;
use renderer::OutputFormat;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use heatmap::{
    render_output, resolve_format, write_output, ChartConfig, DataLoader, DataSource,
    DEFAULT_DATA_URL,
};

#[derive(Parser, Debug)]
#[command(name = "heatmap")]
#[command(about = "Render the global monthly temperature heatmap")]
struct Args {
    /// Dataset URL
    #[arg(long, env = "HEATMAP_URL")]
    url: Option<String>,

    /// Read the dataset from a local JSON file instead of the network
    #[arg(short, long, env = "HEATMAP_INPUT", conflicts_with = "url")]
    input: Option<PathBuf>,

    /// Output file
    #[arg(short, long, env = "HEATMAP_OUTPUT", default_value = "heatmap.svg")]
    output: PathBuf,

    /// Output format (svg, html, png); inferred from the output extension if omitted
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Chart configuration YAML file
    #[arg(short, long, env = "HEATMAP_CONFIG")]
    config: Option<PathBuf>,

    /// HTTP request timeout in seconds (no timeout by default)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Pixel scale factor for PNG output
    #[arg(long, default_value = "1.0")]
    scale: f32,

    /// Log level
    #[arg(long, env = "HEATMAP_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

impl Args {
    fn source(&self) -> DataSource {
        match (&self.input, &self.url) {
            (Some(path), _) => DataSource::File(path.clone()),
            (None, Some(url)) => DataSource::Url(url.clone()),
            (None, None) => DataSource::Url(DEFAULT_DATA_URL.to_string()),
        }
    }
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

/// Which step of the run an error came from, for the failure log.
fn failure_stage(err: &anyhow::Error) -> &'static str {
    match err.downcast_ref::<HeatmapError>() {
        Some(e) if e.is_load_failure() => "load",
        Some(HeatmapError::Config(_)) => "config",
        Some(_) => "render",
        None => "setup",
    }
}

async fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => ChartConfig::load(path)?,
        None => ChartConfig::default(),
    };

    let source = args.source();
    let format = resolve_format(args.format, &args.output);
    info!(source = %source, output = %args.output.display(), format = format.extension(), "Rendering heatmap");

    let loader = DataLoader::new(args.timeout_secs.map(Duration::from_secs))?;
    let dataset = loader
        .load(&source)
        .await
        .with_context(|| format!("Failed to load dataset from {}", source))?;

    let bytes = render_output(&dataset, &config, format, args.scale)
        .context("Failed to render heatmap")?;
    write_output(&args.output, &bytes).await?;

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    if let Err(e) = init_tracing(&args.log_level, args.log_json) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let stage = failure_stage(&e);
            error!(stage, error = format!("{:#}", e), "Heatmap generation failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_failure_stage() {
        let load: Result<()> = Err(HeatmapError::Fetch("GET failed".into()))
            .context("Failed to load dataset from somewhere");
        assert_eq!(failure_stage(&load.unwrap_err()), "load");

        let parse = anyhow::Error::new(HeatmapError::Parse("bad".into()));
        assert_eq!(failure_stage(&parse), "load");

        let render = anyhow::Error::new(HeatmapError::Render("bad svg".into()));
        assert_eq!(failure_stage(&render), "render");

        assert_eq!(failure_stage(&anyhow::anyhow!("no such file")), "setup");
    }
}
