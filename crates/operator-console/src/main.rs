//! RUL Operator Console
//!
//! Generates sample sensor windows and requests RUL predictions, either from
//! an in-process engine or from a running gateway.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use inference_engine::{load_artifacts, ArtifactPaths, InferenceEngine};
use operator_console::{render, Backend, Command, ConsoleError, GatewayClient, Session};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::warn;
use tracing_subscriber::EnvFilter;

const GAUGE_WIDTH: usize = 41;

/// Where predictions are computed
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Load the model into this process
    Local,
    /// Call a running gateway over HTTP
    Remote,
}

/// Turbofan RUL operator console
#[derive(Parser)]
#[command(name = "rul-console")]
#[command(author, version, about = "Operator console for turbofan RUL predictions", long_about = None)]
struct Cli {
    /// Prediction backend
    #[arg(long, value_enum, env = "RUL_CONSOLE_MODE", default_value = "remote")]
    mode: Mode,

    /// Gateway URL for remote mode
    #[arg(long, env = "RUL_CONSOLE_GATEWAY_URL", default_value = "http://127.0.0.1:8000")]
    gateway_url: String,

    /// Artifact directory for local mode
    #[arg(long, env = "RUL_CONSOLE_MODEL_DIR", default_value = "models")]
    model_dir: PathBuf,

    /// ONNX model file name for local mode
    #[arg(long, default_value = "lstm_model.onnx")]
    model_file: String,

    /// Scaler file name for local mode
    #[arg(long, default_value = "scaler.json")]
    scaler_file: String,

    /// Scale readings before local inference. Local mode only; set it to
    /// match the gateway's `apply_scaler` so both paths agree.
    #[arg(long, env = "RUL_CONSOLE_APPLY_SCALER")]
    apply_scaler: bool,

    /// Initial engine ID
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=999))]
    engine_id: u32,

    /// Seed for reproducible sample windows
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    let backend = build_backend(&cli)?;
    let mut session = match cli.seed {
        Some(seed) => Session::seeded(cli.engine_id, seed)?,
        None => Session::new(cli.engine_id)?,
    };

    println!("{}", "Industrial IoT Predictive Maintenance Console".bold());
    println!("Predict Remaining Useful Life (RUL) using sensor time-series data");
    println!("Backend: {}   Engine ID: {}", backend.describe(), session.engine_id());
    println!("{}", Command::help());

    run_loop(&backend, &mut session).await
}

fn build_backend(cli: &Cli) -> Result<Backend> {
    match cli.mode {
        Mode::Local => {
            let paths = ArtifactPaths::new(&cli.model_dir, &cli.model_file, &cli.scaler_file);
            let artifacts = load_artifacts(&paths).context("Error loading model/scaler")?;
            let engine = InferenceEngine::from_artifacts(artifacts, cli.apply_scaler);
            Ok(Backend::Local(Arc::new(engine)))
        }
        Mode::Remote => {
            if ignores_apply_scaler(cli) {
                warn!("--apply-scaler has no effect in remote mode; the gateway's apply_scaler setting is used");
            }
            Ok(Backend::Remote(GatewayClient::new(&cli.gateway_url)?))
        }
    }
}

/// The scaler flag only reaches a local engine
fn ignores_apply_scaler(cli: &Cli) -> bool {
    matches!(cli.mode, Mode::Remote) && cli.apply_scaler
}

async fn run_loop(backend: &Backend, session: &mut Session) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"rul> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(hint) => {
                print_warning(&hint);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{}", Command::help()),
            Command::Generate => {
                let window = session.generate_sample()?;
                print_success("Generated sample sensor data");
                print!("{}", render::render_trends(window));
            }
            Command::Show => match session.window() {
                Some(window) => print!("{}", render::render_trends(window)),
                None => print_warning(&ConsoleError::NoData.to_string()),
            },
            Command::Engine(id) => match session.set_engine_id(id) {
                Ok(()) => print_success(&format!("Engine ID set to {}", session.engine_id())),
                Err(e) => print_warning(&e.to_string()),
            },
            Command::Health => match backend {
                Backend::Remote(client) => match client.liveness().await {
                    Ok(liveness) => print_success(&liveness.status),
                    Err(e) => print_error(&e.to_string()),
                },
                Backend::Local(_) => print_success("Local engine loaded"),
            },
            Command::Predict => match session.request_prediction(backend).await {
                Ok(result) => {
                    print!("{}", render::render_summary(&result));
                    print!("{}", render::render_gauge(result.predicted_rul, GAUGE_WIDTH));
                }
                Err(ConsoleError::NoData) => print_warning(&ConsoleError::NoData.to_string()),
                Err(e) => print_error(&e.to_string()),
            },
        }
    }

    println!("Bye");
    Ok(())
}

fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}
