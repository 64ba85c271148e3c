use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use camshake_core::{ShakeConfig, ShakeController};
use camshake_demo::harness::{KeyScript, simulate};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Fire camera shakes on scripted key presses and print every frame.
#[derive(Debug, Parser)]
#[command(name = "camshake-demo", version)]
struct Cli {
    /// TOML file with a `[default]` profile and `[presets.*]` tables.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Preset to shake with (default profile when omitted).
    #[arg(long)]
    preset: Option<String>,
    /// Simulated frame rate.
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Length of the simulation in seconds.
    #[arg(long, default_value_t = 2.0)]
    seconds: f32,
    /// Time (seconds) of a simulated key press. Repeatable.
    #[arg(long = "press", value_name = "SECS", default_values_t = [0.0])]
    presses: Vec<f32>,
    /// Seed for the noise source (random when omitted).
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.fps == 0 {
        tracing::error!("--fps must be > 0");
        return ExitCode::FAILURE;
    }

    let config = match &cli.config {
        Some(path) => match ShakeConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load shake config");
                return ExitCode::FAILURE;
            },
        },
        None => ShakeConfig::load(),
    };
    config.validate();

    let properties = match config.profile(cli.preset.as_deref()) {
        Ok(p) => p,
        Err(e) => {
            let known: Vec<&str> = config.presets.keys().map(String::as_str).collect();
            tracing::error!(error = %e, ?known, "Unknown preset");
            return ExitCode::FAILURE;
        },
    };

    let mut controller = match cli.seed {
        Some(seed) => ShakeController::from_seed(seed),
        None => ShakeController::from_entropy(),
    };
    let mut script = KeyScript::new(cli.presses);

    tracing::info!(
        preset = cli.preset.as_deref().unwrap_or("default"),
        fps = cli.fps,
        seconds = cli.seconds,
        presses = script.remaining(),
        "Camera shake demo starting"
    );

    let samples = simulate(&mut controller, properties, &mut script, cli.fps, cli.seconds);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for sample in &samples {
        let line = match cli.format {
            OutputFormat::Text => sample.to_text(),
            OutputFormat::Json => match serde_json::to_string(sample) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to encode frame sample");
                    return ExitCode::FAILURE;
                },
            },
        };
        // A closed pipe (e.g. `| head`) just ends the output.
        if writeln!(out, "{line}").is_err() {
            break;
        }
    }

    ExitCode::SUCCESS
}
