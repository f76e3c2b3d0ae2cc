//! Referat CLI entry point.

use anyhow::Result;
use clap::Parser;
use referat::cli::{commands, Cli, Commands};
use referat::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("referat={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Ensure data directories exist
    std::fs::create_dir_all(settings.data_dir())?;
    std::fs::create_dir_all(settings.upload_dir())?;

    // Execute command
    match &cli.command {
        Commands::Init => {
            commands::run_init(&settings)?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Transcribe { input, output } => {
            commands::run_transcribe(input, output.clone(), settings).await?;
        }

        Commands::Generate {
            transcript,
            output,
            markdown,
        } => {
            commands::run_generate(transcript, output.clone(), markdown.clone(), settings).await?;
        }

        Commands::Preview {
            minutes,
            redacted,
            format,
            output,
        } => {
            commands::run_preview(minutes, *redacted, format, output.clone(), settings)?;
        }

        Commands::Share {
            minutes,
            internal,
            external,
            summary,
            transcript,
        } => {
            commands::run_share(
                minutes,
                internal,
                external,
                summary.clone(),
                transcript.clone(),
                settings,
            )
            .await?;
        }

        Commands::Meetings => {
            commands::run_meetings(settings).await?;
        }

        Commands::Serve { host, port } => {
            commands::run_serve(host, *port, settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}
