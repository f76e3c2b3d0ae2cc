//! Init command - interactive first-run setup.

use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::io::{self, Write};

/// Run the init command for first-time setup.
pub fn run_init(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Referat Setup");
    println!();
    println!("Welcome to Referat! Let's make sure everything is configured correctly.\n");

    // Step 1: Check API keys
    println!("{}", style("Step 1: Checking API configuration").bold().cyan());
    println!();

    let mut missing_keys = Vec::new();
    for (key, purpose) in [
        ("DIARIZATION_API_KEY", "speaker-diarized transcription"),
        ("OPENAI_API_KEY", "minutes generation"),
    ] {
        if std::env::var(key).map(|v| v.is_empty()).unwrap_or(true) {
            missing_keys.push((key, purpose));
        }
    }

    if missing_keys.is_empty() {
        Output::success("Required API keys are configured!");
    } else {
        Output::warning("Some API keys are missing:");
        println!();
        for (key, purpose) in &missing_keys {
            println!(
                "  {} {} - needed for {}",
                style("✗").red(),
                style(key).bold(),
                purpose
            );
            println!(
                "    {} {}",
                style("→").dim(),
                style(format!("export {}='...'", key)).dim()
            );
        }
        println!();

        if !prompt_continue("Continue anyway?")? {
            println!();
            Output::info("Setup cancelled. Set the missing keys and run 'referat init' again.");
            return Ok(());
        }
    }

    println!();

    // Step 2: Create directories
    println!("{}", style("Step 2: Setting up directories").bold().cyan());
    println!();

    let data_dir = settings.data_dir();
    let upload_dir = settings.upload_dir();

    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
        Output::success(&format!("Created data directory: {}", data_dir.display()));
    } else {
        Output::info(&format!("Data directory exists: {}", data_dir.display()));
    }

    if !upload_dir.exists() {
        std::fs::create_dir_all(&upload_dir)?;
        Output::success(&format!("Created upload directory: {}", upload_dir.display()));
    } else {
        Output::info(&format!("Upload directory exists: {}", upload_dir.display()));
    }

    println!();

    // Step 3: Create config file
    println!("{}", style("Step 3: Configuration file").bold().cyan());
    println!();

    let config_path = Settings::default_config_path();
    if config_path.exists() {
        Output::info(&format!("Config file exists: {}", config_path.display()));
    } else if prompt_continue("Create default configuration file?")? {
        settings.save_to(&config_path)?;
        Output::success(&format!("Created config file: {}", config_path.display()));
        println!();
        println!(
            "  Edit your config with: {}",
            style("referat config edit").green()
        );
    } else {
        Output::info("Skipped config file creation. Using defaults.");
    }

    println!();

    // Summary
    println!("{}", style("Setup Complete!").bold().green());
    println!();
    println!("Next steps:");
    println!("  {} Check system status", style("referat doctor").cyan());
    println!(
        "  {} Transcribe a recording",
        style("referat transcribe <file>").cyan()
    );
    println!(
        "  {} Generate minutes from a transcript",
        style("referat generate <transcript>").cyan()
    );
    println!();
    println!("For more help: {}", style("referat --help").cyan());

    Ok(())
}

/// Prompt user for yes/no confirmation.
fn prompt_continue(message: &str) -> io::Result<bool> {
    print!("{} {} ", style("?").cyan(), message);
    print!("{} ", style("[y/N]").dim());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_lowercase() == "y" || input.trim().to_lowercase() == "yes")
}
