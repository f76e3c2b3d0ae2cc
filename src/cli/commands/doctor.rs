//! Doctor command - verify configuration and environment.

use crate::cli::Output;
use crate::config::Settings;
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Referat Doctor");
    println!();
    println!("Checking configuration and environment...\n");

    let mut checks = Vec::new();

    // API keys
    println!("{}", style("API Configuration").bold());
    let key_checks = vec![
        check_required_key("DIARIZATION_API_KEY", "transcription will not work"),
        check_openai_api_key(),
        check_optional_key("EMAIL_PASSWORD", "mail delivery"),
        check_optional_key("PERSISTENCE_API_KEY", "persistence"),
    ];
    for check in &key_checks {
        check.print();
    }
    checks.extend(key_checks);

    println!();

    // Mail settings
    println!("{}", style("Mail").bold());
    let mail_check = if settings.mail.smtp_server.is_empty() || settings.mail.sender.is_empty() {
        CheckResult::warning(
            "SMTP",
            "not configured",
            "Set mail.smtp_server and mail.sender in the config file to share minutes",
        )
    } else {
        CheckResult::ok(
            "SMTP",
            &format!(
                "{}:{} as {}",
                settings.mail.smtp_server, settings.mail.smtp_port, settings.mail.sender
            ),
        )
    };
    mail_check.print();
    checks.push(mail_check);

    println!();

    // Persistence settings
    println!("{}", style("Persistence").bold());
    let persistence_check = if !settings.persistence.enabled {
        CheckResult::ok("Meeting store", "disabled")
    } else if settings.persistence.base_url.is_empty() {
        CheckResult::error(
            "Meeting store",
            "enabled but persistence.base_url is empty",
            "Set persistence.base_url in the config file",
        )
    } else {
        CheckResult::ok("Meeting store", &settings.persistence.base_url)
    };
    persistence_check.print();
    checks.push(persistence_check);

    println!();

    // Directories and config file
    println!("{}", style("Directories").bold());
    let dir_checks = check_directories(settings);
    for check in &dir_checks {
        check.print();
    }
    checks.extend(dir_checks);

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file();
    config_check.print();
    checks.push(config_check);

    println!();

    // Summary
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Referat.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Referat is ready to use.");
    }

    Ok(())
}

fn check_required_key(name: &str, consequence: &str) -> CheckResult {
    match std::env::var(name) {
        Ok(key) if !key.is_empty() => CheckResult::ok(name, "configured"),
        _ => CheckResult::error(
            name,
            &format!("not set ({})", consequence),
            &format!("Set with: export {}='...'", name),
        ),
    }
}

fn check_optional_key(name: &str, purpose: &str) -> CheckResult {
    match std::env::var(name) {
        Ok(key) if !key.is_empty() => CheckResult::ok(name, "configured"),
        _ => CheckResult::warning(
            name,
            "not set",
            &format!("Needed for {}: export {}='...'", purpose, name),
        ),
    }
}

/// Check if OpenAI API key is configured.
fn check_openai_api_key() -> CheckResult {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if key.starts_with("sk-") && key.len() > 20 => {
            let masked = format!("{}...{}", &key[..7], &key[key.len() - 4..]);
            CheckResult::ok("OPENAI_API_KEY", &format!("configured ({})", masked))
        }
        Ok(key) if key.is_empty() => CheckResult::error(
            "OPENAI_API_KEY",
            "empty",
            "Set with: export OPENAI_API_KEY='sk-...'",
        ),
        Ok(_) => CheckResult::warning(
            "OPENAI_API_KEY",
            "set but format looks unusual",
            "Expected format: sk-... (OpenAI API key)",
        ),
        Err(_) => CheckResult::error(
            "OPENAI_API_KEY",
            "not set",
            "Set with: export OPENAI_API_KEY='sk-...'",
        ),
    }
}

/// Check data directories.
fn check_directories(settings: &Settings) -> Vec<CheckResult> {
    let mut results = Vec::new();

    for (name, dir) in [
        ("Data directory", settings.data_dir()),
        ("Upload directory", settings.upload_dir()),
    ] {
        if dir.exists() {
            results.push(CheckResult::ok(name, &format!("{}", dir.display())));
        } else {
            results.push(CheckResult::warning(
                name,
                &format!("{} (will be created)", dir.display()),
                "Directory will be created on first use",
            ));
        }
    }

    results
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: referat init (or referat config edit)",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn test_check_result_error() {
        let result = CheckResult::error("test", "failed", "fix it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("fix it".to_string()));
    }
}
