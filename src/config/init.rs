use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, Config, CtaConfig, WebhookConfig};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Print text with a typewriter effect, one character at a time.
fn typewriter(text: &str) {
    use std::thread;
    use std::time::Duration;
    for c in text.chars() {
        print!("{}", c);
        std::io::stdout().flush().ok();
        thread::sleep(Duration::from_millis(18));
    }
    println!();
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    typewriter("Palate Configuration Wizard");
    println!("===========================");
    println!();

    // 1. Webhook
    typewriter("When someone finishes the quiz and leaves their contact, palate can POST the lead to a webhook (Make, Zapier, n8n, your own endpoint).");
    typewriter("Leave the URL empty to skip delivery -- the quiz still works, contacts just aren't sent anywhere.");
    let webhook_url = prompt("Webhook URL (empty to skip): ")?;

    let webhook = if webhook_url.is_empty() {
        None
    } else {
        let source = prompt_with_default(
            "Source tag (sent with every payload, so you can tell quizzes apart)",
            "palate quiz",
        )?;
        let timeout = loop {
            let input = prompt_with_default("Request timeout", "10s")?;
            match humantime::parse_duration(&input) {
                Ok(_) => break input,
                Err(e) => println!("  Invalid duration: {}. Try again.", e),
            }
        };
        Some(WebhookConfig {
            url: webhook_url,
            source: Some(source),
            timeout: Some(timeout),
        })
    };

    // 2. Call to action
    println!();
    typewriter("The result screen can show a call-to-action link (a shop page, a WhatsApp chat, a booking form).");
    let cta = {
        let cta_url = prompt("Call-to-action URL (empty to skip): ")?;
        if cta_url.is_empty() {
            None
        } else {
            let label = prompt_with_default("Link label", "See the coffees made for you")?;
            Some(CtaConfig {
                url: cta_url,
                label: Some(label),
            })
        }
    };

    // 3. Questionnaire
    println!();
    typewriter("palate ships with a five-question coffee questionnaire over five sensory profiles.");
    typewriter("Writing it into the config gives you an editable starting point for your own questions; skipping keeps the file minimal and uses the built-in one.");
    let inline_questionnaire =
        prompt_yes_no("Write the built-in questionnaire into the config?", false)?;

    let mut config = Config {
        webhook,
        cta,
        ..Config::default()
    };
    if inline_questionnaire {
        config = config.with_builtin_questionnaire();
    }

    // 4. Config path
    let default_config_path = default_path.unwrap_or_else(get_config_path);
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    // Check if file already exists
    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 5. Write config
    let yaml = serde_saphyr::to_string(&config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(&config_path, &yaml)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!();
    println!("Config written to {}", config_path.display());
    typewriter("Edit the questions, profiles and wording any time -- `palate validate` checks the file before you put it in front of people.");
    println!("Run `palate` to take the quiz.");

    Ok(())
}
