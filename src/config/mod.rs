mod init;
mod schema;

pub use init::run_init_wizard;
pub use schema::{Config, CtaConfig, OptionConfig, ProfileConfig, QuestionConfig, StringsConfig, WebhookConfig};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/palate/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Could not determine home directory");
    home.join(".config").join("palate")
}

/// Get the default config file path (~/.config/palate/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file.
///
/// With an explicit `path`, the file must exist. With the default path, a
/// missing file is not an error: the quiz runs with the built-in
/// questionnaire and no webhook.
///
/// # Errors
///
/// Returns an error if an explicitly given file does not exist, a file
/// cannot be read, or the YAML cannot be parsed.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let (config_path, explicit) = match path {
        Some(p) => (p, true),
        None => (get_config_path(), false),
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}
