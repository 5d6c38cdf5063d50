use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// CLI state that survives between invocations (the token lives separately in credentials.json)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub current_user: Option<String>,
    /// Admin location the guard redirected away from, consumed by the next login
    pub return_to: Option<String>,
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("FOLIO_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("folio")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn credentials_path() -> anyhow::Result<PathBuf> {
    Ok(get_config_dir()?.join("credentials.json"))
}

pub fn load_environment_config() -> anyhow::Result<EnvironmentConfig> {
    let env_file = get_config_dir()?.join("env.json");

    if !env_file.exists() {
        return Ok(EnvironmentConfig::default());
    }

    let content = fs::read_to_string(env_file)?;
    let config: EnvironmentConfig = serde_json::from_str(&content)?;
    Ok(config)
}

pub fn save_environment_config(config: &EnvironmentConfig) -> anyhow::Result<()> {
    let env_file = get_config_dir()?.join("env.json");

    let content = serde_json::to_string_pretty(config)?;
    fs::write(env_file, content)?;
    Ok(())
}

/// Remember where the guard sent the user away from
pub fn record_return_to(location: &str) -> anyhow::Result<()> {
    let mut config = load_environment_config()?;
    config.return_to = Some(location.to_string());
    save_environment_config(&config)
}

/// Take the remembered location, clearing it
pub fn take_return_to() -> anyhow::Result<Option<String>> {
    let mut config = load_environment_config()?;
    let location = config.return_to.take();
    if location.is_some() {
        save_environment_config(&config)?;
    }
    Ok(location)
}
