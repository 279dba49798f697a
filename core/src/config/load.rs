use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default fintrack data directory: ~/.fintrack
pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".fintrack"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.fintrack/config.toml (highest)
    let data_dir = get_data_dir()?;
    let user_config = data_dir.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let mut cfg: AppConfig = if user_config.exists() {
        let s = std::fs::read_to_string(&user_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else if local_config.exists() {
        let s = std::fs::read_to_string(local_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else {
        AppConfig::default()
    };

    // Root persisted records under the data directory unless configured.
    if cfg
        .storage
        .directory
        .as_ref()
        .map(|s| s.trim().is_empty())
        .unwrap_or(true)
    {
        std::fs::create_dir_all(&data_dir)?;
        cfg.storage.directory = Some(data_dir.to_string_lossy().to_string());
    }

    // Environment variable overrides (Priority 0: highest)
    if let Ok(v) = std::env::var("FINTRACK_API_URL") {
        if !v.trim().is_empty() {
            cfg.api.base_url = v;
        }
    }
    if let Ok(v) = std::env::var("FINTRACK_LOG_LEVEL") {
        if !v.trim().is_empty() {
            cfg.logging.level = v;
        }
    }

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api.base_url, "http://localhost:3000");
        assert_eq!(cfg.api.timeout_ms, 30_000);
        assert!(cfg.logging.console);
    }

    #[test]
    fn partial_toml_fills_missing_sections() {
        let cfg: AppConfig = toml::from_str("[api]\nbase_url = \"https://api.example.com\"\n")
            .expect("parse");
        assert_eq!(cfg.api.base_url, "https://api.example.com");
        assert_eq!(cfg.api.timeout_ms, 30_000);
        assert_eq!(cfg.logging.level, "info");
    }
}
