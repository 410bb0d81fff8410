//! Subcommand implementations and shared config loading.

pub mod call;
pub mod serve;
pub mod tools;

use std::path::{Path, PathBuf};

use anyhow::Context;
use mediapost_types::GatewayConfig;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "MEDIAPOST_CONFIG";

/// Load the gateway configuration.
///
/// Lookup order: `config_override`, then `$MEDIAPOST_CONFIG`, then
/// `~/.mediapost/config.json` if it exists. Without a file the defaults
/// are used. Environment overrides are applied last.
pub async fn load_config(config_override: Option<&str>) -> anyhow::Result<GatewayConfig> {
    let path = match config_override {
        Some(path_str) => {
            let path = PathBuf::from(path_str);
            if !path.exists() {
                anyhow::bail!("config file not found: {path_str}");
            }
            Some(path)
        }
        None => discover_config_path(std::env::var(CONFIG_ENV).ok(), dirs::home_dir()),
    };

    let mut config = match path {
        Some(path) => read_config(&path).await?,
        None => GatewayConfig::default(),
    };
    config.apply_env_overrides();
    Ok(config)
}

/// Find the config file from an explicit env value or the home directory.
pub fn discover_config_path(env_value: Option<String>, home: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = env_value.filter(|p| !p.trim().is_empty()) {
        return Some(PathBuf::from(path));
    }
    home.map(|h| h.join(".mediapost").join("config.json"))
        .filter(|p| p.is_file())
}

async fn read_config(path: &Path) -> anyhow::Result<GatewayConfig> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_value_wins_over_home() {
        let home = tempfile::tempdir().unwrap();
        let found = discover_config_path(Some("/etc/mediapost.json".into()), Some(home.path().into()));
        assert_eq!(found, Some(PathBuf::from("/etc/mediapost.json")));
    }

    #[test]
    fn home_config_used_only_if_present() {
        let home = tempfile::tempdir().unwrap();
        assert_eq!(discover_config_path(None, Some(home.path().into())), None);

        let dir = home.path().join(".mediapost");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.json"), "{}").unwrap();
        assert_eq!(
            discover_config_path(None, Some(home.path().into())),
            Some(dir.join("config.json"))
        );
    }

    #[test]
    fn blank_env_value_is_ignored() {
        assert_eq!(discover_config_path(Some("  ".into()), None), None);
    }

    #[tokio::test]
    async fn explicit_config_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"userAgent": "ua/1", "endpoints": {"twitter": "http://localhost:9"}}"#,
        )
        .unwrap();

        let config = load_config(path.to_str()).await.unwrap();
        assert_eq!(config.user_agent, "ua/1");
        assert_eq!(config.endpoints.twitter, "http://localhost:9");
    }

    #[tokio::test]
    async fn missing_explicit_config_is_an_error() {
        let err = load_config(Some("/nonexistent/mediapost.json")).await.unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[tokio::test]
    async fn invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = load_config(path.to_str()).await.unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }
}
