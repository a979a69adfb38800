use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::job_store::DEFAULT_KEY_PREFIX;

/// Key-value store connection (`[store]` in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Redis connection URL.
    pub url: String,
    /// Namespace for every key the job store writes.
    pub key_prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}

/// External download tool (`[tool]` in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Executable name or path (you-get compatible CLI).
    pub program: String,
    /// Cookie jar passed with `-c`, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie_file: Option<PathBuf>,
    /// Download directory passed with `-o`; the tool's cwd when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Upper bound on a metadata probe before it is killed.
    pub probe_timeout_secs: u64,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: "you-get".to_string(),
            cookie_file: None,
            output_dir: None,
            probe_timeout_secs: 300,
        }
    }
}

/// Queue janitor schedule (`[janitor]` in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JanitorConfig {
    pub interval_secs: u64,
}

impl Default for JanitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: 24 * 60 * 60,
        }
    }
}

/// Global configuration loaded from `~/.config/vidq/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VidqConfig {
    pub store: StoreConfig,
    pub tool: ToolConfig,
    pub janitor: JanitorConfig,
}

impl VidqConfig {
    /// Apply the deployment environment variables on top of the file values.
    ///
    /// `REDIS_HOST`/`REDIS_PORT`/`REDIS_PASSWORD` rebuild the store URL when any
    /// is set; `DOWNLOAD_DIR` and `COOKIE_FILE` override the tool paths.
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = var("REDIS_HOST");
        let port = var("REDIS_PORT");
        let password = var("REDIS_PASSWORD").filter(|p| !p.is_empty());
        if host.is_some() || port.is_some() || password.is_some() {
            let host = host.unwrap_or_else(|| "localhost".to_string());
            let port = port.unwrap_or_else(|| "6379".to_string());
            self.store.url = match password {
                Some(pw) => format!("redis://:{pw}@{host}:{port}"),
                None => format!("redis://{host}:{port}"),
            };
        }
        if let Some(dir) = var("DOWNLOAD_DIR").filter(|d| !d.is_empty()) {
            self.tool.output_dir = Some(PathBuf::from(dir));
        }
        if let Some(cookies) = var("COOKIE_FILE").filter(|c| !c.is_empty()) {
            self.tool.cookie_file = Some(PathBuf::from(cookies));
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vidq")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from `path`, writing defaults there if it does not exist.
pub fn load_or_init_at(path: &Path) -> Result<VidqConfig> {
    if !path.exists() {
        let default_cfg = VidqConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: VidqConfig = toml::from_str(&data)?;
    Ok(cfg)
}

/// Load configuration from the XDG config dir plus environment overrides.
pub fn load_or_init() -> Result<VidqConfig> {
    let mut cfg = load_or_init_at(&config_path()?)?;
    cfg.apply_env(|k| std::env::var(k).ok());
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_values() {
        let cfg = VidqConfig::default();
        assert_eq!(cfg.store.url, "redis://localhost:6379");
        assert_eq!(cfg.store.key_prefix, "piapi.youget");
        assert_eq!(cfg.tool.program, "you-get");
        assert_eq!(cfg.tool.probe_timeout_secs, 300);
        assert_eq!(cfg.janitor.interval_secs, 86_400);
        assert!(cfg.tool.cookie_file.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = VidqConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: VidqConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_partial_sections() {
        let toml = r#"
            [tool]
            program = "/usr/local/bin/you-get"
            cookie_file = "/data/cookies.txt"

            [janitor]
            interval_secs = 3600
        "#;
        let cfg: VidqConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.tool.program, "/usr/local/bin/you-get");
        assert_eq!(
            cfg.tool.cookie_file.as_deref(),
            Some(Path::new("/data/cookies.txt"))
        );
        assert_eq!(cfg.tool.probe_timeout_secs, 300);
        assert_eq!(cfg.janitor.interval_secs, 3600);
        assert_eq!(cfg.store, StoreConfig::default());
    }

    #[test]
    fn env_overrides_store_and_tool() {
        let env: HashMap<&str, &str> = [
            ("REDIS_HOST", "cache"),
            ("REDIS_PASSWORD", "s3cret"),
            ("DOWNLOAD_DIR", "/downloads"),
        ]
        .into_iter()
        .collect();
        let mut cfg = VidqConfig::default();
        cfg.apply_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.store.url, "redis://:s3cret@cache:6379");
        assert_eq!(cfg.tool.output_dir.as_deref(), Some(Path::new("/downloads")));
        assert!(cfg.tool.cookie_file.is_none());
    }

    #[test]
    fn env_without_redis_vars_keeps_url() {
        let mut cfg = VidqConfig::default();
        cfg.store.url = "redis://other:7000".to_string();
        cfg.apply_env(|_| None);
        assert_eq!(cfg.store.url, "redis://other:7000");
    }

    #[test]
    fn load_or_init_writes_defaults_then_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let first = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(first, VidqConfig::default());

        fs::write(&path, "[janitor]\ninterval_secs = 60\n").unwrap();
        let second = load_or_init_at(&path).unwrap();
        assert_eq!(second.janitor.interval_secs, 60);
    }
}
