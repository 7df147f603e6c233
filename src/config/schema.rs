use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

// ── Top-level config ──────────────────────────────────────────────

/// Top-level Kumbuk configuration, loaded from `config.toml`.
///
/// Resolution order: `KUMBUK_CONFIG_DIR` env → `~/.kumbuk/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed at load time, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Gateway server configuration (`[server]`).
    #[serde(default)]
    pub server: ServerConfig,

    /// Agent behavior knobs (`[agents]`).
    #[serde(default)]
    pub agents: AgentsConfig,

    /// Session store configuration (`[sessions]`).
    #[serde(default)]
    pub sessions: SessionsConfig,

    /// External integration endpoints (`[integrations]`). Read at startup but
    /// unused by the in-memory pipeline; reserved for the graph and realtime
    /// backends.
    #[serde(default)]
    pub integrations: IntegrationsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            server: ServerConfig::default(),
            agents: AgentsConfig::default(),
            sessions: SessionsConfig::default(),
            integrations: IntegrationsConfig::default(),
        }
    }
}

// ── Server ────────────────────────────────────────────────────────

/// Gateway server configuration (`[server]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host (default: 127.0.0.1)
    #[serde(default = "default_server_host")]
    pub host: String,
    /// Bind port (default: 8000)
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Whole-request timeout applied by the gateway, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_server_host() -> String {
    "127.0.0.1".into()
}

fn default_server_port() -> u16 {
    8000
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            max_body_bytes: default_max_body_bytes(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

// ── Agents ────────────────────────────────────────────────────────

/// Agent behavior configuration (`[agents]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentsConfig {
    /// Number of top-ranked providers returned as recommendations. Default: `3`.
    #[serde(default = "default_top_recommendations")]
    pub top_recommendations: usize,
    /// Default role assumed for callers that don't declare one. Default: `"consumer"`.
    #[serde(default = "default_user_role")]
    pub default_user_role: String,
}

fn default_top_recommendations() -> usize {
    3
}

fn default_user_role() -> String {
    "consumer".into()
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            top_recommendations: default_top_recommendations(),
            default_user_role: default_user_role(),
        }
    }
}

// ── Sessions ──────────────────────────────────────────────────────

/// Session store configuration (`[sessions]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionsConfig {
    /// Maximum history entries returned per session query. Default: `50`.
    /// The store itself is append-only and never evicts.
    #[serde(default = "default_max_history_entries")]
    pub max_history_entries: usize,
}

fn default_max_history_entries() -> usize {
    50
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            max_history_entries: default_max_history_entries(),
        }
    }
}

// ── Integrations ──────────────────────────────────────────────────

/// External integration configuration (`[integrations]` section).
///
/// All fields are optional and currently unused by the in-memory pipeline.
/// They are populated from the conventional env vars so a deployment can
/// declare its backends before a real implementation lands.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntegrationsConfig {
    /// Google Cloud project for the semantic-analysis backend (`GOOGLE_CLOUD_PROJECT`).
    #[serde(default)]
    pub google_cloud_project: Option<String>,
    /// Graph database URI for the service ontology (`NEO4J_URI`).
    #[serde(default)]
    pub graph_uri: Option<String>,
    /// Realtime database URL for push updates (`FIREBASE_DATABASE_URL`).
    #[serde(default)]
    pub realtime_database_url: Option<String>,
    /// Signing secret for future authenticated sessions (`JWT_SECRET_KEY`).
    #[serde(default)]
    pub jwt_secret: Option<String>,
}

// ── Loading ───────────────────────────────────────────────────────

impl Config {
    /// Resolve the config directory: `KUMBUK_CONFIG_DIR` env wins, then
    /// `~/.kumbuk`, then a `.kumbuk` directory next to the process.
    pub fn config_dir() -> PathBuf {
        if let Ok(dir) = std::env::var("KUMBUK_CONFIG_DIR") {
            if !dir.trim().is_empty() {
                return PathBuf::from(dir);
            }
        }
        UserDirs::new()
            .map(|dirs| dirs.home_dir().join(".kumbuk"))
            .unwrap_or_else(|| PathBuf::from(".kumbuk"))
    }

    /// Load the config file, writing a default one on first run.
    pub async fn load_or_init() -> Result<Self> {
        Self::load_from(&Self::config_dir()).await
    }

    /// Load (or initialize) the config under an explicit directory.
    pub async fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join("config.toml");

        if fs::try_exists(&path).await.unwrap_or(false) {
            let raw = fs::read_to_string(&path)
                .await
                .with_context(|| format!("failed to read config at {}", path.display()))?;
            let mut config: Config = toml::from_str(&raw)
                .with_context(|| format!("invalid config at {}", path.display()))?;
            config.config_path = path;
            Ok(config)
        } else {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("failed to create config dir {}", dir.display()))?;
            let mut config = Config::default();
            config.config_path = path.clone();
            let rendered =
                toml::to_string_pretty(&config).context("failed to render default config")?;
            fs::write(&path, rendered)
                .await
                .with_context(|| format!("failed to write default config to {}", path.display()))?;
            Ok(config)
        }
    }

    /// Apply environment overrides on top of the file config.
    ///
    /// `KUMBUK_HOST` / `KUMBUK_PORT` override the server binding; the
    /// integration endpoints come from their conventional variable names.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("KUMBUK_HOST") {
            if !host.trim().is_empty() {
                self.server.host = host;
            }
        }
        if let Ok(port) = std::env::var("KUMBUK_PORT") {
            match port.parse::<u16>() {
                Ok(parsed) => self.server.port = parsed,
                Err(_) => tracing::warn!("ignoring non-numeric KUMBUK_PORT={port}"),
            }
        }

        override_from_env(
            &mut self.integrations.google_cloud_project,
            "GOOGLE_CLOUD_PROJECT",
        );
        override_from_env(&mut self.integrations.graph_uri, "NEO4J_URI");
        override_from_env(
            &mut self.integrations.realtime_database_url,
            "FIREBASE_DATABASE_URL",
        );
        override_from_env(&mut self.integrations.jwt_secret, "JWT_SECRET_KEY");
    }
}

fn override_from_env(slot: &mut Option<String>, var: &str) {
    if let Ok(value) = std::env::var(var) {
        if !value.trim().is_empty() {
            *slot = Some(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.agents.top_recommendations, 3);
        assert_eq!(config.agents.default_user_role, "consumer");
        assert_eq!(config.sessions.max_history_entries, 50);
        assert!(config.integrations.graph_uri.is_none());
    }

    #[test]
    fn empty_toml_parses_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.sessions.max_history_entries, 50);
    }

    #[test]
    fn partial_sections_fill_in_defaults() {
        let config: Config = toml::from_str("[server]\nport = 9001\n").unwrap();
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.agents.top_recommendations, 3);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = Config::default();
        config.server.port = 8080;
        config.integrations.graph_uri = Some("bolt://localhost:7687".into());

        let rendered = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.server.port, 8080);
        assert_eq!(
            parsed.integrations.graph_uri.as_deref(),
            Some("bolt://localhost:7687")
        );
    }

    #[tokio::test]
    async fn load_from_writes_default_config_on_first_run() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_from(tmp.path()).await.unwrap();
        assert_eq!(config.server.port, 8000);
        assert!(config.config_path.exists());

        // Second load reads the file that was just written.
        let reloaded = Config::load_from(tmp.path()).await.unwrap();
        assert_eq!(reloaded.server.host, config.server.host);
    }
}
