//! Layered server configuration.
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults
//! 2. YAML file passed with `--config`
//! 3. environment variables `BARBERGATE__<SECTION>__<KEY>`
//! 4. CLI overrides (`--port`, `-v`)

use std::path::Path;

use access_control::AccessControlConfig;
use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use gatekit_auth::AuthConfig;
use registry_lookup::LookupsConfig;
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "BARBERGATE__";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    /// `rate_limits` and `directory` sections.
    #[serde(flatten)]
    pub access: AccessControlConfig,
    #[serde(default)]
    pub lookups: LookupsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Human,
        }
    }
}

impl AppConfig {
    /// Merge the optional YAML file and the environment over the serde defaults.
    ///
    /// # Errors
    /// Fails when the file is missing or any layer does not deserialize
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            anyhow::ensure!(path.is_file(), "config file does not exist: {}", path.display());
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("invalid configuration")
    }

    /// `verbose` maps to `info`, `debug`, `trace`; zero keeps the configured level.
    pub fn apply_cli_overrides(&mut self, port: Option<u16>, verbose: u8) {
        if let Some(port) = port {
            self.server.port = port;
        }
        let level = match verbose {
            0 => return,
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        self.logging.level = level.to_owned();
    }

    /// Effective configuration with secrets redacted.
    ///
    /// # Errors
    /// Fails only if serialization fails
    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to render configuration")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;

    #[test]
    fn yaml_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "server:\n  port: 9191\nauth:\n  secret: from-file\nrate_limits:\n  requests:\n    window_ms: 1000\n    max_requests: 3\nlookups:\n  timeout_ms: 1500\n"
        )
        .unwrap();

        let cfg = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(cfg.server.port, 9191);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.auth.secret.expose_secret(), "from-file");
        assert_eq!(cfg.access.rate_limits.requests.max_requests, 3);
        assert_eq!(cfg.access.rate_limits.login.max_requests, 5);
        assert_eq!(cfg.lookups.timeout_ms, 1500);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/definitely/not/here.yaml"))).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn cli_overrides_port_and_verbosity() {
        let mut cfg = AppConfig::default();
        cfg.apply_cli_overrides(None, 0);
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.server.port, 8080);

        cfg.apply_cli_overrides(Some(3000), 2);
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn rendered_config_hides_secret() {
        let cfg = AppConfig {
            auth: AuthConfig::with_secret("hunter2"),
            ..AppConfig::default()
        };
        let rendered = cfg.to_pretty_json().unwrap();
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("rate_limits"));
    }
}
