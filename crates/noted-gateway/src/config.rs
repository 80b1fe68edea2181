//! Gateway settings: defaults, an optional YAML file, then flags and
//! environment variables.
//!
//! ```yaml
//! port: 8080
//! env: development
//! accounts_service_addr: localhost:3001
//! notes_service_addr: localhost:3002
//! recommendations_service_addr: localhost:3003
//! rpc_timeout_secs: 10
//! connect_timeout_secs: 5
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use serde::Deserialize;

/// Failure to produce a usable configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML for [`GatewayConfig`].
    #[error("invalid config file: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// A backend address is not a valid URI.
    #[error("invalid backend address '{addr}': {source}")]
    InvalidBackendAddress {
        addr: String,
        #[source]
        source: tonic::transport::Error,
    },
}

/// Deployment flavor; selects the log format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// JSON log lines.
    #[default]
    Production,
    /// Compact human-readable log lines.
    Development,
}

/// Resolved gateway settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub port: u16,
    pub env: Environment,
    pub accounts_service_addr: String,
    pub notes_service_addr: String,
    pub recommendations_service_addr: String,
    /// Deadline for every backend call.
    pub rpc_timeout_secs: u64,
    /// Deadline for establishing a backend connection.
    pub connect_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            env: Environment::Production,
            accounts_service_addr: "accounts:3000".to_owned(),
            notes_service_addr: "notes:3000".to_owned(),
            recommendations_service_addr: "recommendations:3000".to_owned(),
            rpc_timeout_secs: 10,
            connect_timeout_secs: 5,
        }
    }
}

impl GatewayConfig {
    /// Load from a YAML file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file can't be read, [`ConfigError::Yaml`]
    /// if it doesn't parse.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_yaml_ng::from_str(&content)?)
    }

    #[must_use]
    pub const fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }

    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Listen on every interface.
    #[must_use]
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

/// RESTful JSON gateway in front of the noted gRPC backends.
#[derive(Debug, Default, Parser)]
#[command(name = "api-gateway", version, about)]
pub struct Cli {
    /// YAML config file. Flags and environment variables override its values.
    #[arg(long, env = "API_GATEWAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Port to listen on [default: 3000].
    #[arg(short, long, env = "API_GATEWAY_PORT")]
    pub port: Option<u16>,

    /// Runtime environment [default: production].
    #[arg(short, long, value_enum, env = "API_GATEWAY_ENV")]
    pub env: Option<Environment>,

    /// Address of the accounts service [default: accounts:3000].
    #[arg(long, env = "API_GATEWAY_ACCOUNTS_SERVICE_ADDR")]
    pub accounts_service_addr: Option<String>,

    /// Address of the notes service [default: notes:3000].
    #[arg(long, env = "API_GATEWAY_NOTES_SERVICE_ADDR")]
    pub notes_service_addr: Option<String>,

    /// Address of the recommendations service [default: recommendations:3000].
    #[arg(long, env = "API_GATEWAY_RECOMMENDATIONS_SERVICE_ADDR")]
    pub recommendations_service_addr: Option<String>,

    /// Per-call deadline in seconds [default: 10].
    #[arg(long, env = "API_GATEWAY_RPC_TIMEOUT_SECS")]
    pub rpc_timeout_secs: Option<u64>,

    /// Connection deadline in seconds [default: 5].
    #[arg(long, env = "API_GATEWAY_CONNECT_TIMEOUT_SECS")]
    pub connect_timeout_secs: Option<u64>,
}

impl Cli {
    /// Defaults, overridden by the config file, overridden by flags.
    ///
    /// # Errors
    ///
    /// Any error from [`GatewayConfig::load`].
    pub fn resolve(self) -> Result<GatewayConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => GatewayConfig::load(path)?,
            None => GatewayConfig::default(),
        };

        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(env) = self.env {
            config.env = env;
        }
        if let Some(addr) = self.accounts_service_addr {
            config.accounts_service_addr = addr;
        }
        if let Some(addr) = self.notes_service_addr {
            config.notes_service_addr = addr;
        }
        if let Some(addr) = self.recommendations_service_addr {
            config.recommendations_service_addr = addr;
        }
        if let Some(secs) = self.rpc_timeout_secs {
            config.rpc_timeout_secs = secs;
        }
        if let Some(secs) = self.connect_timeout_secs {
            config.connect_timeout_secs = secs;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{name}-{}.yaml", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn empty_yaml_is_all_defaults() {
        let config: GatewayConfig = serde_yaml_ng::from_str("{}").unwrap();
        assert_eq!(config, GatewayConfig::default());
        assert_eq!(config.rpc_timeout(), Duration::from_secs(10));
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn load_from_file() {
        let path = write_temp(
            "gateway-config",
            indoc! {"
                port: 8080
                env: development
                notes_service_addr: localhost:4000
            "},
        );

        let config = GatewayConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.port, 8080);
        assert_eq!(config.env, Environment::Development);
        assert_eq!(config.notes_service_addr, "localhost:4000");
        assert_eq!(config.accounts_service_addr, "accounts:3000");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = GatewayConfig::load(Path::new("/nonexistent/gateway.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/gateway.yaml"));
    }

    #[test]
    fn bad_yaml_is_rejected() {
        let path = write_temp("gateway-config-bad", "port: [not, a, port]\n");
        let err = GatewayConfig::load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn flags_override_file_values() {
        let path = write_temp(
            "gateway-config-override",
            indoc! {"
                port: 8080
                rpc_timeout_secs: 30
            "},
        );

        let cli = Cli::try_parse_from([
            "api-gateway",
            "--config",
            path.to_str().unwrap(),
            "--port",
            "9000",
            "--env",
            "development",
        ])
        .unwrap();
        let config = cli.resolve().unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.port, 9000);
        assert_eq!(config.env, Environment::Development);
        assert_eq!(config.rpc_timeout_secs, 30);
    }

    #[test]
    fn no_flags_no_file_is_defaults() {
        assert_eq!(Cli::default().resolve().unwrap(), GatewayConfig::default());
    }
}
