use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};

pub const CONFIG_ENV: &str = "WIERD_CACHE_DNS_CONFIG";

const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Name servers to query. Empty means use the system configuration.
    pub servers: Vec<SocketAddr>,

    /// Upper bound on a single upstream query.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "query_timeout_ms")]
    pub query_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            servers: Vec::new(),
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }
}

impl Settings {
    pub fn from_yaml_str(s: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(s).context("Parsing settings")
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Reading settings from {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Loads the file named by `WIERD_CACHE_DNS_CONFIG`, or the defaults when it's unset.
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(path),
            None => Ok(Default::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_empty() {
        let settings = Settings::from_yaml_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.query_timeout, Duration::from_secs(5));
        assert!(settings.servers.is_empty());
    }

    #[test]
    fn parses_servers_and_timeout() {
        let settings = Settings::from_yaml_str(
            r#"
servers:
  - 1.1.1.1:53
  - "[2606:4700:4700::1111]:53"
query_timeout_ms: 1500
"#,
        )
        .unwrap();

        assert_eq!(
            settings.servers,
            vec![
                "1.1.1.1:53".parse::<SocketAddr>().unwrap(),
                "[2606:4700:4700::1111]:53".parse().unwrap(),
            ]
        );
        assert_eq!(settings.query_timeout, Duration::from_millis(1500));
    }

    #[test]
    fn rejects_bad_server() {
        assert!(Settings::from_yaml_str("servers: [not-an-address]").is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Settings::load("/nonexistent/wierd-cache-dns.yaml").unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/wierd-cache-dns.yaml"));
    }
}
