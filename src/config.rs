use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};

pub const CONFIGURE_FLAG: &str = "-configure";

const DEFAULT_LISTEN_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 9901);
const DEFAULT_WRITER_BINARY: &str = "/home/dbe/git/lib_cpp_h5_writer/tomcat/bin/tomcat_h5_writer";
const DEFAULT_STATUS_URL: &str = "http://xbl-daq-32:9555/status";
const DEFAULT_STATUS_TIMEOUT_MS: u64 = 3000;

/// `ServiceConfig` Payload
///
/// Process-wide settings, fixed at startup. Every field is optional
/// in the JSON and falls back to its default.
#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to
    pub listen_addr: SocketAddr,
    /// Path of the writer binary started by `/start_pco_writer`
    pub writer_binary: PathBuf,
    /// The writer's own REST status endpoint
    pub status_url: String,
    /// Upper bound on a single status query, in milliseconds
    pub status_timeout_ms: u64,
    /// Enable debug logging
    pub debug: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(DEFAULT_LISTEN_ADDR),
            writer_binary: PathBuf::from(DEFAULT_WRITER_BINARY),
            status_url: DEFAULT_STATUS_URL.to_string(),
            status_timeout_ms: DEFAULT_STATUS_TIMEOUT_MS,
            debug: false,
        }
    }
}

impl ServiceConfig {
    #[must_use]
    pub const fn status_timeout(&self) -> Duration {
        Duration::from_millis(self.status_timeout_ms)
    }
}

/// `RecvServiceConfig` Function
///
/// This function will read the service configuration from the command line
/// arguments. The configuration is passed as JSON after the `-configure` flag,
/// either as the next argument or as `-configure=<json>`. Without the flag
/// every setting keeps its default.
///
/// # Arguments
/// * `args` - A vector of strings representing the command line arguments
///
/// # Returns
/// * `Result<ServiceConfig>` - The `ServiceConfig` object wrapped in a Result
///
/// # Errors
/// * This function will return an error if -configure is the last argument
/// * This function will return an error if deserialization of `ServiceConfig` fails
pub fn recv_service_config(args: Vec<String>) -> Result<ServiceConfig> {
    for (i, arg) in args.iter().enumerate() {
        if arg == CONFIGURE_FLAG {
            let Some(config_json) = args.into_iter().nth(i + 1) else {
                bail!("No service configuration provided after {CONFIGURE_FLAG}");
            };
            return parse_service_config(&config_json);
        } else if let Some(config_json) = arg.strip_prefix("-configure=") {
            return parse_service_config(config_json);
        }
    }

    Ok(ServiceConfig::default())
}

fn parse_service_config(config_json: &str) -> Result<ServiceConfig> {
    serde_json::from_str(config_json).context("invalid service configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(rest: &[&str]) -> Vec<String> {
        std::iter::once("writer-control")
            .chain(rest.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn defaults_without_flag() {
        let config = recv_service_config(args(&[])).unwrap();

        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.listen_addr.port(), 9901);
        assert!(config.listen_addr.ip().is_unspecified());
        assert_eq!(config.status_url, "http://xbl-daq-32:9555/status");
        assert_eq!(config.status_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn reads_json_after_flag() {
        let config_json = r#"{
            "listen_addr": "127.0.0.1:8000",
            "writer_binary": "/opt/writer/bin/h5_writer",
            "status_url": "http://localhost:9555/status",
            "status_timeout_ms": 250,
            "debug": true
        }"#;

        let config = recv_service_config(args(&["-configure", config_json])).unwrap();

        assert_eq!(
            config,
            ServiceConfig {
                listen_addr: "127.0.0.1:8000".parse().unwrap(),
                writer_binary: PathBuf::from("/opt/writer/bin/h5_writer"),
                status_url: "http://localhost:9555/status".to_string(),
                status_timeout_ms: 250,
                debug: true,
            }
        );
    }

    #[test]
    fn reads_inline_json_and_keeps_other_defaults() {
        let config =
            recv_service_config(args(&[r#"-configure={"writer_binary": "/usr/bin/true"}"#]))
                .unwrap();

        assert_eq!(config.writer_binary, PathBuf::from("/usr/bin/true"));
        assert_eq!(config.listen_addr, ServiceConfig::default().listen_addr);
    }

    #[test]
    fn flag_without_value_is_an_error() {
        assert!(recv_service_config(args(&["-configure"])).is_err());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(recv_service_config(args(&["-configure", "{not json"])).is_err());
    }
}
