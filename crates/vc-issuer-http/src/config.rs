//! VC issuer HTTP configuration types and utilities.
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use thiserror::Error;
use vc_issuer_core::protocol::MEDIA_TYPE_ZKP_MESSAGE;

/// Environment variable holding the path of the issuer configuration file.
pub const VC_ISSUER_CONFIG: &str = "VC_ISSUER_CONFIG";

const DEFAULT_PORT: u16 = 3001;

/// An error relating to loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// HTTP configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HTTPConfig {
    /// Host address for server.
    pub host: IpAddr,
    /// Port for server.
    pub port: u16,
    /// Public base URL of the issuer, passed to the identity service when creating identities.
    pub server_url: String,
    /// HTML documentation page served at `/`.
    pub docs_path: PathBuf,
    /// API specification served at `/static/docs/api/api.yaml`.
    pub spec_path: PathBuf,
    /// Media type agent envelopes are expected to be packed with.
    pub agent_media_type: String,
}

impl std::fmt::Display for HTTPConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl Default for HTTPConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            server_url: format!("http://localhost:{DEFAULT_PORT}"),
            docs_path: PathBuf::from("api/spec.html"),
            spec_path: PathBuf::from("api/api.yaml"),
            agent_media_type: MEDIA_TYPE_ZKP_MESSAGE.to_string(),
        }
    }
}

impl HTTPConfig {
    /// Provides `SocketAddr` of server config address.
    pub fn to_socket_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Reads the `[http]` table of a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        parse_toml(&fs::read_to_string(path)?)
    }
}

lazy_static! {
    /// Lazy static reference to HTTP configuration loaded from the file at `VC_ISSUER_CONFIG`.
    ///
    /// Intended for the binary embedding the issuer, which passes it on to
    /// [`crate::server::http_server`]. The library itself only takes configuration by argument.
    ///
    /// # Panics
    ///
    /// On first access, if `VC_ISSUER_CONFIG` is unset or the file cannot be read or parsed.
    pub static ref HTTP_CONFIG: HTTPConfig = HTTPConfig::from_file(
        std::env::var(VC_ISSUER_CONFIG).expect("VC_ISSUER_CONFIG env not set.")
    )
    .expect("Error loading issuer config.");
}

/// Parses and returns HTTP configuration.
fn parse_toml(toml_str: &str) -> Result<HTTPConfig, ConfigError> {
    Ok(toml::from_str::<Config>(toml_str)?.http)
}

/// Gets `vc-issuer-http` configuration variables. Panics as [`struct@HTTP_CONFIG`] does.
pub fn http_config() -> &'static HTTP_CONFIG {
    &HTTP_CONFIG
}

/// Wrapper struct for parsing the `http` config table.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct Config {
    /// HTTP configuration data.
    http: HTTPConfig,
}
