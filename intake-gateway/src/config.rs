//! Gateway configuration.

use std::{
    net::SocketAddr,
    path::PathBuf,
};

/// Largest request body accepted on `/submit`: 50 GiB.
pub const MAX_SUBMISSION_BYTES: u64 = 50 * 1024 * 1024 * 1024;

/// Directory name for submissions under the user's home directory.
pub const SUBMISSIONS_DIR_NAME: &str = "IdeaSubmissions";

/// Errors raised while reading configuration overrides.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// An override variable held a value that could not be parsed.
    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },
}

/// Runtime settings for the HTTP gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct GatewayConfig {
    /// Address the server binds to.
    pub listen_addr: SocketAddr,
    /// Root directory holding one directory per submission.
    pub submissions_root: PathBuf,
    /// Directory of the bundled frontend served at `/`.
    pub static_dir: PathBuf,
    /// Body limit for `/submit`.
    pub max_body_bytes: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            submissions_root: default_submissions_root(),
            static_dir: PathBuf::from("public"),
            max_body_bytes: usize::try_from(MAX_SUBMISSION_BYTES).unwrap_or(usize::MAX),
        }
    }
}

impl GatewayConfig {
    /// Defaults, overridden by `INTAKE_LISTEN_ADDR`, `INTAKE_SUBMISSIONS_ROOT`
    /// and `INTAKE_STATIC_DIR` when set.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] if `INTAKE_LISTEN_ADDR` is not a
    /// socket address.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Like [`GatewayConfig::from_env`], reading variables through `lookup`.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] if the listen address is not a
    /// socket address.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(addr) = lookup("INTAKE_LISTEN_ADDR") {
            config.listen_addr = addr.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidValue {
                    var: "INTAKE_LISTEN_ADDR",
                    reason: e.to_string(),
                }
            })?;
        }
        if let Some(root) = lookup("INTAKE_SUBMISSIONS_ROOT") {
            config.submissions_root = PathBuf::from(root);
        }
        if let Some(dir) = lookup("INTAKE_STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }
        Ok(config)
    }
}

/// `$HOME/IdeaSubmissions`, falling back to the working directory when no
/// home directory is set.
fn default_submissions_root() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
        .join(SUBMISSIONS_DIR_NAME)
}
