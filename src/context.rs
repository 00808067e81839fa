use std::path::PathBuf;

use crate::error::YtreportyError;
use crate::oauth::store;
use crate::oauth::token::{Secret, Token};

pub const APP_NAME: &str = "ytreporty";

/// Per-application configuration and data directories.
///
/// Resolution follows the XDG base-directory convention:
/// `$XDG_CONFIG_HOME/ytreporty` (falling back to `~/.config/ytreporty`)
/// and `$XDG_DATA_HOME/ytreporty` (falling back to `~/.local/share/ytreporty`).
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl AppPaths {
    pub fn resolve() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME);
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME);
        Self { config_dir, data_dir }
    }

    pub fn new(config_dir: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            data_dir: data_dir.into(),
        }
    }
}

/// Credentials and paths threaded through every API operation.
///
/// Constructed once per invocation by the CLI entry point. `token` is the
/// only mutable part: it is updated in place (and rewritten to disk) when a
/// request triggers an access-token refresh.
#[derive(Debug)]
pub struct Environment {
    pub token: Token,
    pub secret: Secret,
    pub paths: AppPaths,
}

impl Environment {
    /// Load the persisted token and the client secret from disk.
    pub fn load(paths: AppPaths, secret_filename: &str) -> Result<Self, YtreportyError> {
        let secret = store::load_secret(&paths, secret_filename)?;
        let token = store::load_token(&paths)?;
        Ok(Self { token, secret, paths })
    }
}
