use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum YtreportyError {
    #[error("Credential file {} not found", path.display())]
    NotFound { path: PathBuf },

    #[error("Credential file {} is not valid: {detail}", path.display())]
    Format { path: PathBuf, detail: String },

    #[error("Token refresh rejected with status {status}: {body}")]
    Auth { status: u16, body: String },

    #[error("Request failed with status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl YtreportyError {
    /// HTTP status carried by the error, when there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            YtreportyError::Auth { status, .. } => Some(*status),
            YtreportyError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
