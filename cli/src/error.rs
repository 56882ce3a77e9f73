use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("invalid server name {0}")]
    InvalidServerName(String),

    #[error("TLS error: {0}")]
    Tls(#[from] rustls::Error),

    #[error("no certificates received from {0}")]
    NoCertificatesReceived(String),
}

pub(crate) type Result<T> = std::result::Result<T, Error>;
