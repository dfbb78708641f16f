use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("Failed to create cache directory {path}: {source}")]
    CreateDir {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to serialize session stats: {0}")]
    Serialize(serde_json::Error),
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

#[derive(Debug, Error)]
pub(crate) enum GitError {
    #[error("Failed to run git: {0}")]
    Spawn(std::io::Error),

    #[error("git {args} exited with {status}")]
    Status { args: String, status: String },

    #[error("Invalid UTF-8 from git: {0}")]
    Utf8(std::string::FromUtf8Error),
}

#[derive(Debug, Error)]
pub(crate) enum PayloadError {
    #[error("Invalid status line payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Status line payload must be a JSON object")]
    NotAnObject,
}
