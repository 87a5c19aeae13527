use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BumpError {
    #[error("no pyproject.toml found at '{}'", .0.display())]
    FileNotFound(PathBuf),

    #[error("invalid pyproject.toml: {0}")]
    TomlParsing(String),

    #[error("invalid pyproject.toml: {0}")]
    SchemaInvalid(String),

    #[error("no dependencies found")]
    NoDependencies,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BumpError>;
