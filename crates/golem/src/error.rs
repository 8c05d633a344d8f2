//! Error types for template instantiation

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while instantiating a generic template
#[derive(Error, Debug)]
pub enum Error {
    /// Destination package context is missing or invalid
    #[error("{0}")]
    Configuration(String),

    #[error("generic template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The template lacks the `type genT interface{}` declaration
    #[error("malformed template: {0}")]
    MalformedTemplate(String),
}

impl Error {
    /// Process exit code for this kind of failure
    ///
    /// Usage errors never reach here; clap exits with 2 on its own.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Configuration(_) => 1,
            Error::TemplateNotFound(_) | Error::Io { .. } | Error::Write { .. } => 3,
            Error::MalformedTemplate(_) => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
