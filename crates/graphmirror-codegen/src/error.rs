use std::io;
use std::path::PathBuf;

use graphmirror_introspect::IntrospectError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("{kind} `{identifier}` normalises to an empty name")]
    EmptyName {
        kind: &'static str,
        identifier: String,
    },

    #[error("{first} and {second} both generate `{name}`")]
    NameCollision {
        name: String,
        first: String,
        second: String,
    },

    #[error("`{package}` is not a valid Java package name")]
    InvalidPackage { package: String },

    #[error("cannot create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write artifact {artifact} to {}: {source}", path.display())]
    Write {
        artifact: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Introspect(#[from] IntrospectError),

    #[error("failed to render source text")]
    Fmt(#[from] std::fmt::Error),
}
