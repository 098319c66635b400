//! Error types for the ss-sub-update crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Run-level failure. Any of these stops the update.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// A required input file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A required input file was read but is not usable.
    #[error("invalid {}: {reason}", path.display())]
    InvalidInput { path: PathBuf, reason: String },
    /// The updated client config could not be written back.
    #[error("cannot write {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Why a provider's document could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid provider url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest_middleware::Error,
    },
    #[error("reading body from {url} failed: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// A fetched document that holds no proxy definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("could not match [Proxy] in profile")]
    MissingProxySection,
}
