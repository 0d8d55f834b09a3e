use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Every way a call to the task backend can fail.
///
/// Callers treat all variants alike; the split only exists so logs say
/// what actually went wrong.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("{method} {url} failed: {source}")]
    Transport {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned {status}")]
    Status {
        method: Method,
        url: String,
        status: StatusCode,
    },

    #[error("malformed response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("Task name is required.")]
    MissingName,

    #[error("Cost is required.")]
    MissingCost,

    #[error("Invalid cost: '{0}'")]
    InvalidCost(String),

    #[error("Cost cannot be negative.")]
    NegativeCost,

    #[error("Due date is required.")]
    MissingDueDate,

    #[error("Could not parse date: '{0}'")]
    InvalidDueDate(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Unknown key: '{0}'")]
    UnknownKey(String),

    #[error("Ambiguous key: '{key}' matches {candidates:?}")]
    AmbiguousKey { key: String, candidates: Vec<String> },
}
