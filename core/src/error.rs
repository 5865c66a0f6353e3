//! Error types for the task list client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers distinguish "the
//! entity was deleted" from "the server returned an unexpected status." All
//! other non-2xx responses land in `Server` with the raw status code and body.
//! `Validation` is raised before any request is built.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, I/O).
    #[error("network error: {0}")]
    Network(String),

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Server { status: u16, body: String },

    /// Required input was empty or no list is selected.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The server returned 404, or the entity is gone locally.
    #[error("resource not found")]
    NotFound,

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl ApiError {
    pub(crate) fn empty(field: &str) -> Self {
        ApiError::Validation(format!("{field} must not be empty"))
    }
}
