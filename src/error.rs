//! Error types for parcel lookups.

use thiserror::Error;

/// Errors surfaced by the feature-service client and configuration.
#[derive(Debug, Error)]
pub enum ParcelError {
    /// Transport-level failure (connect, timeout, body read, decode).
    #[error("Feature service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status from the service.
    #[error("Feature service returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Leading snippet of the response body.
        body: String,
    },

    /// In-band error payload (the service reports errors with HTTP 200).
    #[error("Feature service error {code}: {message}")]
    Service {
        /// Service error code.
        code: i64,
        /// Service error message.
        message: String,
    },

    /// The configured layer URL is not usable.
    #[error("Invalid feature service URL '{url}': {reason}")]
    InvalidServiceUrl { url: String, reason: String },
}
