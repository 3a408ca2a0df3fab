//! # Framework Errors
//!
//! Error types shared by models, collections and transports.
//!
//! Failures fall into two channels:
//!
//! - [`ConfigurationError`] is returned **synchronously** by `fetch`/`save`/`destroy`
//!   before any request is issued.
//! - [`TransportError`] (and [`FetchError`] for fetches) is produced **asynchronously**
//!   when the returned future resolves.

use std::fmt;

/// Message carried by every [`ConfigurationError`].
pub const CONFIGURATION_MESSAGE: &str = "Model cannot make changes to the server without an RDT, and a Resource path. See documentation for details.";

/// A network-facing operation was invoked on a model that has no transport,
/// no resolvable resource URL, or neither.
///
/// The display message is fixed; the flags only aid debugging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Model cannot make changes to the server without an RDT, and a Resource path. See documentation for details.")]
pub struct ConfigurationError {
    missing_transport: bool,
    missing_resource: bool,
}

impl ConfigurationError {
    pub fn new(missing_transport: bool, missing_resource: bool) -> Self {
        Self {
            missing_transport,
            missing_resource,
        }
    }

    /// True when no transport was attached to the model.
    pub fn missing_transport(&self) -> bool {
        self.missing_transport
    }

    /// True when the model has no explicit resource and no complete path template + id.
    pub fn missing_resource(&self) -> bool {
        self.missing_resource
    }
}

/// Opaque failure reported by a [`Transport`](crate::Transport).
///
/// The framework never inspects or retries these; they reach the caller as produced.
pub struct TransportError(Box<dyn std::error::Error + Send + Sync>);

impl TransportError {
    pub fn new(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(error.into())
    }

    /// Borrow the error the transport produced.
    pub fn get_ref(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        &*self.0
    }

    /// Recover the error the transport produced.
    pub fn into_inner(self) -> Box<dyn std::error::Error + Send + Sync> {
        self.0
    }
}

impl fmt::Debug for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

/// Asynchronous failure of a model fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The transport reported a failure; no attributes were touched.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The response was not valid JSON; no attributes were touched.
    #[error("Response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_message_is_fixed() {
        let err = ConfigurationError::new(true, false);
        assert_eq!(err.to_string(), CONFIGURATION_MESSAGE);
        assert!(err.missing_transport());
        assert!(!err.missing_resource());
    }

    #[test]
    fn transport_error_passes_message_through() {
        let err = TransportError::new("connection reset");
        assert_eq!(err.to_string(), "connection reset");

        let fetch: FetchError = err.into();
        assert_eq!(fetch.to_string(), "connection reset");
    }
}
