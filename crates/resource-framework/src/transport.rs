//! # Transport Trait
//!
//! The seam between models and whatever actually talks to a server. A transport
//! exposes three verbs keyed by URL and returns the raw response body.
//!
//! Reliability (retries, auth, host prefixes) is entirely the transport's concern.
//! Models only decide *which* URL to hit and, for fetches, how to merge the answer.

use crate::error::TransportError;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// A request that passed its synchronous precondition check and is ready to be awaited.
///
/// Awaiting it issues the transport call and yields the result the transport (or, for
/// fetches, the merge step) produced.
pub type Pending<T, E = TransportError> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;

/// The three verbs a transport must support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Destroy,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verb::Get => write!(f, "get"),
            Verb::Post => write!(f, "post"),
            Verb::Destroy => write!(f, "destroy"),
        }
    }
}

/// Externally supplied object that performs the network round-trip.
///
/// Models hold transports as `Arc<dyn Transport>` and never own their lifetime.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use resource_framework::{Transport, TransportError};
/// use serde_json::Value;
///
/// struct Offline;
///
/// #[async_trait]
/// impl Transport for Offline {
///     async fn get(&self, url: &str) -> Result<String, TransportError> {
///         Err(TransportError::new(format!("offline: {url}")))
///     }
///     async fn post(&self, url: &str, _body: &Value) -> Result<String, TransportError> {
///         Err(TransportError::new(format!("offline: {url}")))
///     }
///     async fn destroy(&self, url: &str) -> Result<String, TransportError> {
///         Err(TransportError::new(format!("offline: {url}")))
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Read the resource at `url`, returning the raw response body.
    async fn get(&self, url: &str) -> Result<String, TransportError>;

    /// Send `body` to `url`.
    async fn post(&self, url: &str, body: &Value) -> Result<String, TransportError>;

    /// Remove the resource at `url`.
    async fn destroy(&self, url: &str) -> Result<String, TransportError>;
}
