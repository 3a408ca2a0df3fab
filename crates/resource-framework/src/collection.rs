//! # ResourceCollection
//!
//! Fans `fetch`, `save` and `destroy` out across an ordered list of resources.
//!
//! ## Fanout contract
//!
//! - Operations are dispatched to every resource **in list order**.
//! - If a resource fails its synchronous precondition check, the
//!   [`ConfigurationError`] is returned at once and no later resource is touched.
//!   Futures already obtained from earlier resources are dropped unpolled.
//! - Otherwise the collection returns a [`Fanout`] future. Awaiting it drives every
//!   per-resource request concurrently and resolves once all have finished, to a
//!   [`FanoutReport`] whose results are in list order regardless of completion order.
//!
//! ```rust
//! use resource_framework::mock::MockTransport;
//! use resource_framework::{ResourceCollection, ResourceModel};
//!
//! #[tokio::main]
//! async fn main() {
//!     let transport = MockTransport::new();
//!     transport.expect_destroy("users/1").return_ok("");
//!     transport.expect_destroy("users/2").return_ok("");
//!
//!     let users = ["1", "2"].map(|id| {
//!         ResourceModel::builder("user")
//!             .transport(transport.handle())
//!             .resource_path("users")
//!             .id(id)
//!             .build()
//!     });
//!
//!     let collection = ResourceCollection::from_models(users.to_vec());
//!     let report = collection.destroy().unwrap().await;
//!     assert!(report.is_success());
//!     transport.verify();
//! }
//! ```

use crate::error::{ConfigurationError, FetchError, TransportError};
use crate::model::ResourceModel;
use crate::resource::Resource;
use crate::transport::{Pending, Verb};
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, info, info_span, warn, Instrument};

/// Aggregate future returned by collection operations.
pub type Fanout<T, E> = Pin<Box<dyn Future<Output = FanoutReport<T, E>> + Send>>;

/// Options recognised by [`ResourceCollection::new`].
#[derive(Debug)]
pub struct CollectionOptions<R> {
    pub models: Vec<R>,
}

impl<R> Default for CollectionOptions<R> {
    fn default() -> Self {
        Self { models: Vec::new() }
    }
}

/// Ordered group of resources sharing fetch/save/destroy.
///
/// Holds handles, not copies: with [`ResourceModel`] every member shares its attribute
/// store with the handle the caller kept.
#[derive(Debug, Clone)]
pub struct ResourceCollection<R: Resource = ResourceModel> {
    models: Vec<R>,
}

impl<R: Resource> Default for ResourceCollection<R> {
    fn default() -> Self {
        Self { models: Vec::new() }
    }
}

impl<R: Resource> ResourceCollection<R> {
    pub fn new(options: CollectionOptions<R>) -> Self {
        Self::from_models(options.models)
    }

    pub fn from_models(models: Vec<R>) -> Self {
        Self { models }
    }

    pub fn models(&self) -> &[R] {
        &self.models
    }

    pub fn push(&mut self, model: R) {
        self.models.push(model);
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.models.iter()
    }

    /// Fetch every resource.
    pub fn fetch(&self) -> Result<Fanout<String, FetchError>, ConfigurationError> {
        self.fanout(Verb::Get, R::fetch)
    }

    /// Save every resource.
    pub fn save(&self) -> Result<Fanout<String, TransportError>, ConfigurationError> {
        self.fanout(Verb::Post, R::save)
    }

    /// Destroy every resource.
    pub fn destroy(&self) -> Result<Fanout<String, TransportError>, ConfigurationError> {
        self.fanout(Verb::Destroy, R::destroy)
    }

    fn fanout<T, E>(
        &self,
        verb: Verb,
        dispatch: impl Fn(&R) -> Result<Pending<T, E>, ConfigurationError>,
    ) -> Result<Fanout<T, E>, ConfigurationError>
    where
        T: Send + 'static,
        E: std::fmt::Display + Send + 'static,
    {
        let span = info_span!("fanout", %verb, models = self.models.len());
        let entered = span.enter();

        let mut pending = Vec::with_capacity(self.models.len());
        for (index, model) in self.models.iter().enumerate() {
            debug!(index, "Dispatching");
            match dispatch(model) {
                Ok(request) => pending.push(request),
                Err(e) => {
                    warn!(index, error = %e, "Dispatch aborted");
                    return Err(e);
                }
            }
        }
        drop(entered);

        Ok(Box::pin(
            async move {
                let report = FanoutReport {
                    results: futures::future::join_all(pending).await,
                };
                for (index, error) in report.errors() {
                    warn!(index, error = %error, "Member failed");
                }
                info!(
                    succeeded = report.success_count(),
                    failed = report.failure_count(),
                    "Fanout complete"
                );
                report
            }
            .instrument(span),
        ))
    }
}

impl<'a, R: Resource> IntoIterator for &'a ResourceCollection<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Per-resource outcomes of a collection operation, in collection order.
#[derive(Debug)]
pub struct FanoutReport<T, E> {
    results: Vec<Result<T, E>>,
}

impl<T, E> FanoutReport<T, E> {
    pub fn results(&self) -> &[Result<T, E>] {
        &self.results
    }

    pub fn into_results(self) -> Vec<Result<T, E>> {
        self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// True when every member succeeded (vacuously true for an empty collection).
    pub fn is_success(&self) -> bool {
        self.results.iter().all(Result::is_ok)
    }

    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_ok()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.results.len() - self.success_count()
    }

    /// Failed members as `(index, error)`.
    pub fn errors(&self) -> impl Iterator<Item = (usize, &E)> {
        self.results
            .iter()
            .enumerate()
            .filter_map(|(index, r)| r.as_ref().err().map(|e| (index, e)))
    }
}
