//! # Mock Framework & Testing Guide
//!
//! In-memory test doubles for both seams of the framework:
//!
//! - [`MockTransport`] stands in for a real transport. Queue expectations with a
//!   fluent API, hand [`MockTransport::handle`] to your models, then [`verify`](MockTransport::verify).
//! - [`MockResource`] stands in for a model inside a
//!   [`ResourceCollection`](crate::ResourceCollection) and counts what it was asked to do.
//!
//! ## When to use which
//!
//! | Testing... | Use |
//! |------------|-----|
//! | A model's URL, merge or error handling | `ResourceModel` + `MockTransport` |
//! | Collection fanout and ordering | `ResourceCollection<MockResource>` |
//! | A full flow against a stateful server | a real in-memory transport |
//!
//! ## Expectations
//!
//! Expectations are consumed in order. A request that does not match the next
//! expectation (different verb or URL), or arrives when none is left, panics.
//!
//! ```rust
//! use resource_framework::mock::MockTransport;
//! use resource_framework::{ResourceModel, Verb};
//!
//! #[tokio::main]
//! async fn main() {
//!     let transport = MockTransport::new();
//!     transport.expect_post("users/2").return_ok("{}");
//!     transport.expect_destroy("users/2").return_err("gone already");
//!
//!     let user = ResourceModel::builder("user")
//!         .transport(transport.handle())
//!         .resource("users/2")
//!         .build();
//!
//!     user.save().unwrap().await.unwrap();
//!     let err = user.destroy().unwrap().await.unwrap_err();
//!     assert_eq!(err.to_string(), "gone already");
//!
//!     assert_eq!(transport.call_count(Verb::Post), 1);
//!     transport.verify();
//! }
//! ```

use crate::error::{ConfigurationError, FetchError, TransportError};
use crate::resource::Resource;
use crate::transport::{Pending, Transport, Verb};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// TRANSPORT
// =============================================================================

/// Queued answer for one request.
#[derive(Debug)]
struct Expectation {
    verb: Verb,
    url: String,
    response: Result<String, String>,
}

/// A request the mock transport received.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub verb: Verb,
    pub url: String,
    /// Present for `post` only.
    pub body: Option<Value>,
}

/// Transport double with expectation tracking.
///
/// Clones share expectations and the call log.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl MockTransport {
    /// Creates a mock transport with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to pass to models.
    pub fn handle(&self) -> Arc<dyn Transport> {
        Arc::new(self.clone())
    }

    /// Expects a `get` of `url`.
    pub fn expect_get(&self, url: impl Into<String>) -> ExpectationBuilder {
        self.expect(Verb::Get, url)
    }

    /// Expects a `post` to `url`.
    pub fn expect_post(&self, url: impl Into<String>) -> ExpectationBuilder {
        self.expect(Verb::Post, url)
    }

    /// Expects a `destroy` of `url`.
    pub fn expect_destroy(&self, url: impl Into<String>) -> ExpectationBuilder {
        self.expect(Verb::Destroy, url)
    }

    fn expect(&self, verb: Verb, url: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            verb,
            url: url.into(),
            expectations: Arc::clone(&self.expectations),
        }
    }

    /// Every request received so far, in arrival order.
    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self, verb: Verb) -> usize {
        lock(&self.calls).iter().filter(|c| c.verb == verb).count()
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let exps = lock(&self.expectations);
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    fn respond(&self, verb: Verb, url: &str, body: Option<&Value>) -> Result<String, TransportError> {
        lock(&self.calls).push(Call {
            verb,
            url: url.to_string(),
            body: body.cloned(),
        });

        let expectation = lock(&self.expectations).pop_front();
        match expectation {
            Some(exp) if exp.verb == verb && exp.url == url => {
                exp.response.map_err(TransportError::new)
            }
            Some(exp) => panic!(
                "Unexpected request: {verb} {url} (expected {} {})",
                exp.verb, exp.url
            ),
            None => panic!("Unexpected request: {verb} {url} (no expectations left)"),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str) -> Result<String, TransportError> {
        self.respond(Verb::Get, url, None)
    }

    async fn post(&self, url: &str, body: &Value) -> Result<String, TransportError> {
        self.respond(Verb::Post, url, Some(body))
    }

    async fn destroy(&self, url: &str) -> Result<String, TransportError> {
        self.respond(Verb::Destroy, url, None)
    }
}

/// Builder that completes an expectation with its response.
#[derive(Debug)]
pub struct ExpectationBuilder {
    verb: Verb,
    url: String,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl ExpectationBuilder {
    /// Answer with `body`.
    pub fn return_ok(self, body: impl Into<String>) {
        self.push(Ok(body.into()));
    }

    /// Fail with a transport error carrying `message`.
    pub fn return_err(self, message: impl Into<String>) {
        self.push(Err(message.into()));
    }

    fn push(self, response: Result<String, String>) {
        lock(&self.expectations).push_back(Expectation {
            verb: self.verb,
            url: self.url,
            response,
        });
    }
}

// =============================================================================
// RESOURCE
// =============================================================================

#[derive(Debug, Default)]
struct Counters {
    dispatched: HashMap<Verb, usize>,
    completed: HashMap<Verb, usize>,
}

/// Collection member that records dispatches and always succeeds with an empty body.
///
/// Clones share counters, so keep one clone to inspect after handing another to a
/// collection.
#[derive(Debug, Clone, Default)]
pub struct MockResource {
    misconfigured: bool,
    counters: Arc<Mutex<Counters>>,
}

impl MockResource {
    pub fn new() -> Self {
        Self::default()
    }

    /// A member whose every operation fails its precondition check.
    pub fn misconfigured() -> Self {
        Self {
            misconfigured: true,
            ..Self::default()
        }
    }

    /// How many times the operation was invoked.
    pub fn dispatch_count(&self, verb: Verb) -> usize {
        lock(&self.counters).dispatched.get(&verb).copied().unwrap_or(0)
    }

    /// How many times the returned future actually ran to completion.
    pub fn call_count(&self, verb: Verb) -> usize {
        lock(&self.counters).completed.get(&verb).copied().unwrap_or(0)
    }

    fn dispatch<E: Send + 'static>(&self, verb: Verb) -> Result<Pending<String, E>, ConfigurationError> {
        *lock(&self.counters).dispatched.entry(verb).or_default() += 1;
        if self.misconfigured {
            return Err(ConfigurationError::new(true, true));
        }
        let counters = Arc::clone(&self.counters);
        Ok(Box::pin(async move {
            *lock(&counters).completed.entry(verb).or_default() += 1;
            Ok(String::new())
        }))
    }
}

impl Resource for MockResource {
    fn fetch(&self) -> Result<Pending<String, FetchError>, ConfigurationError> {
        self.dispatch(Verb::Get)
    }

    fn save(&self) -> Result<Pending<String>, ConfigurationError> {
        self.dispatch(Verb::Post)
    }

    fn destroy(&self) -> Result<Pending<String>, ConfigurationError> {
        self.dispatch(Verb::Destroy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_transport_with_expectations() {
        let mock = MockTransport::new();
        mock.expect_get("users/1").return_ok(r#"{"id":1}"#);
        mock.expect_post("users/1").return_err("read only");

        let transport = mock.handle();
        assert_eq!(transport.get("users/1").await.unwrap(), r#"{"id":1}"#);
        let err = transport
            .post("users/1", &serde_json::json!({ "a": 1 }))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "read only");

        let calls = mock.calls();
        assert_eq!(calls[1].body, Some(serde_json::json!({ "a": 1 })));
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected request")]
    async fn test_mock_transport_rejects_wrong_url() {
        let mock = MockTransport::new();
        mock.expect_get("users/1").return_ok("{}");
        let _ = mock.get("users/2").await;
    }

    #[test]
    #[should_panic(expected = "Not all expectations were met")]
    fn test_verify_reports_leftovers() {
        let mock = MockTransport::new();
        mock.expect_destroy("users/1").return_ok("");
        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_resource_counts() {
        let resource = MockResource::new();
        let pending = Resource::save(&resource).unwrap();
        assert_eq!(resource.dispatch_count(Verb::Post), 1);
        assert_eq!(resource.call_count(Verb::Post), 0);

        pending.await.unwrap();
        assert_eq!(resource.call_count(Verb::Post), 1);
    }
}
