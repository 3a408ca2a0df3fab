//! # ResourceModel
//!
//! A single remote resource: its identity, a local attribute store, and the three
//! verbs (`fetch`, `save`, `destroy`) that translate into transport calls.
//!
//! ## Resource URL
//!
//! The URL is resolved on every call:
//!
//! 1. `resource` if set,
//! 2. otherwise `"{resource_path}/{id}"` if both are set,
//! 3. otherwise there is no URL and network operations fail with [`ConfigurationError`].
//!
//! ## Two-stage results
//!
//! Network operations return `Result<Pending<..>, ConfigurationError>`. The outer
//! result is decided immediately, before any request exists. Awaiting the
//! [`Pending`] future performs the request.
//!
//! ```rust
//! use resource_framework::mock::MockTransport;
//! use resource_framework::{ModelOptions, ResourceModel};
//!
//! #[tokio::main]
//! async fn main() {
//!     let transport = MockTransport::new();
//!     transport
//!         .expect_get("users/2")
//!         .return_ok(r#"{"user":{"firstName":"John"}}"#);
//!
//!     let user = ResourceModel::new(
//!         "user",
//!         ModelOptions {
//!             transport: Some(transport.handle()),
//!             resource: Some("users/2".into()),
//!             json_root: Some("user".into()),
//!             ..Default::default()
//!         },
//!     );
//!
//!     user.fetch().unwrap().await.unwrap();
//!     assert_eq!(user.get("firstName").unwrap(), "John");
//!     transport.verify();
//! }
//! ```
//!
//! ## Sharing
//!
//! `ResourceModel` is a cheap handle: clones share the same attribute store, so a
//! [`ResourceCollection`](crate::ResourceCollection) holding a clone sees every `set`
//! and every fetched value. Identity fields (`resource`, `id`, ...) are per handle.

use crate::attributes::Attributes;
use crate::error::{ConfigurationError, FetchError};
use crate::options::ModelOptions;
use crate::transport::{Pending, Transport};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, info_span, warn, Instrument};

/// Client-side model bound to one remote resource.
#[derive(Clone)]
pub struct ResourceModel {
    resource_name: String,
    transport: Option<Arc<dyn Transport>>,
    resource: Option<String>,
    resource_path: Option<String>,
    id: Option<String>,
    json_root: Option<String>,
    attributes: Arc<Mutex<Attributes>>,
}

impl ResourceModel {
    /// Creates a model with an empty attribute store.
    ///
    /// `resource_name` is a label used in logs; it plays no part in URL resolution.
    pub fn new(resource_name: impl Into<String>, options: ModelOptions) -> Self {
        Self {
            resource_name: resource_name.into(),
            transport: options.transport,
            resource: options.resource,
            resource_path: options.resource_path,
            id: options.id,
            json_root: options.json_root,
            attributes: Arc::new(Mutex::new(Attributes::new())),
        }
    }

    pub fn builder(resource_name: impl Into<String>) -> ModelBuilder {
        ModelBuilder {
            resource_name: resource_name.into(),
            options: ModelOptions::default(),
        }
    }

    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    // --- Attributes ---

    /// Value stored under `name`, if any.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.attributes().get(name).cloned()
    }

    /// Store `value` under `name`, replacing any previous value.
    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes().set(name, value.into());
    }

    /// Copy of the whole attribute store.
    pub fn attributes_snapshot(&self) -> HashMap<String, Value> {
        self.attributes()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Attribute store as a JSON object.
    pub fn to_json(&self) -> Value {
        self.attributes().to_json()
    }

    fn attributes(&self) -> MutexGuard<'_, Attributes> {
        lock(&self.attributes)
    }

    // --- Identity ---

    /// Resolved resource URL, or `None` when the model has no resource identity.
    pub fn resource_url(&self) -> Option<String> {
        if let Some(resource) = &self.resource {
            return Some(resource.clone());
        }
        match (&self.resource_path, &self.id) {
            (Some(path), Some(id)) => Some(format!("{path}/{id}")),
            _ => None,
        }
    }

    pub fn set_transport(&mut self, transport: Arc<dyn Transport>) {
        self.transport = Some(transport);
    }

    pub fn set_resource(&mut self, resource: impl Into<String>) {
        self.resource = Some(resource.into());
    }

    pub fn set_resource_path(&mut self, resource_path: impl Into<String>) {
        self.resource_path = Some(resource_path.into());
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn set_json_root(&mut self, json_root: impl Into<String>) {
        self.json_root = Some(json_root.into());
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn json_root(&self) -> Option<&str> {
        self.json_root.as_deref()
    }

    fn requirements(&self) -> Result<(Arc<dyn Transport>, String), ConfigurationError> {
        match (&self.transport, self.resource_url()) {
            (Some(transport), Some(url)) => Ok((Arc::clone(transport), url)),
            (transport, url) => {
                let err = ConfigurationError::new(transport.is_none(), url.is_none());
                warn!(
                    resource_name = %self.resource_name,
                    missing_transport = err.missing_transport(),
                    missing_resource = err.missing_resource(),
                    "Model is not configured for remote operations"
                );
                Err(err)
            }
        }
    }

    // --- Remote operations ---

    /// Read the resource and merge the response into the attribute store.
    ///
    /// With `json_root` set, the attributes are taken from that key of the response;
    /// otherwise from its top level. Every key found overwrites the local value; keys
    /// not in the response keep theirs. The merge has completed by the time the future
    /// resolves, and it resolves to the raw response body.
    ///
    /// A transport or decode failure leaves the attributes untouched.
    pub fn fetch(&self) -> Result<Pending<String, FetchError>, ConfigurationError> {
        let (transport, url) = self.requirements()?;
        let attributes = Arc::clone(&self.attributes);
        let json_root = self.json_root.clone();
        let span = info_span!("fetch", resource_name = %self.resource_name, %url);

        Ok(Box::pin(
            async move {
                debug!("Sending request");
                let raw = match transport.get(&url).await {
                    Ok(raw) => raw,
                    Err(e) => {
                        warn!(error = %e, "Fetch failed");
                        return Err(FetchError::Transport(e));
                    }
                };

                let document: Value = serde_json::from_str(&raw).map_err(|e| {
                    warn!(error = %e, "Response is not valid JSON");
                    FetchError::Decode(e)
                })?;

                match attribute_source(&document, json_root.as_deref()) {
                    Some(fields) => {
                        let merged = lock(&attributes).merge(fields);
                        info!(merged, "Fetched");
                    }
                    None => {
                        warn!(json_root = ?json_root, "Response carried no attribute object");
                    }
                }
                Ok(raw)
            }
            .instrument(span),
        ))
    }

    /// Post to the resource URL.
    ///
    /// The request body is always an empty JSON object; attributes are **not**
    /// serialized. Use [`to_json`](Self::to_json) with the transport directly to send
    /// them. The future resolves to the transport's result unchanged.
    pub fn save(&self) -> Result<Pending<String>, ConfigurationError> {
        let (transport, url) = self.requirements()?;
        let span = info_span!("save", resource_name = %self.resource_name, %url);

        Ok(Box::pin(
            async move {
                debug!("Sending request");
                let body = Value::Object(Map::new());
                let result = transport.post(&url, &body).await;
                match &result {
                    Ok(_) => info!("Saved"),
                    Err(e) => warn!(error = %e, "Save failed"),
                }
                result
            }
            .instrument(span),
        ))
    }

    /// Delete the remote resource.
    ///
    /// Local attributes are kept; the model remains usable afterwards.
    pub fn destroy(&self) -> Result<Pending<String>, ConfigurationError> {
        let (transport, url) = self.requirements()?;
        let span = info_span!("destroy", resource_name = %self.resource_name, %url);

        Ok(Box::pin(
            async move {
                debug!("Sending request");
                let result = transport.destroy(&url).await;
                match &result {
                    Ok(_) => info!("Destroyed"),
                    Err(e) => warn!(error = %e, "Destroy failed"),
                }
                result
            }
            .instrument(span),
        ))
    }
}

impl fmt::Debug for ResourceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceModel")
            .field("resource_name", &self.resource_name)
            .field("transport", &self.transport.as_ref().map(|_| "<transport>"))
            .field("resource", &self.resource)
            .field("resource_path", &self.resource_path)
            .field("id", &self.id)
            .field("json_root", &self.json_root)
            .field("attributes", &*self.attributes())
            .finish()
    }
}

fn attribute_source<'a>(document: &'a Value, json_root: Option<&str>) -> Option<&'a Map<String, Value>> {
    match json_root {
        Some(root) => document.get(root)?.as_object(),
        None => document.as_object(),
    }
}

fn lock(attributes: &Mutex<Attributes>) -> MutexGuard<'_, Attributes> {
    attributes.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Fluent alternative to filling in [`ModelOptions`] by hand.
///
/// ```rust
/// use resource_framework::ResourceModel;
///
/// let user = ResourceModel::builder("user").resource_path("users").id("2").build();
/// assert_eq!(user.resource_url().as_deref(), Some("users/2"));
/// ```
#[derive(Debug)]
pub struct ModelBuilder {
    resource_name: String,
    options: ModelOptions,
}

impl ModelBuilder {
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.options.transport = Some(transport);
        self
    }

    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.options.resource = Some(resource.into());
        self
    }

    pub fn resource_path(mut self, resource_path: impl Into<String>) -> Self {
        self.options.resource_path = Some(resource_path.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.options.id = Some(id.into());
        self
    }

    pub fn json_root(mut self, json_root: impl Into<String>) -> Self {
        self.options.json_root = Some(json_root.into());
        self
    }

    pub fn build(self) -> ResourceModel {
        ResourceModel::new(self.resource_name, self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CONFIGURATION_MESSAGE;
    use crate::mock::MockTransport;
    use crate::transport::Verb;
    use serde_json::json;

    fn model_with(transport: &MockTransport) -> ResourceModel {
        ResourceModel::builder("user")
            .transport(transport.handle())
            .resource("users/2")
            .build()
    }

    #[test]
    fn explicit_resource_wins_over_template() {
        let model = ResourceModel::builder("user")
            .resource("users/2")
            .resource_path("accounts")
            .id("9")
            .build();
        assert_eq!(model.resource_url().as_deref(), Some("users/2"));
    }

    #[test]
    fn template_and_id_combine() {
        let model = ResourceModel::builder("user").resource_path("users").id("2").build();
        assert_eq!(model.resource_url().as_deref(), Some("users/2"));
    }

    #[test]
    fn incomplete_template_has_no_url() {
        let model = ResourceModel::builder("user").resource_path("users").build();
        assert!(model.resource_url().is_none());

        let model = ResourceModel::builder("user").id("2").build();
        assert!(model.resource_url().is_none());
    }

    #[test]
    fn get_and_set_round_trip() {
        let model = ResourceModel::new("user", ModelOptions::default());
        assert!(model.get("postalCode").is_none());

        model.set("postalCode", "90210");
        model.set("tags", json!(["a", "b"]));
        assert_eq!(model.get("postalCode"), Some(json!("90210")));
        assert_eq!(model.get("tags"), Some(json!(["a", "b"])));
    }

    #[test]
    fn clones_share_attributes() {
        let model = ResourceModel::new("user", ModelOptions::default());
        let handle = model.clone();
        handle.set("firstName", "Bob");
        assert_eq!(model.get("firstName"), Some(json!("Bob")));
    }

    #[test]
    fn unconfigured_model_rejects_every_remote_operation() {
        let model = ResourceModel::new("user", ModelOptions::default());

        let err = model.fetch().err().unwrap();
        assert_eq!(err.to_string(), CONFIGURATION_MESSAGE);
        assert!(err.missing_transport() && err.missing_resource());

        assert_eq!(model.save().err().unwrap().to_string(), CONFIGURATION_MESSAGE);
        assert_eq!(model.destroy().err().unwrap().to_string(), CONFIGURATION_MESSAGE);
    }

    #[test]
    fn transport_without_path_is_rejected_before_any_call() {
        let transport = MockTransport::new();
        let model = ResourceModel::builder("user").transport(transport.handle()).build();

        let err = model.save().err().unwrap();
        assert!(!err.missing_transport());
        assert!(err.missing_resource());
        assert!(transport.calls().is_empty());
    }

    #[test]
    fn path_without_transport_is_rejected() {
        let model = ResourceModel::builder("user").resource("users/2").build();
        let err = model.destroy().err().unwrap();
        assert!(err.missing_transport());
        assert!(!err.missing_resource());
    }

    #[tokio::test]
    async fn fetch_merges_nested_root() {
        let transport = MockTransport::new();
        transport
            .expect_get("users/2")
            .return_ok(r#"{"user":{"firstName":"test","lastName":"spec"}}"#);

        let mut model = model_with(&transport);
        model.set_json_root("user");
        let raw = model.fetch().unwrap().await.unwrap();

        assert_eq!(raw, r#"{"user":{"firstName":"test","lastName":"spec"}}"#);
        assert_eq!(model.get("firstName"), Some(json!("test")));
        assert_eq!(model.get("lastName"), Some(json!("spec")));
        transport.verify();
    }

    #[tokio::test]
    async fn fetch_without_root_uses_top_level() {
        let transport = MockTransport::new();
        transport.expect_get("users/2").return_ok(r#"{"age":41}"#);

        let model = model_with(&transport);
        model.fetch().unwrap().await.unwrap();
        assert_eq!(model.get("age"), Some(json!(41)));
    }

    #[tokio::test]
    async fn fetch_preserves_attributes_missing_from_response() {
        let transport = MockTransport::new();
        transport
            .expect_get("users/2")
            .return_ok(r#"{"lastName":"spec","firstName":null}"#);

        let model = model_with(&transport);
        model.set("firstName", "Alice");
        model.set("nickname", "Al");
        model.fetch().unwrap().await.unwrap();

        assert_eq!(model.get("nickname"), Some(json!("Al")));
        assert_eq!(model.get("firstName"), Some(Value::Null));
        assert_eq!(model.get("lastName"), Some(json!("spec")));
    }

    #[tokio::test]
    async fn fetch_with_missing_root_merges_nothing() {
        let transport = MockTransport::new();
        transport.expect_get("users/2").return_ok(r#"{"account":{"firstName":"x"}}"#);

        let mut model = model_with(&transport);
        model.set_json_root("user");
        model.set("firstName", "Alice");
        model.fetch().unwrap().await.unwrap();

        assert_eq!(model.get("firstName"), Some(json!("Alice")));
        assert_eq!(model.attributes_snapshot().len(), 1);
    }

    #[tokio::test]
    async fn fetch_transport_error_leaves_attributes_alone() {
        let transport = MockTransport::new();
        transport.expect_get("users/2").return_err("503 unavailable");

        let model = model_with(&transport);
        model.set("firstName", "Alice");
        let err = model.fetch().unwrap().await.unwrap_err();

        assert!(matches!(err, FetchError::Transport(_)));
        assert_eq!(err.to_string(), "503 unavailable");
        assert_eq!(model.attributes_snapshot().len(), 1);
    }

    #[tokio::test]
    async fn fetch_rejects_malformed_json() {
        let transport = MockTransport::new();
        transport.expect_get("users/2").return_ok("<html>");

        let model = model_with(&transport);
        let err = model.fetch().unwrap().await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
        assert!(model.attributes_snapshot().is_empty());
    }

    #[tokio::test]
    async fn save_posts_empty_body() {
        let transport = MockTransport::new();
        transport.expect_post("users/2").return_ok("{}");

        let model = model_with(&transport);
        model.set("firstName", "Bob");
        let response = model.save().unwrap().await.unwrap();

        assert_eq!(response, "{}");
        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].verb, Verb::Post);
        assert_eq!(calls[0].body, Some(json!({})));
        transport.verify();
    }

    #[tokio::test]
    async fn destroy_keeps_local_state() {
        let transport = MockTransport::new();
        transport.expect_destroy("users/2").return_ok("");

        let model = model_with(&transport);
        model.set("firstName", "Bob");
        model.destroy().unwrap().await.unwrap();

        assert_eq!(model.get("firstName"), Some(json!("Bob")));
        assert_eq!(transport.call_count(Verb::Destroy), 1);
        transport.verify();
    }

    #[tokio::test]
    async fn save_passes_transport_error_through() {
        let transport = MockTransport::new();
        transport.expect_post("users/2").return_err("conflict");

        let model = model_with(&transport);
        let err = model.save().unwrap().await.unwrap_err();
        assert_eq!(err.to_string(), "conflict");
    }

    #[tokio::test]
    async fn url_uses_template_at_call_time() {
        let transport = MockTransport::new();
        transport.expect_destroy("users/5").return_ok("");

        let mut model = ResourceModel::builder("user")
            .transport(transport.handle())
            .resource_path("users")
            .build();
        assert!(model.destroy().is_err());

        model.set_id("5");
        model.destroy().unwrap().await.unwrap();
        transport.verify();
    }
}
