//! # Resource Framework
//!
//! A small client-side data-binding layer. A [`ResourceModel`] binds one remote
//! resource to a local attribute store; a [`ResourceCollection`] fans operations out
//! over many of them. All network work is delegated to a [`Transport`] you supply.
//!
//! ## Architecture Overview
//!
//! 1. **Transport Layer** ([`Transport`]) - `get`/`post`/`destroy` keyed by URL. Opaque:
//!    retries, auth and hosts are its business.
//! 2. **Model Layer** ([`ResourceModel`]) - URL resolution, attribute get/set, and the
//!    fetch/save/destroy verbs.
//! 3. **Collection Layer** ([`ResourceCollection`]) - ordered fanout over anything
//!    implementing [`Resource`].
//!
//! ## Two Error Channels
//!
//! Remote operations return `Result<Pending<..>, ConfigurationError>`:
//!
//! - The outer `Result` is decided **synchronously**. A model without a transport or
//!   without a resolvable URL yields [`ConfigurationError`] and no request is made.
//! - The [`Pending`] future is the completion. Awaiting it issues the request and
//!   yields the transport's answer, or a [`TransportError`] / [`FetchError`].
//!
//! ```rust
//! use resource_framework::mock::MockTransport;
//! use resource_framework::{ModelOptions, ResourceModel};
//!
//! #[tokio::main]
//! async fn main() {
//!     // No data source: a plain attribute bag.
//!     let user = ResourceModel::new("user", ModelOptions::default());
//!     assert!(user.get("firstName").is_none());
//!     user.set("firstName", "Bob");
//!     assert_eq!(user.get("firstName").unwrap(), "Bob");
//!     assert!(user.fetch().is_err());
//!
//!     // With a transport.
//!     let transport = MockTransport::new();
//!     transport.expect_get("users/2").return_ok(r#"{"firstName":"John"}"#);
//!     let user = ResourceModel::builder("user")
//!         .transport(transport.handle())
//!         .resource("users/2")
//!         .build();
//!     user.fetch().unwrap().await.unwrap();
//!     assert_eq!(user.get("firstName").unwrap(), "John");
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Operations never block; they suspend only inside the transport.
//! - A model's attribute store sits behind a mutex that is never held across an
//!   `.await`. Overlapping fetches on one model race; the last merge wins per key.
//! - Collections drive member requests concurrently and report in member order.
//! - There is no cancellation or timeout. Dropping a [`Pending`] abandons it.
//!
//! ## Testing
//!
//! The [`mock`] module provides [`MockTransport`](mock::MockTransport) and
//! [`MockResource`](mock::MockResource) for fast, deterministic tests.

pub mod attributes;
pub mod collection;
pub mod error;
pub mod mock;
pub mod model;
pub mod options;
pub mod resource;
pub mod template;
pub mod tracing;
pub mod transport;

// Re-export core types for convenience
pub use attributes::Attributes;
pub use collection::{CollectionOptions, Fanout, FanoutReport, ResourceCollection};
pub use error::{ConfigurationError, FetchError, TransportError, CONFIGURATION_MESSAGE};
pub use model::{ModelBuilder, ResourceModel};
pub use options::ModelOptions;
pub use resource::Resource;
pub use template::ModelTemplate;
pub use transport::{Pending, Transport, Verb};
