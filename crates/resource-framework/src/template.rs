//! # Model Templates
//!
//! A [`ModelTemplate`] pre-binds a resource name and default options so that
//! specialised models ("a user", "an invoice") can be stamped out without repeating
//! their configuration. It is plain composition: every model it produces is an
//! ordinary [`ResourceModel`].
//!
//! ```rust
//! use resource_framework::{ModelOptions, ModelTemplate};
//!
//! let users = ModelTemplate::new(
//!     "user",
//!     ModelOptions {
//!         resource_path: Some("users".into()),
//!         json_root: Some("user".into()),
//!         ..Default::default()
//!     },
//! );
//!
//! let alice = users.with_id("2");
//! assert_eq!(alice.resource_name(), "user");
//! assert_eq!(alice.resource_url().as_deref(), Some("users/2"));
//! assert_eq!(alice.json_root(), Some("user"));
//! ```

use crate::model::ResourceModel;
use crate::options::ModelOptions;
use crate::transport::Transport;
use std::sync::Arc;

/// Factory for models that share a resource name and default options.
#[derive(Debug, Clone)]
pub struct ModelTemplate {
    resource_name: String,
    defaults: ModelOptions,
}

impl ModelTemplate {
    pub fn new(resource_name: impl Into<String>, defaults: ModelOptions) -> Self {
        Self {
            resource_name: resource_name.into(),
            defaults,
        }
    }

    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    pub fn defaults(&self) -> &ModelOptions {
        &self.defaults
    }

    /// Replace the default transport for models created from now on.
    pub fn set_transport(&mut self, transport: Arc<dyn Transport>) {
        self.defaults.transport = Some(transport);
    }

    /// New model from the defaults with `overrides` layered on top.
    pub fn instantiate(&self, overrides: ModelOptions) -> ResourceModel {
        ResourceModel::new(
            self.resource_name.clone(),
            self.defaults.clone().merged(overrides),
        )
    }

    /// New model from the defaults, addressed by `id`.
    pub fn with_id(&self, id: impl Into<String>) -> ResourceModel {
        self.instantiate(ModelOptions {
            id: Some(id.into()),
            ..Default::default()
        })
    }
}
