//! # Directory Lifecycle
//!
//! [`UserDirectory`] wires the demo together: one shared [`MemoryTransport`] playing
//! the server, and a user [`ModelTemplate`] bound to it. Everything else (models,
//! collections) is stamped out on demand.
//!
//! ```rust
//! use resource_sample::lifecycle::UserDirectory;
//! use resource_sample::model::UserProfile;
//!
//! #[tokio::main]
//! async fn main() {
//!     let directory = UserDirectory::new();
//!     directory.seed("1", &UserProfile::new("Ada", "Lovelace")).await;
//!
//!     let users = directory.collection(["1"]);
//!     let report = users.fetch().unwrap().await;
//!     assert!(report.is_success());
//!     assert_eq!(users.models()[0].get("firstName").unwrap(), "Ada");
//! }
//! ```

use crate::model::{user, UserProfile};
use crate::server::MemoryTransport;
use resource_framework::{ModelTemplate, ResourceCollection, ResourceModel};
use std::sync::Arc;
use tracing::info;

/// Shared server stand-in plus the user template bound to it.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    transport: MemoryTransport,
    users: ModelTemplate,
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl UserDirectory {
    pub fn new() -> Self {
        let transport = MemoryTransport::new();
        let users = user::template(Arc::new(transport.clone()));
        Self { transport, users }
    }

    pub fn transport(&self) -> &MemoryTransport {
        &self.transport
    }

    pub fn template(&self) -> &ModelTemplate {
        &self.users
    }

    /// Store `profile` server-side under `users/{id}`.
    pub async fn seed(&self, id: &str, profile: &UserProfile) {
        let url = format!("{}/{id}", user::RESOURCE_PATH);
        self.transport.insert(url.clone(), profile.to_document()).await;
        info!(%url, "Seeded user");
    }

    pub fn user(&self, id: &str) -> ResourceModel {
        self.users.with_id(id)
    }

    /// Fresh models for `ids`, in order.
    pub fn collection<I, S>(&self, ids: I) -> ResourceCollection
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ResourceCollection::from_models(ids.into_iter().map(|id| self.user(id.as_ref())).collect())
    }
}
