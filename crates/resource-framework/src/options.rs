//! # Model Options
//!
//! Construction-time configuration for a [`ResourceModel`](crate::ResourceModel).
//!
//! Everything except the transport can be loaded from JSON, so resource locations can
//! live in configuration while the transport is attached at runtime:
//!
//! ```rust
//! use resource_framework::ModelOptions;
//!
//! let options = ModelOptions::from_json(r#"{ "resourcePath": "users", "jsonRoot": "user" }"#).unwrap();
//! assert_eq!(options.resource_path.as_deref(), Some("users"));
//! assert!(options.transport.is_none());
//! ```

use crate::transport::Transport;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// Options recognised by [`ResourceModel::new`](crate::ResourceModel::new).
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModelOptions {
    /// Transport used for fetch/save/destroy. Never deserialized.
    #[serde(skip)]
    pub transport: Option<Arc<dyn Transport>>,
    /// Full resource locator, e.g. `"users/2"`. Wins over `resource_path` + `id`.
    pub resource: Option<String>,
    /// Path template combined with `id` as `"{resource_path}/{id}"`.
    pub resource_path: Option<String>,
    pub id: Option<String>,
    /// Top-level key under which fetch responses nest the attribute data.
    pub json_root: Option<String>,
}

impl ModelOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Layer `overrides` on top of `self`; any field set in `overrides` wins.
    pub fn merged(self, overrides: ModelOptions) -> ModelOptions {
        ModelOptions {
            transport: overrides.transport.or(self.transport),
            resource: overrides.resource.or(self.resource),
            resource_path: overrides.resource_path.or(self.resource_path),
            id: overrides.id.or(self.id),
            json_root: overrides.json_root.or(self.json_root),
        }
    }
}

impl fmt::Debug for ModelOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelOptions")
            .field("transport", &self.transport.as_ref().map(|_| "<transport>"))
            .field("resource", &self.resource)
            .field("resource_path", &self.resource_path)
            .field("id", &self.id)
            .field("json_root", &self.json_root)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_json_reads_camel_case_fields() {
        let options = ModelOptions::from_json(
            r#"{ "resource": "users/2", "resourcePath": "users", "id": "7", "jsonRoot": "user" }"#,
        )
        .unwrap();
        assert_eq!(options.resource.as_deref(), Some("users/2"));
        assert_eq!(options.resource_path.as_deref(), Some("users"));
        assert_eq!(options.id.as_deref(), Some("7"));
        assert_eq!(options.json_root.as_deref(), Some("user"));
    }

    #[test]
    fn from_json_rejects_unknown_fields() {
        assert!(ModelOptions::from_json(r#"{ "resourceUrl": "users/2" }"#).is_err());
    }

    #[test]
    fn merged_prefers_overrides() {
        let defaults = ModelOptions {
            resource_path: Some("users".into()),
            json_root: Some("user".into()),
            ..Default::default()
        };
        let overrides = ModelOptions {
            id: Some("2".into()),
            json_root: Some("member".into()),
            ..Default::default()
        };
        let merged = defaults.merged(overrides);
        assert_eq!(merged.resource_path.as_deref(), Some("users"));
        assert_eq!(merged.id.as_deref(), Some("2"));
        assert_eq!(merged.json_root.as_deref(), Some("member"));
        assert!(merged.resource.is_none());
    }
}
