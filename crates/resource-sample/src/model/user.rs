use resource_framework::{ModelOptions, ModelTemplate, ResourceModel, Transport};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

/// Path template for user resources (`users/{id}`).
pub const RESOURCE_PATH: &str = "users";

/// Key under which the server nests user fields.
pub const JSON_ROOT: &str = "user";

/// Template producing user models bound to `transport`.
pub fn template(transport: Arc<dyn Transport>) -> ModelTemplate {
    ModelTemplate::new(
        "user",
        ModelOptions {
            transport: Some(transport),
            resource_path: Some(RESOURCE_PATH.to_string()),
            json_root: Some(JSON_ROOT.to_string()),
            ..Default::default()
        },
    )
}

/// Typed view over a user model's attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserProfile {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            email: None,
        }
    }

    /// Read the profile fields out of `model`; unrelated attributes are ignored.
    pub fn from_model(model: &ResourceModel) -> Result<Self, serde_json::Error> {
        serde_json::from_value(model.to_json())
    }

    /// Server-side document shape: the profile nested under [`JSON_ROOT`].
    pub fn to_document(&self) -> Value {
        json!({ JSON_ROOT: self })
    }
}
