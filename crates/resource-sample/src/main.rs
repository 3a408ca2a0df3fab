//! # Resource Framework Demo
//!
//! Walks a small user directory through the framework against an in-memory server:
//!
//! 1. Seed two users server-side.
//! 2. Fetch them through a [`ResourceCollection`](resource_framework::ResourceCollection).
//! 3. Edit and save one model.
//! 4. Show the synchronous configuration error of an unbound model.
//! 5. Destroy the collection.
//!
//! ```bash
//! RUST_LOG=info cargo run -p resource-sample
//! ```

use resource_framework::tracing::setup_tracing;
use resource_framework::{ModelOptions, ResourceModel};
use resource_sample::lifecycle::UserDirectory;
use resource_sample::model::UserProfile;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    info!("Starting resource demo");

    let directory = UserDirectory::new();
    directory.seed("1", &UserProfile::new("Ada", "Lovelace")).await;
    directory.seed("2", &UserProfile::new("Alan", "Turing")).await;

    let users = directory.collection(["1", "2"]);
    let report = users.fetch()?.await;
    info!(fetched = report.success_count(), "Collection fetched");

    for model in &users {
        let profile = UserProfile::from_model(model)?;
        info!(id = ?model.id(), ?profile, "Loaded user");
    }

    let ada = users.models()[0].clone();
    ada.set("email", "ada@example.com");
    // Save posts an empty body, so the server copy is unchanged.
    ada.save()?.await?;
    info!(server = ?directory.transport().document("users/1").await, "Saved user");

    let draft = ResourceModel::new("user", ModelOptions::default());
    draft.set("firstName", "Grace");
    if let Err(e) = draft.save() {
        warn!(error = %e, "Draft cannot be saved");
    }

    let report = users.destroy()?.await;
    info!(
        destroyed = report.success_count(),
        remaining = directory.transport().len().await,
        "Collection destroyed"
    );

    info!("Demo completed successfully");
    Ok(())
}
