//! # Resource Trait
//!
//! The narrow capability a [`ResourceCollection`](crate::ResourceCollection) fans out
//! over. Anything that can fetch, save and destroy itself qualifies; no inheritance
//! from [`ResourceModel`] is required.
//!
//! Every method follows the model's two-stage contract: a synchronous
//! [`ConfigurationError`] if the entity cannot issue the request at all, otherwise a
//! [`Pending`] future that performs it.

use crate::error::{ConfigurationError, FetchError};
use crate::model::ResourceModel;
use crate::transport::Pending;
use std::sync::Arc;

/// Entity that can be fetched, saved and destroyed remotely.
pub trait Resource: Send + Sync {
    fn fetch(&self) -> Result<Pending<String, FetchError>, ConfigurationError>;

    fn save(&self) -> Result<Pending<String>, ConfigurationError>;

    fn destroy(&self) -> Result<Pending<String>, ConfigurationError>;
}

impl Resource for ResourceModel {
    fn fetch(&self) -> Result<Pending<String, FetchError>, ConfigurationError> {
        ResourceModel::fetch(self)
    }

    fn save(&self) -> Result<Pending<String>, ConfigurationError> {
        ResourceModel::save(self)
    }

    fn destroy(&self) -> Result<Pending<String>, ConfigurationError> {
        ResourceModel::destroy(self)
    }
}

impl<R: Resource + ?Sized> Resource for Arc<R> {
    fn fetch(&self) -> Result<Pending<String, FetchError>, ConfigurationError> {
        (**self).fetch()
    }

    fn save(&self) -> Result<Pending<String>, ConfigurationError> {
        (**self).save()
    }

    fn destroy(&self) -> Result<Pending<String>, ConfigurationError> {
        (**self).destroy()
    }
}

impl<R: Resource + ?Sized> Resource for Box<R> {
    fn fetch(&self) -> Result<Pending<String, FetchError>, ConfigurationError> {
        (**self).fetch()
    }

    fn save(&self) -> Result<Pending<String>, ConfigurationError> {
        (**self).save()
    }

    fn destroy(&self) -> Result<Pending<String>, ConfigurationError> {
        (**self).destroy()
    }
}
