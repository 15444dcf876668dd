//! Business operations on the job board.
//!
//! [`JobCatalog`] and [`ApplicationLedger`] take an explicit [`Actor`](crate::models::Actor),
//! ask [`policy`](crate::policy) whether the actor may proceed, and only then touch the
//! store. [`IdentityDirectory`] does lookups and registration and makes no decisions.

pub mod catalog;
pub mod identity;
pub mod ledger;

use std::sync::Arc;

use actix_web::web;

use crate::store::{MemoryStore, Store, StoreError};

pub use catalog::JobCatalog;
pub use identity::IdentityDirectory;
pub use ledger::ApplicationLedger;

/// Outcome of a business operation that did not succeed.
///
/// `Forbidden`, `NotFound` and `Conflict` are expected results the caller reports to the
/// client. `Storage` is the only unexpected one.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// The three services, wired to one store and wrapped for actix `app_data`.
#[derive(Clone)]
pub struct Services {
    pub identity: web::Data<IdentityDirectory>,
    pub catalog: web::Data<JobCatalog>,
    pub ledger: web::Data<ApplicationLedger>,
}

impl Services {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            identity: web::Data::new(IdentityDirectory::new(store.clone())),
            catalog: web::Data::new(JobCatalog::new(store.clone())),
            ledger: web::Data::new(ApplicationLedger::new(store)),
        }
    }

    /// Services over a fresh, empty [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Registers the services as application data.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.identity.clone())
            .app_data(self.catalog.clone())
            .app_data(self.ledger.clone());
    }
}
