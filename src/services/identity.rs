use std::sync::Arc;

use crate::models::{Actor, Credentials, NewUser, User};
use crate::store::{Store, StoreError};

use super::ServiceError;

/// Resolves principals to users and registers new accounts.
pub struct IdentityDirectory {
    store: Arc<dyn Store>,
}

impl IdentityDirectory {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn resolve_by_email(&self, email: &str) -> Result<Option<User>, ServiceError> {
        Ok(self.store.find_user_by_email(email).await?)
    }

    /// The actor behind an authenticated email, if the account still exists.
    pub async fn resolve_actor(&self, email: &str) -> Result<Option<Actor>, ServiceError> {
        let user = self.resolve_by_email(email).await?;
        Ok(user.as_ref().map(Actor::from))
    }

    pub async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError> {
        Ok(self.store.user_exists_by_email(email).await?)
    }

    pub async fn credentials(&self, email: &str) -> Result<Option<Credentials>, ServiceError> {
        Ok(self.store.find_credentials(email).await?)
    }

    /// Fails with `Conflict` when the email is already registered.
    pub async fn create_user(&self, user: NewUser) -> Result<User, ServiceError> {
        let email = user.email.clone();
        match self.store.insert_user(user).await {
            Ok(created) => {
                log::info!("Registered user {} ({:?})", created.id, created.role);
                Ok(created)
            }
            Err(StoreError::UniqueViolation(_)) => Err(ServiceError::Conflict(format!(
                "Email {} already registered",
                email
            ))),
            Err(e) => Err(e.into()),
        }
    }
}
