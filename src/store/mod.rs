//!
//! # Storage
//!
//! Keyed persistence for users, jobs and applications, split into one trait per
//! collection. Services hold an `Arc<dyn Store>` and never see SQL.
//!
//! Two implementations exist: [`postgres::PgStore`] for production and
//! [`memory::MemoryStore`] for running without a database and for tests. Both enforce
//! the `(job_id, applicant_id)` uniqueness of applications themselves and remove a job
//! together with its applications atomically.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Application, ApplicationStatus, Credentials, Job, JobQuery, NewUser, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write. Carries the constraint name.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    /// The write points at a row that does not exist (foreign key). Carries the constraint name.
    #[error("referenced row missing: {0}")]
    MissingReference(String),
    #[error("storage failure: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                StoreError::UniqueViolation(
                    db_error
                        .constraint()
                        .unwrap_or("unknown constraint")
                        .to_string(),
                )
            }
            sqlx::Error::Database(db_error) if db_error.is_foreign_key_violation() => {
                StoreError::MissingReference(
                    db_error
                        .constraint()
                        .unwrap_or("unknown constraint")
                        .to_string(),
                )
            }
            _ => StoreError::Backend(error.to_string()),
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn user_exists_by_email(&self, email: &str) -> Result<bool, StoreError>;
    async fn find_credentials(&self, email: &str) -> Result<Option<Credentials>, StoreError>;
    /// Fails with [`StoreError::UniqueViolation`] when the email is taken.
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;
}

#[async_trait]
pub trait JobStore: Send + Sync {
    /// All jobs, newest first.
    async fn list_jobs(&self) -> Result<Vec<Job>, StoreError>;
    async fn list_jobs_by_poster(&self, user_id: i32) -> Result<Vec<Job>, StoreError>;
    async fn search_jobs(&self, query: &JobQuery) -> Result<Vec<Job>, StoreError>;
    async fn find_job(&self, id: Uuid) -> Result<Option<Job>, StoreError>;
    async fn insert_job(&self, job: &Job) -> Result<Job, StoreError>;
    /// Writes the mutable fields of `job`. Returns `None` if the job no longer exists.
    async fn update_job(&self, job: &Job) -> Result<Option<Job>, StoreError>;
    /// Deletes the job and every application to it in one unit of work.
    /// Returns `false` if there was no such job.
    async fn delete_job_cascade(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn find_application(&self, id: Uuid) -> Result<Option<Application>, StoreError>;
    async fn list_applications_by_applicant(
        &self,
        user_id: i32,
    ) -> Result<Vec<Application>, StoreError>;
    async fn list_applications_by_job(&self, job_id: Uuid)
        -> Result<Vec<Application>, StoreError>;
    async fn application_exists(&self, job_id: Uuid, user_id: i32) -> Result<bool, StoreError>;
    /// Fails with [`StoreError::UniqueViolation`] if the applicant already applied to the job,
    /// and with [`StoreError::MissingReference`] if the job is gone.
    async fn insert_application(&self, application: &Application)
        -> Result<Application, StoreError>;
    /// Returns `None` if the application no longer exists.
    async fn update_application_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<Application>, StoreError>;
}

/// Everything the services need from storage.
pub trait Store: UserStore + JobStore + ApplicationStore {}

impl<T: UserStore + JobStore + ApplicationStore> Store for T {}
