use std::sync::Arc;

use uuid::Uuid;

use crate::models::{Actor, Job, JobInput, JobQuery, JobUpdate};
use crate::policy;
use crate::store::Store;

use super::ServiceError;

/// Owns job postings.
pub struct JobCatalog {
    store: Arc<dyn Store>,
}

impl JobCatalog {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list_all(&self) -> Result<Vec<Job>, ServiceError> {
        Ok(self.store.list_jobs().await?)
    }

    pub async fn search(&self, query: JobQuery) -> Result<Vec<Job>, ServiceError> {
        let query = query.normalized();
        Ok(self.store.search_jobs(&query).await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Job, ServiceError> {
        self.store
            .find_job(id)
            .await?
            .ok_or_else(|| job_not_found(id))
    }

    /// Postings created by `actor`. Only companies have any.
    pub async fn list_posted_by(&self, actor: &Actor) -> Result<Vec<Job>, ServiceError> {
        if !policy::can_post_job(actor.role) {
            return Err(ServiceError::Forbidden(
                "Only companies have job postings".into(),
            ));
        }
        Ok(self.store.list_jobs_by_poster(actor.id).await?)
    }

    pub async fn create(&self, actor: &Actor, input: JobInput) -> Result<Job, ServiceError> {
        if !policy::can_post_job(actor.role) {
            log::warn!("User {} ({:?}) tried to post a job", actor.id, actor.role);
            return Err(ServiceError::Forbidden("Only companies can post jobs".into()));
        }

        let job = self.store.insert_job(&Job::new(input, actor)).await?;
        log::info!("Job {} posted by user {}", job.id, actor.id);
        Ok(job)
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        input: JobUpdate,
    ) -> Result<Job, ServiceError> {
        let mut job = self.owned_job(actor, id, "update").await?;
        job.apply(input);

        let updated = self
            .store
            .update_job(&job)
            .await?
            .ok_or_else(|| job_not_found(id))?;
        log::info!("Job {} updated by user {}", id, actor.id);
        Ok(updated)
    }

    /// Removes the job and, in the same unit of work, every application to it.
    pub async fn delete(&self, actor: &Actor, id: Uuid) -> Result<(), ServiceError> {
        self.owned_job(actor, id, "delete").await?;

        if !self.store.delete_job_cascade(id).await? {
            return Err(job_not_found(id));
        }
        log::info!("Job {} and its applications deleted by user {}", id, actor.id);
        Ok(())
    }

    async fn owned_job(&self, actor: &Actor, id: Uuid, verb: &str) -> Result<Job, ServiceError> {
        let job = self.get_by_id(id).await?;
        if !policy::can_mutate_job(&actor.email, &job) {
            log::warn!("User {} tried to {} job {} they did not post", actor.id, verb, id);
            return Err(ServiceError::Forbidden(format!(
                "You can only {} your own jobs",
                verb
            )));
        }
        Ok(job)
    }
}

fn job_not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("Job {} not found", id))
}
