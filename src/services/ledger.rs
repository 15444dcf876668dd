use std::sync::Arc;

use uuid::Uuid;

use crate::models::{Actor, Application, ApplicationInput, ApplicationStatus};
use crate::policy;
use crate::store::{ApplicationStore, JobStore, Store, StoreError};

use super::ServiceError;

/// Owns job applications and their status.
pub struct ApplicationLedger {
    store: Arc<dyn Store>,
}

impl ApplicationLedger {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Files an application by `actor` against `input.job_id`.
    ///
    /// The existence check below is advisory; the store's uniqueness guard is what makes
    /// concurrent duplicate submissions fail.
    pub async fn submit(
        &self,
        actor: &Actor,
        input: ApplicationInput,
    ) -> Result<Application, ServiceError> {
        if !policy::can_apply_to_job(actor.role) {
            log::warn!("User {} ({:?}) tried to apply for a job", actor.id, actor.role);
            return Err(ServiceError::Forbidden(
                "Only job seekers can apply for jobs".into(),
            ));
        }

        let job_id = input.job_id;
        if self.store.find_job(job_id).await?.is_none() {
            return Err(ServiceError::NotFound(format!("Job {} not found", job_id)));
        }

        if self.store.application_exists(job_id, actor.id).await? {
            return Err(already_applied());
        }

        let application = match self
            .store
            .insert_application(&Application::new(input, actor))
            .await
        {
            Ok(application) => application,
            Err(StoreError::UniqueViolation(_)) => return Err(already_applied()),
            // The job was deleted after the existence check above.
            Err(StoreError::MissingReference(_)) => {
                return Err(ServiceError::NotFound(format!("Job {} not found", job_id)))
            }
            Err(e) => return Err(e.into()),
        };

        log::info!(
            "Application {} submitted by user {} for job {}",
            application.id,
            actor.id,
            job_id
        );
        Ok(application)
    }

    /// Everything `actor` has applied to. Never an error for an actor with no applications.
    pub async fn list_mine(&self, actor: &Actor) -> Result<Vec<Application>, ServiceError> {
        Ok(self.store.list_applications_by_applicant(actor.id).await?)
    }

    /// Applications to `job_id`, visible to its poster only.
    ///
    /// An unknown job and a job the actor did not post both yield an empty list, so the
    /// caller cannot tell whether the job exists.
    pub async fn list_for_job(
        &self,
        actor: &Actor,
        job_id: Uuid,
    ) -> Result<Vec<Application>, ServiceError> {
        let Some(job) = self.store.find_job(job_id).await? else {
            return Ok(Vec::new());
        };
        if !policy::can_view_job_applications(&actor.email, &job) {
            log::debug!("User {} is not the poster of job {}", actor.id, job_id);
            return Ok(Vec::new());
        }

        Ok(self.store.list_applications_by_job(job_id).await?)
    }

    /// Moves an application to `status`. Any status may follow any other.
    pub async fn update_status(
        &self,
        actor: &Actor,
        application_id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Application, ServiceError> {
        let application = self
            .store
            .find_application(application_id)
            .await?
            .ok_or_else(|| application_not_found(application_id))?;

        // Applications never outlive their job, so a missing job means the application is
        // being deleted right now.
        let job = self
            .store
            .find_job(application.job_id)
            .await?
            .ok_or_else(|| application_not_found(application_id))?;

        if !policy::can_transition_application_status(&actor.email, &application, &job) {
            log::warn!(
                "User {} tried to change status of application {} for a job they did not post",
                actor.id,
                application_id
            );
            return Err(ServiceError::Forbidden(
                "You can only update applications for your own jobs".into(),
            ));
        }

        let updated = self
            .store
            .update_application_status(application_id, status)
            .await?
            .ok_or_else(|| application_not_found(application_id))?;

        log::info!(
            "Application {} moved from {:?} to {:?} by user {}",
            application_id,
            application.status,
            updated.status,
            actor.id
        );
        Ok(updated)
    }
}

fn already_applied() -> ServiceError {
    ServiceError::Conflict("You have already applied for this job".into())
}

fn application_not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("Application {} not found", id))
}
