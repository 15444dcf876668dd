use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ApplicationStore, JobStore, StoreError, UserStore};
use crate::models::{Application, ApplicationStatus, Credentials, Job, JobQuery, NewUser, User};

const USERS_EMAIL_KEY: &str = "users_email_key";
const APPLICATION_PAIR_KEY: &str = "job_applications_job_applicant_key";
const APPLICATION_JOB_FKEY: &str = "job_applications_job_id_fkey";

#[derive(Default)]
struct State {
    next_user_id: i32,
    users: HashMap<i32, Credentials>,
    jobs: HashMap<Uuid, Job>,
    applications: HashMap<Uuid, Application>,
}

impl State {
    fn user_by_email(&self, email: &str) -> Option<&Credentials> {
        self.users.values().find(|c| c.user.email == email)
    }

    fn poster_email(&self, user_id: i32) -> Option<String> {
        self.users.get(&user_id).map(|c| c.user.email.clone())
    }
}

/// In-process store with the same guarantees as the Postgres one.
///
/// A single lock guards all collections, so the duplicate-application check and the
/// cascade delete each happen inside one critical section.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first<T>(mut items: Vec<T>, date: impl Fn(&T) -> chrono::DateTime<Utc>) -> Vec<T> {
    items.sort_by_key(|item| std::cmp::Reverse(date(item)));
    items
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let state = self.state.read().await;
        Ok(state.user_by_email(email).map(|c| c.user.clone()))
    }

    async fn user_exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let state = self.state.read().await;
        Ok(state.user_by_email(email).is_some())
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<Credentials>, StoreError> {
        let state = self.state.read().await;
        Ok(state.user_by_email(email).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut state = self.state.write().await;
        if state.user_by_email(&user.email).is_some() {
            return Err(StoreError::UniqueViolation(USERS_EMAIL_KEY.to_string()));
        }

        state.next_user_id += 1;
        let created = User {
            id: state.next_user_id,
            email: user.email,
            name: user.name,
            role: user.role,
            phone: user.phone,
            location: user.location,
            created_at: Utc::now(),
        };
        state.users.insert(
            created.id,
            Credentials {
                user: created.clone(),
                password_hash: user.password_hash,
            },
        );
        Ok(created)
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn list_jobs(&self) -> Result<Vec<Job>, StoreError> {
        let state = self.state.read().await;
        let jobs = state.jobs.values().cloned().collect();
        Ok(newest_first(jobs, |j: &Job| j.posted_date))
    }

    async fn list_jobs_by_poster(&self, user_id: i32) -> Result<Vec<Job>, StoreError> {
        let state = self.state.read().await;
        let jobs = state
            .jobs
            .values()
            .filter(|j| j.posted_by == user_id)
            .cloned()
            .collect();
        Ok(newest_first(jobs, |j: &Job| j.posted_date))
    }

    async fn search_jobs(&self, query: &JobQuery) -> Result<Vec<Job>, StoreError> {
        let state = self.state.read().await;
        let jobs = state
            .jobs
            .values()
            .filter(|j| query.matches(j))
            .cloned()
            .collect();
        Ok(newest_first(jobs, |j: &Job| j.posted_date))
    }

    async fn find_job(&self, id: Uuid) -> Result<Option<Job>, StoreError> {
        let state = self.state.read().await;
        Ok(state.jobs.get(&id).cloned())
    }

    async fn insert_job(&self, job: &Job) -> Result<Job, StoreError> {
        let mut state = self.state.write().await;
        let poster_email = state
            .poster_email(job.posted_by)
            .ok_or_else(|| StoreError::Backend(format!("unknown poster {}", job.posted_by)))?;
        if state.jobs.contains_key(&job.id) {
            return Err(StoreError::UniqueViolation("jobs_pkey".to_string()));
        }

        let stored = Job {
            poster_email,
            ..job.clone()
        };
        state.jobs.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update_job(&self, job: &Job) -> Result<Option<Job>, StoreError> {
        let mut state = self.state.write().await;
        let Some(stored) = state.jobs.get_mut(&job.id) else {
            return Ok(None);
        };

        stored.title = job.title.clone();
        stored.description = job.description.clone();
        stored.location = job.location.clone();
        stored.employment_type = job.employment_type;
        stored.salary = job.salary.clone();
        stored.experience = job.experience.clone();
        Ok(Some(stored.clone()))
    }

    async fn delete_job_cascade(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        state.applications.retain(|_, a| a.job_id != id);
        Ok(state.jobs.remove(&id).is_some())
    }
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn find_application(&self, id: Uuid) -> Result<Option<Application>, StoreError> {
        let state = self.state.read().await;
        Ok(state.applications.get(&id).cloned())
    }

    async fn list_applications_by_applicant(
        &self,
        user_id: i32,
    ) -> Result<Vec<Application>, StoreError> {
        let state = self.state.read().await;
        let applications = state
            .applications
            .values()
            .filter(|a| a.applicant_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(applications, |a: &Application| a.applied_date))
    }

    async fn list_applications_by_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<Application>, StoreError> {
        let state = self.state.read().await;
        let applications = state
            .applications
            .values()
            .filter(|a| a.job_id == job_id)
            .cloned()
            .collect();
        Ok(newest_first(applications, |a: &Application| a.applied_date))
    }

    async fn application_exists(&self, job_id: Uuid, user_id: i32) -> Result<bool, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .applications
            .values()
            .any(|a| a.job_id == job_id && a.applicant_id == user_id))
    }

    async fn insert_application(
        &self,
        application: &Application,
    ) -> Result<Application, StoreError> {
        let mut state = self.state.write().await;
        if !state.jobs.contains_key(&application.job_id) {
            return Err(StoreError::MissingReference(APPLICATION_JOB_FKEY.to_string()));
        }
        let duplicate = state.applications.values().any(|a| {
            a.job_id == application.job_id && a.applicant_id == application.applicant_id
        });
        if duplicate {
            return Err(StoreError::UniqueViolation(APPLICATION_PAIR_KEY.to_string()));
        }

        state
            .applications
            .insert(application.id, application.clone());
        Ok(application.clone())
    }

    async fn update_application_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<Application>, StoreError> {
        let mut state = self.state.write().await;
        Ok(state.applications.get_mut(&id).map(|application| {
            application.status = status;
            application.clone()
        }))
    }
}
