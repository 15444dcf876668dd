use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use super::{ApplicationStore, JobStore, StoreError, UserStore};
use crate::models::{Application, ApplicationStatus, Credentials, Job, JobQuery, NewUser, User};

const USER_COLUMNS: &str = "id, email, name, role, phone, location, created_at";

// Jobs are always read joined with their poster so the email is available for ownership checks.
const JOB_COLUMNS: &str = "j.id, j.title, j.description, j.company, j.location, \
     j.employment_type, j.salary, j.experience, j.posted_date, j.posted_by, \
     u.email AS poster_email";

const APPLICATION_COLUMNS: &str =
    "id, job_id, applicant_id, applied_date, status, cover_letter, resume_url";

/// Postgres-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool against `database_url` and applies pending migrations.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Backend(format!("migration failed: {}", e)))?;

        Ok(Self::new(pool))
    }
}

/// Escapes `LIKE` wildcards so user input is matched literally.
fn like_pattern(fragment: &str) -> String {
    let escaped = fragment
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn user_exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<Credentials>, StoreError> {
        let sql = format!(
            "SELECT {}, password_hash FROM users WHERE email = $1",
            USER_COLUMNS
        );
        let credentials = sqlx::query_as::<_, Credentials>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(credentials)
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let sql = format!(
            "INSERT INTO users (email, password_hash, name, role, phone, location) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {}",
            USER_COLUMNS
        );
        let created = sqlx::query_as::<_, User>(&sql)
            .bind(user.email)
            .bind(user.password_hash)
            .bind(user.name)
            .bind(user.role)
            .bind(user.phone)
            .bind(user.location)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }
}

#[async_trait]
impl JobStore for PgStore {
    async fn list_jobs(&self) -> Result<Vec<Job>, StoreError> {
        let sql = format!(
            "SELECT {} FROM jobs j JOIN users u ON u.id = j.posted_by \
             ORDER BY j.posted_date DESC",
            JOB_COLUMNS
        );
        let jobs = sqlx::query_as::<_, Job>(&sql).fetch_all(&self.pool).await?;
        Ok(jobs)
    }

    async fn list_jobs_by_poster(&self, user_id: i32) -> Result<Vec<Job>, StoreError> {
        let sql = format!(
            "SELECT {} FROM jobs j JOIN users u ON u.id = j.posted_by \
             WHERE j.posted_by = $1 ORDER BY j.posted_date DESC",
            JOB_COLUMNS
        );
        let jobs = sqlx::query_as::<_, Job>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(jobs)
    }

    async fn search_jobs(&self, query: &JobQuery) -> Result<Vec<Job>, StoreError> {
        let mut sql = format!(
            "SELECT {} FROM jobs j JOIN users u ON u.id = j.posted_by",
            JOB_COLUMNS
        );
        let mut param_count = 1;
        let mut conditions: Vec<String> = Vec::new();

        if query.title.is_some() {
            conditions.push(format!("j.title ILIKE ${}", param_count));
            param_count += 1;
        }
        if query.location.is_some() {
            conditions.push(format!("j.location ILIKE ${}", param_count));
            param_count += 1;
        }
        if query.employment_type.is_some() {
            conditions.push(format!("j.employment_type = ${}", param_count));
        }

        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY j.posted_date DESC");

        let mut query_builder = sqlx::query_as::<_, Job>(&sql);
        if let Some(title) = &query.title {
            query_builder = query_builder.bind(like_pattern(title));
        }
        if let Some(location) = &query.location {
            query_builder = query_builder.bind(like_pattern(location));
        }
        if let Some(employment_type) = query.employment_type {
            query_builder = query_builder.bind(employment_type);
        }

        let jobs = query_builder.fetch_all(&self.pool).await?;
        Ok(jobs)
    }

    async fn find_job(&self, id: Uuid) -> Result<Option<Job>, StoreError> {
        let sql = format!(
            "SELECT {} FROM jobs j JOIN users u ON u.id = j.posted_by WHERE j.id = $1",
            JOB_COLUMNS
        );
        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    async fn insert_job(&self, job: &Job) -> Result<Job, StoreError> {
        let sql = format!(
            "WITH j AS ( \
                 INSERT INTO jobs (id, title, description, company, location, employment_type, \
                                   salary, experience, posted_date, posted_by) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
                 RETURNING * \
             ) \
             SELECT {} FROM j JOIN users u ON u.id = j.posted_by",
            JOB_COLUMNS
        );
        let created = sqlx::query_as::<_, Job>(&sql)
            .bind(job.id)
            .bind(&job.title)
            .bind(&job.description)
            .bind(&job.company)
            .bind(&job.location)
            .bind(job.employment_type)
            .bind(&job.salary)
            .bind(&job.experience)
            .bind(job.posted_date)
            .bind(job.posted_by)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn update_job(&self, job: &Job) -> Result<Option<Job>, StoreError> {
        let sql = format!(
            "WITH j AS ( \
                 UPDATE jobs \
                 SET title = $1, description = $2, location = $3, employment_type = $4, \
                     salary = $5, experience = $6 \
                 WHERE id = $7 \
                 RETURNING * \
             ) \
             SELECT {} FROM j JOIN users u ON u.id = j.posted_by",
            JOB_COLUMNS
        );
        let updated = sqlx::query_as::<_, Job>(&sql)
            .bind(&job.title)
            .bind(&job.description)
            .bind(&job.location)
            .bind(job.employment_type)
            .bind(&job.salary)
            .bind(&job.experience)
            .bind(job.id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(updated)
    }

    async fn delete_job_cascade(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM job_applications WHERE job_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ApplicationStore for PgStore {
    async fn find_application(&self, id: Uuid) -> Result<Option<Application>, StoreError> {
        let sql = format!(
            "SELECT {} FROM job_applications WHERE id = $1",
            APPLICATION_COLUMNS
        );
        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(application)
    }

    async fn list_applications_by_applicant(
        &self,
        user_id: i32,
    ) -> Result<Vec<Application>, StoreError> {
        let sql = format!(
            "SELECT {} FROM job_applications WHERE applicant_id = $1 \
             ORDER BY applied_date DESC",
            APPLICATION_COLUMNS
        );
        let applications = sqlx::query_as::<_, Application>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(applications)
    }

    async fn list_applications_by_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<Application>, StoreError> {
        let sql = format!(
            "SELECT {} FROM job_applications WHERE job_id = $1 ORDER BY applied_date DESC",
            APPLICATION_COLUMNS
        );
        let applications = sqlx::query_as::<_, Application>(&sql)
            .bind(job_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(applications)
    }

    async fn application_exists(&self, job_id: Uuid, user_id: i32) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM job_applications WHERE job_id = $1 AND applicant_id = $2)",
        )
        .bind(job_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn insert_application(
        &self,
        application: &Application,
    ) -> Result<Application, StoreError> {
        let sql = format!(
            "INSERT INTO job_applications \
                 (id, job_id, applicant_id, applied_date, status, cover_letter, resume_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {}",
            APPLICATION_COLUMNS
        );
        let created = sqlx::query_as::<_, Application>(&sql)
            .bind(application.id)
            .bind(application.job_id)
            .bind(application.applicant_id)
            .bind(application.applied_date)
            .bind(application.status)
            .bind(&application.cover_letter)
            .bind(&application.resume_url)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn update_application_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<Application>, StoreError> {
        let sql = format!(
            "UPDATE job_applications SET status = $1 WHERE id = $2 RETURNING {}",
            APPLICATION_COLUMNS
        );
        let updated = sqlx::query_as::<_, Application>(&sql)
            .bind(status)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(updated)
    }
}
