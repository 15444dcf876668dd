use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::user::Actor;

/// Where an application stands with the hiring company.
/// Corresponds to the `application_status` SQL enum.
///
/// Any status may follow any other; the poster can reopen a decided application.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

/// Payload a job seeker submits to apply for a job.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApplicationInput {
    pub job_id: Uuid,

    #[validate(length(max = 1000))]
    pub cover_letter: Option<String>,

    /// Must be an absolute URL of at most 2048 characters.
    #[validate(url, length(max = 2048))]
    pub resume_url: Option<String>,
}

/// Query string of the status update endpoint, e.g. `?status=ACCEPTED`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
}

/// A job application as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant_id: i32,
    pub applied_date: DateTime<Utc>,
    pub status: ApplicationStatus,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
}

impl Application {
    /// A fresh `PENDING` application by `applicant`, dated now.
    pub fn new(input: ApplicationInput, applicant: &Actor) -> Self {
        Self {
            id: Uuid::new_v4(),
            job_id: input.job_id,
            applicant_id: applicant.id,
            applied_date: Utc::now(),
            status: ApplicationStatus::Pending,
            cover_letter: input.cover_letter,
            resume_url: input.resume_url,
        }
    }
}
