use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::user::Actor;

/// The kind of employment a posting offers.
/// Corresponds to the `employment_type` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "employment_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Internship,
}

/// Input structure for creating or updating a job posting.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct JobInput {
    /// Must be between 1 and 255 characters.
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    /// Must be between 1 and 2000 characters.
    #[validate(length(min = 1, max = 2000))]
    pub description: String,

    /// Name of the hiring company. Fixed at creation.
    #[validate(length(min = 1, max = 255))]
    pub company: String,

    #[validate(length(max = 255))]
    pub location: Option<String>,

    pub employment_type: Option<EmploymentType>,

    /// Free text, e.g. "$80,000 - $120,000".
    #[validate(length(max = 255))]
    pub salary: Option<String>,

    /// Free text, e.g. "3+ years".
    #[validate(length(max = 255))]
    pub experience: Option<String>,
}

/// Body of a job update. The company name is not part of it; a `company` field sent by the
/// client is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct JobUpdate {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[validate(length(min = 1, max = 2000))]
    pub description: String,

    #[validate(length(max = 255))]
    pub location: Option<String>,

    pub employment_type: Option<EmploymentType>,

    #[validate(length(max = 255))]
    pub salary: Option<String>,

    #[validate(length(max = 255))]
    pub experience: Option<String>,
}

impl From<JobInput> for JobUpdate {
    fn from(input: JobInput) -> Self {
        Self {
            title: input.title,
            description: input.description,
            location: input.location,
            employment_type: input.employment_type,
            salary: input.salary,
            experience: input.experience,
        }
    }
}

/// A job posting as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub salary: Option<String>,
    pub experience: Option<String>,
    /// Set once, when the posting is created.
    pub posted_date: DateTime<Utc>,
    /// Identifier of the company user who posted the job. Never reassigned.
    pub posted_by: i32,
    /// Email of the posting user, joined from `users`.
    pub poster_email: String,
}

impl Job {
    /// Creates a new posting owned by `poster`, stamped with the current time and a fresh UUID.
    pub fn new(input: JobInput, poster: &Actor) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            company: input.company,
            location: input.location,
            employment_type: input.employment_type,
            salary: input.salary,
            experience: input.experience,
            posted_date: Utc::now(),
            posted_by: poster.id,
            poster_email: poster.email.clone(),
        }
    }

    /// Overwrites the mutable fields with `input`.
    ///
    /// `id`, `company`, `posted_date` and the poster are left untouched.
    pub fn apply(&mut self, input: JobUpdate) {
        self.title = input.title;
        self.description = input.description;
        self.location = input.location;
        self.employment_type = input.employment_type;
        self.salary = input.salary;
        self.experience = input.experience;
    }
}

/// Search filters. Every provided filter must match; omitted filters match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobQuery {
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    /// Case-insensitive substring of the location.
    pub location: Option<String>,
    /// Exact employment type.
    pub employment_type: Option<EmploymentType>,
}

impl JobQuery {
    /// Drops blank text filters so `?title=` behaves like no title filter at all.
    pub fn normalized(self) -> Self {
        fn non_blank(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            title: non_blank(self.title),
            location: non_blank(self.location),
            employment_type: self.employment_type,
        }
    }

    pub fn matches(&self, job: &Job) -> bool {
        let contains = |haystack: Option<&str>, needle: &Option<String>| match needle {
            None => true,
            Some(needle) => haystack
                .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
                .unwrap_or(false),
        };

        contains(Some(&job.title), &self.title)
            && contains(job.location.as_deref(), &self.location)
            && self
                .employment_type
                .map_or(true, |t| job.employment_type == Some(t))
    }
}
