//! Authorization decisions for job postings and applications.
//!
//! Every function here is pure: it looks only at its arguments and never touches
//! storage. The catalog and the ledger call these before reading or writing anything
//! that depends on who the caller is.

use crate::models::{Application, Job, Role};

/// Only companies post jobs.
pub fn can_post_job(role: Role) -> bool {
    role == Role::Company
}

/// Only job seekers apply.
pub fn can_apply_to_job(role: Role) -> bool {
    role == Role::JobSeeker
}

/// Editing or deleting a posting is reserved to its poster.
pub fn can_mutate_job(actor_email: &str, job: &Job) -> bool {
    is_poster(actor_email, job)
}

/// Applications to a job are visible to its poster and nobody else.
pub fn can_view_job_applications(actor_email: &str, job: &Job) -> bool {
    is_poster(actor_email, job)
}

/// Accepting or rejecting an application is reserved to the poster of its job.
///
/// `job` must be the job the application was submitted to.
pub fn can_transition_application_status(
    actor_email: &str,
    application: &Application,
    job: &Job,
) -> bool {
    application.job_id == job.id && is_poster(actor_email, job)
}

fn is_poster(actor_email: &str, job: &Job) -> bool {
    job.poster_email == actor_email
}
