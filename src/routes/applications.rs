use crate::{
    error::AppError,
    models::{Actor, ApplicationInput, StatusUpdate},
    services::ApplicationLedger,
};
use actix_web::{get, post, put, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Applies to a job as the authenticated job seeker.
///
/// ## Request Body:
/// - `job_id`: The UUID of the job (required).
/// - `cover_letter` (optional): Up to 1000 characters.
/// - `resume_url` (optional): Must be a URL.
///
/// ## Responses:
/// - `201 Created`: Returns the new `Application`, with status `PENDING`.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `403 Forbidden`: If the caller is not a job seeker.
/// - `404 Not Found`: If the job does not exist.
/// - `409 Conflict`: If the caller already applied to this job.
/// - `422 Unprocessable Entity`: If validation fails.
#[post("")]
pub async fn submit_application(
    ledger: web::Data<ApplicationLedger>,
    actor: Actor,
    application_data: web::Json<ApplicationInput>,
) -> Result<impl Responder, AppError> {
    application_data.validate()?;

    let application = ledger
        .submit(&actor, application_data.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(application))
}

/// Lists the caller's own applications.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Application` objects, possibly empty.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
#[get("/my-applications")]
pub async fn my_applications(
    ledger: web::Data<ApplicationLedger>,
    actor: Actor,
) -> Result<impl Responder, AppError> {
    let applications = ledger.list_mine(&actor).await?;
    Ok(HttpResponse::Ok().json(applications))
}

/// Lists the applications to a job, for the job's poster.
///
/// Callers who did not post the job, and requests for jobs that do not exist, both
/// receive an empty array.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Application` objects, possibly empty.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
#[get("/job/{job_id}")]
pub async fn job_applications(
    ledger: web::Data<ApplicationLedger>,
    actor: Actor,
    path: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let applications = ledger.list_for_job(&actor, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(applications))
}

/// Sets the status of an application. Only the poster of the application's job may do this.
///
/// ## Query Parameters:
/// - `status`: One of `PENDING`, `ACCEPTED`, `REJECTED`.
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Application`.
/// - `400 Bad Request`: If `status` is missing or not a known value.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `403 Forbidden`: If the caller did not post the job.
/// - `404 Not Found`: If the application does not exist.
#[put("/{id}/status")]
pub async fn update_application_status(
    ledger: web::Data<ApplicationLedger>,
    actor: Actor,
    path: web::Path<Uuid>,
    status_update: web::Query<StatusUpdate>,
) -> Result<impl Responder, AppError> {
    let application = ledger
        .update_status(&actor, path.into_inner(), status_update.status)
        .await?;
    Ok(HttpResponse::Ok().json(application))
}
