use crate::{
    error::AppError,
    models::{Actor, JobInput, JobQuery, JobUpdate},
    services::JobCatalog,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Lists every job posting, newest first.
///
/// Public; no token required.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Job` objects.
/// - `500 Internal Server Error`: If the store fails.
#[get("")]
pub async fn list_jobs(catalog: web::Data<JobCatalog>) -> Result<impl Responder, AppError> {
    let jobs = catalog.list_all().await?;
    Ok(HttpResponse::Ok().json(jobs))
}

/// Searches job postings.
///
/// Public. Every filter given must match; omitted or blank filters match everything,
/// so a request without parameters returns all jobs.
///
/// ## Query Parameters:
/// - `title` (optional): Case-insensitive substring of the job title.
/// - `location` (optional): Case-insensitive substring of the job location.
/// - `employment_type` (optional): Exact match, one of `FULL_TIME`, `PART_TIME`, `INTERNSHIP`.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of matching `Job` objects.
/// - `400 Bad Request`: If `employment_type` is not a known value.
#[get("/search")]
pub async fn search_jobs(
    catalog: web::Data<JobCatalog>,
    query_params: web::Query<JobQuery>,
) -> Result<impl Responder, AppError> {
    let jobs = catalog.search(query_params.into_inner()).await?;
    Ok(HttpResponse::Ok().json(jobs))
}

/// Lists the jobs posted by the authenticated company.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of the caller's `Job` objects.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `403 Forbidden`: If the caller is not a company.
#[get("/company")]
pub async fn company_jobs(
    catalog: web::Data<JobCatalog>,
    actor: Actor,
) -> Result<impl Responder, AppError> {
    let jobs = catalog.list_posted_by(&actor).await?;
    Ok(HttpResponse::Ok().json(jobs))
}

/// Retrieves a single job posting by its ID.
///
/// Public.
///
/// ## Path Parameters:
/// - `id`: The UUID of the job.
///
/// ## Responses:
/// - `200 OK`: Returns the `Job` object.
/// - `404 Not Found`: If no job has this ID, or the ID is not a UUID.
#[get("/{id}")]
pub async fn get_job(
    catalog: web::Data<JobCatalog>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let job = catalog.get_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(job))
}

/// Posts a new job as the authenticated company.
///
/// The job's poster is the caller and its posted date is the current time.
///
/// ## Request Body:
/// A JSON object matching `JobInput`:
/// - `title`, `description`, `company` (required).
/// - `location`, `employment_type`, `salary`, `experience` (optional).
///
/// ## Responses:
/// - `201 Created`: Returns the new `Job`.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `403 Forbidden`: If the caller is not a company.
/// - `422 Unprocessable Entity`: If validation fails (e.g. description over 2000 characters).
#[post("")]
pub async fn create_job(
    catalog: web::Data<JobCatalog>,
    actor: Actor,
    job_data: web::Json<JobInput>,
) -> Result<impl Responder, AppError> {
    job_data.validate()?;

    let job = catalog.create(&actor, job_data.into_inner()).await?;
    Ok(HttpResponse::Created().json(job))
}

/// Updates a job posting owned by the caller.
///
/// Replaces title, description, location, employment type, salary and experience.
/// The company name, posted date and poster are kept.
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Job`.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `403 Forbidden`: If the caller did not post this job.
/// - `404 Not Found`: If the job does not exist.
/// - `422 Unprocessable Entity`: If validation fails.
#[put("/{id}")]
pub async fn update_job(
    catalog: web::Data<JobCatalog>,
    actor: Actor,
    path: web::Path<Uuid>,
    job_data: web::Json<JobUpdate>,
) -> Result<impl Responder, AppError> {
    job_data.validate()?;

    let job = catalog
        .update(&actor, path.into_inner(), job_data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(job))
}

/// Deletes a job posting owned by the caller, together with all its applications.
///
/// ## Responses:
/// - `204 No Content`: The job and its applications are gone.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `403 Forbidden`: If the caller did not post this job.
/// - `404 Not Found`: If the job does not exist.
#[delete("/{id}")]
pub async fn delete_job(
    catalog: web::Data<JobCatalog>,
    actor: Actor,
    path: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    catalog.delete(&actor, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
