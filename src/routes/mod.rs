pub mod applications;
pub mod auth;
pub mod health;
pub mod jobs;

use actix_web::web;

/// Mounts the API routes. Expected to sit under `/api`, behind `AuthMiddleware`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::login)
            .service(auth::register),
    )
    .service(
        // Literal segments first so they are not captured by `/{id}`.
        web::scope("/jobs")
            .service(jobs::list_jobs)
            .service(jobs::search_jobs)
            .service(jobs::company_jobs)
            .service(jobs::create_job)
            .service(jobs::get_job)
            .service(jobs::update_job)
            .service(jobs::delete_job),
    )
    .service(
        web::scope("/applications")
            .service(applications::submit_application)
            .service(applications::my_applications)
            .service(applications::job_applications)
            .service(applications::update_application_status),
    );
}
