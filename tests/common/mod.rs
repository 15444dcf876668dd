#![allow(dead_code)]

use std::sync::Once;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use jobboard::auth::{AuthMiddleware, AuthResponse};
use jobboard::routes::{self, health};
use jobboard::services::Services;
use serde_json::{json, Value};

static INIT: Once = Once::new();

/// Fixed secrets and a cheap bcrypt cost for every test in the binary.
pub fn setup() {
    INIT.call_once(|| {
        std::env::set_var("JWT_SECRET", "integration-test-secret");
        std::env::set_var("BCRYPT_COST", "4");
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// The full application over a fresh in-memory store.
pub async fn init_app() -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    setup();
    let services = Services::in_memory();
    test::init_service(
        App::new()
            .configure(|cfg| services.configure(cfg))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            ),
    )
    .await
}

// Helper struct to hold auth details
pub struct TestUser {
    pub id: i32,
    pub token: String,
}

impl TestUser {
    pub fn bearer(&self) -> (header::HeaderName, String) {
        (header::AUTHORIZATION, format!("Bearer {}", self.token))
    }
}

pub async fn register_user(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    email: &str,
    role: &str,
) -> TestUser {
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": "Test Account",
            "email": email,
            "password": "password123",
            "role": role
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 201, "registration of {} failed", email);

    let auth: AuthResponse = test::read_body_json(resp).await;
    TestUser {
        id: auth.user_id,
        token: auth.token,
    }
}

pub async fn register_company(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    email: &str,
) -> TestUser {
    register_user(app, email, "COMPANY").await
}

pub async fn register_seeker(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    email: &str,
) -> TestUser {
    register_user(app, email, "JOB_SEEKER").await
}

pub fn job_payload(title: &str, location: &str) -> Value {
    json!({
        "title": title,
        "description": format!("{} wanted", title),
        "company": "Acme",
        "location": location,
        "employment_type": "FULL_TIME",
        "salary": "competitive",
        "experience": "2+ years"
    })
}

/// Posts a job as `company` and returns its id.
pub async fn post_job(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    company: &TestUser,
    title: &str,
    location: &str,
) -> String {
    let req = test::TestRequest::post()
        .uri("/api/jobs")
        .insert_header(company.bearer())
        .set_json(job_payload(title, location))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 201, "posting {:?} failed", title);

    let job: Value = test::read_body_json(resp).await;
    job["id"].as_str().unwrap().to_string()
}

/// Sends `req` and returns the status with the JSON body, or `Null` for an empty body.
///
/// Errors raised by middleware come back as `Err` from the service; they are turned into
/// the response the server would have sent.
pub async fn send(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    req: actix_http::Request,
) -> (u16, Value) {
    let resp = match test::try_call_service(app, req).await {
        Ok(resp) => resp,
        Err(e) => return (e.error_response().status().as_u16(), Value::Null),
    };
    let status = resp.status().as_u16();
    let body = test::read_body(resp).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Applies to `job_id` as `seeker` and returns the response status and body.
pub async fn apply(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    seeker: &TestUser,
    job_id: &str,
) -> (u16, Value) {
    let req = test::TestRequest::post()
        .uri("/api/applications")
        .insert_header(seeker.bearer())
        .set_json(json!({
            "job_id": job_id,
            "cover_letter": "I would love to work here.",
            "resume_url": "https://example.com/resume.pdf"
        }))
        .to_request();
    send(app, req).await
}

pub async fn get_json(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    uri: &str,
    user: Option<&TestUser>,
) -> (u16, Value) {
    let mut req = test::TestRequest::get().uri(uri);
    if let Some(user) = user {
        req = req.insert_header(user.bearer());
    }
    send(app, req.to_request()).await
}
