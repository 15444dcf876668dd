mod common;

use std::net::TcpListener;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{rt, test, web, App, HttpServer};
use jobboard::auth::AuthMiddleware;
use jobboard::routes::{self, health};
use jobboard::services::Services;
use jobboard::store::MemoryStore;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::{get_json, init_app, job_payload, post_job, register_company, register_seeker, send};

fn titles(jobs: &Value) -> Vec<String> {
    let mut titles: Vec<String> = jobs
        .as_array()
        .unwrap()
        .iter()
        .map(|job| job["title"].as_str().unwrap().to_string())
        .collect();
    titles.sort();
    titles
}

#[actix_rt::test]
async fn test_create_job_unauthorized() {
    common::setup();

    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let services = Services::new(Arc::new(MemoryStore::new()));
    let server_handle = rt::spawn(async move {
        HttpServer::new(move || {
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
                )
        })
        .workers(1)
        .bind(("127.0.0.1", port))
        .unwrap_or_else(|_| panic!("Failed to bind to port {}", port))
        .run()
        .await
    });

    // Give the server a moment to start
    tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("http://127.0.0.1:{}/api/jobs", port))
        .json(&job_payload("Unauthorized Job", "Nowhere"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(
        resp.status(),
        reqwest::StatusCode::UNAUTHORIZED,
        "Body: {:?}",
        resp.text().await.unwrap_or_default()
    );

    // Listings stay public on the live server.
    let resp = client
        .get(format!("http://127.0.0.1:{}/api/jobs", port))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let jobs: Value = resp.json().await.unwrap();
    assert_eq!(jobs, json!([]));

    server_handle.abort();
}

#[actix_rt::test]
async fn test_only_companies_post_jobs() {
    let app = init_app().await;
    let seeker = register_seeker(&app, "sam@seeker.test").await;

    let req = test::TestRequest::post()
        .uri("/api/jobs")
        .insert_header(seeker.bearer())
        .set_json(job_payload("Backend Engineer", "Berlin"))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 403);
    assert_eq!(body["error"], "Only companies can post jobs");

    let (_, jobs) = get_json(&app, "/api/jobs", None).await;
    assert_eq!(jobs, json!([]));

    let (status, _) = get_json(&app, "/api/jobs/company", Some(&seeker)).await;
    assert_eq!(status, 403);
}

#[actix_rt::test]
async fn test_posted_job_is_public() {
    let app = init_app().await;
    let acme = register_company(&app, "hr@acme.test").await;
    let job_id = post_job(&app, &acme, "Backend Engineer", "Berlin").await;

    let (status, job) = get_json(&app, &format!("/api/jobs/{}", job_id), None).await;
    assert_eq!(status, 200);
    assert_eq!(job["title"], "Backend Engineer");
    assert_eq!(job["company"], "Acme");
    assert_eq!(job["employment_type"], "FULL_TIME");
    assert_eq!(job["posted_by"], acme.id);

    let (status, jobs) = get_json(&app, "/api/jobs", None).await;
    assert_eq!(status, 200);
    assert_eq!(titles(&jobs), vec!["Backend Engineer"]);

    let (status, _) = get_json(
        &app,
        "/api/jobs/00000000-0000-0000-0000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, 404);
}

#[actix_rt::test]
async fn test_search_matches_case_insensitive_substrings() {
    let app = init_app().await;
    let acme = register_company(&app, "hr@acme.test").await;
    post_job(&app, &acme, "Senior Engineer", "Berlin").await;
    post_job(&app, &acme, "engineer II", "Remote").await;
    post_job(&app, &acme, "Manager", "Berlin").await;

    let (status, jobs) = get_json(&app, "/api/jobs/search?title=Engineer", None).await;
    assert_eq!(status, 200);
    assert_eq!(titles(&jobs), vec!["Senior Engineer", "engineer II"]);

    let (_, jobs) = get_json(&app, "/api/jobs/search?title=engineer&location=berlin", None).await;
    assert_eq!(titles(&jobs), vec!["Senior Engineer"]);

    let (_, jobs) = get_json(&app, "/api/jobs/search?employment_type=PART_TIME", None).await;
    assert_eq!(jobs, json!([]));

    let (_, jobs) = get_json(&app, "/api/jobs/search?title=", None).await;
    assert_eq!(jobs.as_array().unwrap().len(), 3);

    let (status, _) = get_json(&app, "/api/jobs/search?employment_type=GIG", None).await;
    assert_eq!(status, 400);
}

#[actix_rt::test]
async fn test_company_listing_shows_own_jobs_only() {
    let app = init_app().await;
    let acme = register_company(&app, "hr@acme.test").await;
    let globex = register_company(&app, "jobs@globex.test").await;
    post_job(&app, &acme, "Backend Engineer", "Berlin").await;
    post_job(&app, &globex, "Designer", "Paris").await;

    let (status, jobs) = get_json(&app, "/api/jobs/company", Some(&acme)).await;
    assert_eq!(status, 200);
    assert_eq!(titles(&jobs), vec!["Backend Engineer"]);

    let (status, _) = get_json(&app, "/api/jobs/company", None).await;
    assert_eq!(status, 401);
}

#[actix_rt::test]
async fn test_only_poster_updates_job() {
    let app = init_app().await;
    let acme = register_company(&app, "hr@acme.test").await;
    let globex = register_company(&app, "jobs@globex.test").await;
    let job_id = post_job(&app, &acme, "Backend Engineer", "Berlin").await;
    let (_, original) = get_json(&app, &format!("/api/jobs/{}", job_id), None).await;

    let mut hijack = job_payload("Hijacked", "Nowhere");
    hijack["company"] = json!("Globex");
    let req = test::TestRequest::put()
        .uri(&format!("/api/jobs/{}", job_id))
        .insert_header(globex.bearer())
        .set_json(&hijack)
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 403);
    assert_eq!(body["error"], "You can only update your own jobs");

    let (_, stored) = get_json(&app, &format!("/api/jobs/{}", job_id), None).await;
    assert_eq!(stored, original);

    // The poster's update replaces the editable fields and keeps the rest.
    let mut update = job_payload("Staff Engineer", "Hamburg");
    update["company"] = json!("Renamed Co");
    let req = test::TestRequest::put()
        .uri(&format!("/api/jobs/{}", job_id))
        .insert_header(acme.bearer())
        .set_json(&update)
        .to_request();
    let (status, updated) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(updated["title"], "Staff Engineer");
    assert_eq!(updated["location"], "Hamburg");
    assert_eq!(updated["company"], original["company"]);
    assert_eq!(updated["posted_date"], original["posted_date"]);
    assert_eq!(updated["posted_by"], original["posted_by"]);

    // An update body may leave out the company name.
    let req = test::TestRequest::put()
        .uri(&format!("/api/jobs/{}", job_id))
        .insert_header(acme.bearer())
        .set_json(json!({
            "title": "Principal Engineer",
            "description": "Own the platform"
        }))
        .to_request();
    let (status, updated) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(updated["title"], "Principal Engineer");
    assert_eq!(updated["company"], original["company"]);
    assert_eq!(updated["location"], Value::Null);
}

#[actix_rt::test]
async fn test_job_validation() {
    let app = init_app().await;
    let acme = register_company(&app, "hr@acme.test").await;

    let mut payload = job_payload("Backend Engineer", "Berlin");
    payload["description"] = json!("x".repeat(2001));
    let req = test::TestRequest::post()
        .uri("/api/jobs")
        .insert_header(acme.bearer())
        .set_json(&payload)
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 422);

    let mut payload = job_payload("Backend Engineer", "Berlin");
    payload["title"] = json!("");
    let req = test::TestRequest::post()
        .uri("/api/jobs")
        .insert_header(acme.bearer())
        .set_json(&payload)
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 422);
}

#[actix_rt::test]
async fn test_only_poster_deletes_job() {
    let app = init_app().await;
    let acme = register_company(&app, "hr@acme.test").await;
    let globex = register_company(&app, "jobs@globex.test").await;
    let job_id = post_job(&app, &acme, "Backend Engineer", "Berlin").await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/jobs/{}", job_id))
        .insert_header(globex.bearer())
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 403);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/jobs/{}", job_id))
        .insert_header(acme.bearer())
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 204);
    assert_eq!(body, Value::Null);

    let (status, _) = get_json(&app, &format!("/api/jobs/{}", job_id), None).await;
    assert_eq!(status, 404);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/jobs/{}", job_id))
        .insert_header(acme.bearer())
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 404);
}
