//! HTTP surface, driven through `actix_web::test`.
mod common;

use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};

use common::*;
use springboard_backend::auth::OWNER_HEADER;
use springboard_backend::cache::CacheConfig;
use springboard_backend::handlers;

macro_rules! app {
    ($t:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(portfolio_service(
                    &$t.db,
                    memory_cache(),
                    CacheConfig::default(),
                )))
                .app_data(web::Data::new(feedback_service(&$t.db)))
                .service(web::scope("/api").configure(handlers::init_routes)),
        )
        .await
    };
}

#[actix_web::test]
async fn templates_are_listed_and_fetched() {
    let t = test_db().await;
    let app = app!(t);

    let req = test::TestRequest::get().uri("/api/templates").to_request();
    let body: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.len(), 3);

    let req = test::TestRequest::get()
        .uri(&format!("/api/templates/{TEMPLATE_B}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["id"], TEMPLATE_B);
    assert_eq!(body["pages"].as_array().unwrap().len(), 2);

    let req = test::TestRequest::get().uri("/api/templates/missing").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn save_then_list_my_portfolios() {
    let t = test_db().await;
    let app = app!(t);

    let req = test::TestRequest::post()
        .uri("/api/portfolios")
        .insert_header((OWNER_HEADER, "owner-1"))
        .set_json(json!({
            "title": "My CV",
            "template_id": TEMPLATE_A,
            "projects": [{ "name": "Posters", "works": [{ "asset_key": "w.png" }] }],
        }))
        .to_request();
    let saved: Value = test::call_and_read_body_json(&app, req).await;
    let id = saved["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(saved["template"]["id"], TEMPLATE_A);

    let req = test::TestRequest::get()
        .uri("/api/portfolios/me")
        .insert_header((OWNER_HEADER, "owner-1"))
        .to_request();
    let mine: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["id"], id.as_str());

    let req = test::TestRequest::get()
        .uri("/api/portfolios/history")
        .insert_header((OWNER_HEADER, "owner-1"))
        .to_request();
    let history: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["id"], TEMPLATE_A);

    let req = test::TestRequest::get()
        .uri(&format!("/api/portfolios/{id}"))
        .to_request();
    let one: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(one["title"], "My CV");

    let req = test::TestRequest::get().uri("/api/templates/hot").to_request();
    let hot: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(hot[0]["id"], TEMPLATE_A);
}

#[actix_web::test]
async fn portfolio_routes_require_an_owner() {
    let t = test_db().await;
    let app = app!(t);

    for uri in ["/api/portfolios/me", "/api/portfolios/history"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }

    let req = test::TestRequest::post()
        .uri("/api/portfolios")
        .set_json(json!({ "title": "CV", "template_id": TEMPLATE_A }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn unknown_template_is_a_bad_request() {
    let t = test_db().await;
    let app = app!(t);

    let req = test::TestRequest::post()
        .uri("/api/portfolios")
        .insert_header((OWNER_HEADER, "owner-1"))
        .set_json(json!({ "title": "CV", "template_id": "missing" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn feedback_round_trip() {
    let t = test_db().await;
    let app = app!(t);

    let req = test::TestRequest::post()
        .uri("/api/feedback")
        .insert_header((OWNER_HEADER, "owner-1"))
        .set_json(json!({ "content": "More fonts please" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["status"], "pending");
    let id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/feedback/{id}/status"))
        .insert_header((OWNER_HEADER, "admin"))
        .set_json(json!({ "status": "approved" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["status"], "approved");

    let req = test::TestRequest::get()
        .uri("/api/feedback?status=pending")
        .insert_header((OWNER_HEADER, "admin"))
        .to_request();
    let pending: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert!(pending.is_empty());

    let req = test::TestRequest::put()
        .uri("/api/feedback/missing/status")
        .insert_header((OWNER_HEADER, "admin"))
        .set_json(json!({ "status": "rejected" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn feedback_routes_require_an_owner() {
    let t = test_db().await;
    let app = app!(t);

    let submitted = feedback_service(&t.db)
        .submit("existing".to_string())
        .await
        .unwrap();

    let requests = [
        test::TestRequest::post()
            .uri("/api/feedback")
            .set_json(json!({ "content": "anonymous" })),
        test::TestRequest::get().uri("/api/feedback"),
        test::TestRequest::put()
            .uri(&format!("/api/feedback/{}/status", submitted.id))
            .set_json(json!({ "status": "approved" })),
    ];
    for req in requests {
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    let stored = feedback_service(&t.db).list(None).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status, springboard_backend::models::feedback::Status::Pending);
}

#[actix_web::test]
async fn non_positive_scale_is_a_bad_request() {
    let t = test_db().await;
    let app = app!(t);

    let req = test::TestRequest::post()
        .uri("/api/portfolios")
        .insert_header((OWNER_HEADER, "owner-1"))
        .set_json(json!({
            "title": "CV",
            "template_id": TEMPLATE_A,
            "projects": [{ "name": "Posters", "works": [{ "scale": 0.0 }] }],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
