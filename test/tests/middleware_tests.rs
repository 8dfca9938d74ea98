//! Middleware binding tests.
//!
//! Each request gets a fresh anonymous subject, bound for the duration
//! of the call and unbound on every exit path.

mod common;

use actix_web::http::StatusCode;
use actix_web::test;

use common::{create_test_app, credentials};

// =============================================================================
// Anonymous Requests
// =============================================================================

#[actix_web::test]
async fn test_anonymous_request_sees_anonymous_subject() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(body, "Welcome, anonymous!");
}

#[actix_web::test]
async fn test_admin_route_rejects_anonymous() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/admin").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Login
// =============================================================================

#[actix_web::test]
async fn test_login_swaps_subject_state_in_place() {
    let app = create_test_app().await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(credentials("admin", "admin"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(body, "Logged in as admin");
}

#[actix_web::test]
async fn test_login_with_wrong_password_unauthorized() {
    let app = create_test_app().await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(credentials("admin", "nope"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_login_with_unknown_account_unauthorized() {
    let app = create_test_app().await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(credentials("nobody", "nope"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_no_residue_between_requests() {
    let app = create_test_app().await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(credentials("admin", "admin"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // The next request starts from a fresh anonymous subject even though
    // the previous one authenticated.
    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    let body = test::read_body(resp).await;
    assert_eq!(body, "Welcome, anonymous!");
}

// =============================================================================
// Role and Permission Checks
// =============================================================================

#[actix_web::test]
async fn test_admin_report_with_admin() {
    let app = create_test_app().await;

    let req = test::TestRequest::post()
        .uri("/admin/report")
        .set_json(credentials("admin", "admin"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(body, "Report for admin");
}

#[actix_web::test]
async fn test_admin_report_with_user_forbidden() {
    let app = create_test_app().await;

    let req = test::TestRequest::post()
        .uri("/admin/report")
        .set_json(credentials("user", "user"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_docs_with_user_permitted() {
    let app = create_test_app().await;

    let req = test::TestRequest::post()
        .uri("/docs")
        .set_json(credentials("user", "user"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_docs_with_guest_forbidden() {
    let app = create_test_app().await;

    let req = test::TestRequest::post()
        .uri("/docs")
        .set_json(credentials("guest", "guest"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// =============================================================================
// Logout
// =============================================================================

#[actix_web::test]
async fn test_logout_reverts_to_anonymous() {
    let app = create_test_app().await;

    let req = test::TestRequest::post().uri("/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(body, "Logged out, now anonymous");
}
