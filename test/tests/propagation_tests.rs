//! Context isolation and identity propagation tests.
//!
//! Concurrent requests each run under their own execution context, and
//! an associated subject follows detached work that has no binding.

mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use futures_util::join;

use common::{create_test_app, credentials};

#[actix_web::test]
async fn test_concurrent_requests_do_not_observe_each_other() {
    let app = create_test_app().await;

    // Both requests are in flight at once and each yields mid-handler;
    // the login in the first must never bleed into the second.
    let admin_req = test::TestRequest::post()
        .uri("/slow-login")
        .set_json(credentials("admin", "admin"))
        .to_request();
    let anon_req = test::TestRequest::get().uri("/slow").to_request();

    let (admin_resp, anon_resp) = join!(
        test::call_service(&app, admin_req),
        test::call_service(&app, anon_req)
    );

    assert_eq!(admin_resp.status(), StatusCode::OK);
    assert_eq!(anon_resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(admin_resp).await, "Still admin");
    assert_eq!(test::read_body(anon_resp).await, "Still anonymous");
}

#[actix_web::test]
async fn test_concurrent_logins_keep_their_own_identity() {
    let app = create_test_app().await;

    let admin_req = test::TestRequest::post()
        .uri("/slow-login")
        .set_json(credentials("admin", "admin"))
        .to_request();
    let user_req = test::TestRequest::post()
        .uri("/slow-login")
        .set_json(credentials("user", "user"))
        .to_request();

    let (admin_resp, user_resp) = join!(
        test::call_service(&app, admin_req),
        test::call_service(&app, user_req)
    );

    assert_eq!(test::read_body(admin_resp).await, "Still admin");
    assert_eq!(test::read_body(user_resp).await, "Still user");
}

#[actix_web::test]
async fn test_associated_subject_follows_spawned_work() {
    let app = create_test_app().await;

    let req = test::TestRequest::post()
        .uri("/background")
        .set_json(credentials("admin", "admin"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(body, "Background work for admin");
}
