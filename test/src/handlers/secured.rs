//! Handlers behind role and permission checks.
//!
//! The demo keeps no state between requests, so the credentialed
//! variants authenticate and authorize within a single request.

use actix_web::{get, post, web, HttpResponse, Responder, Result};

use actix_shiro_core::http::security::CurrentSubject;

use crate::handlers::auth::Credentials;

/// Denied for anonymous callers: the fresh per-request subject holds no
/// principal, so the role check fails before any realm is consulted.
#[get("/admin")]
pub async fn admin_panel(subject: CurrentSubject) -> Result<impl Responder> {
    subject.check_role("ADMIN")?;
    Ok(HttpResponse::Ok().body("Admin panel"))
}

#[post("/admin/report")]
pub async fn admin_report(
    subject: CurrentSubject,
    form: web::Json<Credentials>,
) -> Result<impl Responder> {
    subject.login(&form.token())?;
    subject.check_role("ADMIN")?;

    let principal = subject.principal()?.unwrap_or_default();
    Ok(HttpResponse::Ok().body(format!("Report for {principal}")))
}

#[post("/docs")]
pub async fn read_docs(
    subject: CurrentSubject,
    form: web::Json<Credentials>,
) -> Result<impl Responder> {
    subject.login(&form.token())?;
    subject.check_permission("docs:read")?;

    let principal = subject.principal()?.unwrap_or_default();
    Ok(HttpResponse::Ok().body(format!("Docs for {principal}")))
}
