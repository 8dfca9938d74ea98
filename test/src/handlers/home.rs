//! Public home handler: reachable anonymously.

use actix_web::{get, HttpResponse, Responder, Result};

use actix_shiro_core::http::security::CurrentSubject;

#[get("/")]
pub async fn index(subject: CurrentSubject) -> Result<impl Responder> {
    let principal = subject.principal()?.unwrap_or_else(|| "anonymous".into());
    let authenticated = subject.is_authenticated()?;
    Ok(HttpResponse::Ok().body(format!(
        "Welcome, {principal}! (authenticated: {authenticated})"
    )))
}
