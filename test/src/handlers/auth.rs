//! Login and logout handlers.

use actix_web::{post, web, HttpResponse, Responder, Result};
use serde::Deserialize;

use actix_shiro_core::http::security::{CurrentSubject, UsernamePasswordToken};

#[derive(Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

impl Credentials {
    pub fn token(&self) -> UsernamePasswordToken {
        UsernamePasswordToken::new(&self.username, &self.password).remember_me(self.remember_me)
    }
}

#[post("/login")]
pub async fn login(
    subject: CurrentSubject,
    form: web::Json<Credentials>,
) -> Result<impl Responder> {
    subject.login(&form.token())?;

    let principal = subject.principal()?.unwrap_or_default();
    let session = subject
        .session_or_create()?
        .map(|session| session.id().to_string())
        .unwrap_or_else(|| "none".into());
    Ok(HttpResponse::Ok().body(format!("Logged in as {principal} (session: {session})")))
}

#[post("/logout")]
pub async fn logout(subject: CurrentSubject) -> Result<impl Responder> {
    subject.logout()?;
    Ok(HttpResponse::Ok().body("Logged out"))
}
