//! Common test utilities and configuration.
//!
//! This module provides shared test infrastructure including:
//! - A demo realm with fixed accounts
//! - An assembled security environment
//! - A test app builder and its handlers

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{error, get, post, rt, test, web, App, Error, HttpResponse, Responder, Result};
use serde::Deserialize;
use tokio::time::{sleep, Duration};

use actix_shiro_core::http::error::SecurityError;
use actix_shiro_core::http::security::{
    AccountInfo, ComponentRegistry, ContextBindings, CurrentSubject, MemorySessionManager,
    SecurityEnvironment, SecurityManager, SecurityManagerConfigurer, SecurityTransform,
    SimpleAccountRealm, UsernamePasswordToken,
};

// =============================================================================
// Test Configuration
// =============================================================================

/// Creates a test realm with predefined accounts.
///
/// Accounts:
/// - admin/admin: ADMIN, USER roles + docs:read, docs:write permissions
/// - user/user: USER role + docs:read permission
/// - guest/guest: GUEST role, no permissions
pub fn demo_realm() -> SimpleAccountRealm {
    SimpleAccountRealm::new("demo")
        .with_account(
            "admin",
            AccountInfo::new("admin")
                .roles(&["ADMIN", "USER"])
                .permissions(&["docs:read", "docs:write"]),
        )
        .with_account(
            "user",
            AccountInfo::new("user")
                .roles(&["USER"])
                .permissions(&["docs:read"]),
        )
        .with_account("guest", AccountInfo::new("guest").roles(&["GUEST"]))
}

pub fn demo_registry() -> ComponentRegistry {
    ComponentRegistry::new()
        .register_realm(Arc::new(demo_realm()))
        .register_session_manager(Arc::new(MemorySessionManager::default()))
}

pub fn demo_environment() -> SecurityEnvironment {
    SecurityEnvironment::build(
        SecurityManager::new(),
        &demo_registry(),
        &SecurityManagerConfigurer::new(),
    )
    .unwrap()
}

/// Builds a ready-to-call test service around the given environment.
pub async fn create_app_with(
    environment: SecurityEnvironment,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    let bindings = Arc::new(ContextBindings::new());
    test::init_service(
        App::new()
            .wrap(SecurityTransform::from_environment(&environment, bindings))
            .service(index)
            .service(login)
            .service(logout)
            .service(admin_panel)
            .service(admin_report)
            .service(read_docs)
            .service(slow_login)
            .service(slow_whoami)
            .service(background),
    )
    .await
}

/// Builds the default demo app.
pub async fn create_test_app(
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    create_app_with(demo_environment()).await
}

/// Helper to build the JSON body for credentialed endpoints.
pub fn credentials(username: &str, password: &str) -> serde_json::Value {
    serde_json::json!({ "username": username, "password": password })
}

// =============================================================================
// Test Handlers
// =============================================================================

#[derive(Deserialize)]
pub struct Credentials {
    username: String,
    password: String,
    #[serde(default)]
    remember_me: bool,
}

impl Credentials {
    fn token(&self) -> UsernamePasswordToken {
        UsernamePasswordToken::new(&self.username, &self.password).remember_me(self.remember_me)
    }
}

#[get("/")]
pub async fn index(subject: CurrentSubject) -> Result<impl Responder> {
    let principal = subject.principal()?.unwrap_or_else(|| "anonymous".into());
    Ok(HttpResponse::Ok().body(format!("Welcome, {principal}!")))
}

#[post("/login")]
pub async fn login(
    subject: CurrentSubject,
    form: web::Json<Credentials>,
) -> Result<impl Responder> {
    subject.login(&form.token())?;
    let principal = subject.principal()?.unwrap_or_default();
    Ok(HttpResponse::Ok().body(format!("Logged in as {principal}")))
}

#[post("/logout")]
pub async fn logout(subject: CurrentSubject) -> Result<impl Responder> {
    subject.logout()?;
    let principal = subject.principal()?.unwrap_or_else(|| "anonymous".into());
    Ok(HttpResponse::Ok().body(format!("Logged out, now {principal}")))
}

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

/// Logs in, yields across an await point, then reports the principal the
/// handle resolves afterwards.
#[post("/slow-login")]
pub async fn slow_login(
    subject: CurrentSubject,
    form: web::Json<Credentials>,
) -> Result<impl Responder> {
    subject.login(&form.token())?;
    sleep(Duration::from_millis(50)).await;
    let principal = subject.principal()?.unwrap_or_default();
    Ok(HttpResponse::Ok().body(format!("Still {principal}")))
}

/// Yields across an await point before reading the principal.
#[get("/slow")]
pub async fn slow_whoami(subject: CurrentSubject) -> Result<impl Responder> {
    sleep(Duration::from_millis(30)).await;
    let principal = subject.principal()?.unwrap_or_else(|| "anonymous".into());
    Ok(HttpResponse::Ok().body(format!("Still {principal}")))
}

/// Logs in, then carries the subject into a spawned task. The task runs
/// with no context binding of its own; the identity travels with the
/// association.
#[post("/background")]
pub async fn background(
    subject: CurrentSubject,
    form: web::Json<Credentials>,
) -> Result<impl Responder> {
    subject.login(&form.token())?;

    let handle = subject.clone().into_inner();
    let carried = subject.subject().map_err(SecurityError::from)?;
    let principal = rt::spawn(carried.associate_with(async move { handle.principal() }))
        .await
        .map_err(error::ErrorInternalServerError)??
        .unwrap_or_default();
    Ok(HttpResponse::Ok().body(format!("Background work for {principal}")))
}
