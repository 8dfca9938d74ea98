//! Actix Shiro Demo Application
//!
//! Demonstrates Shiro-like authentication and authorization: a realm of
//! fixed accounts, an assembled security manager, and handlers reading
//! the current subject through the injected handle.


use std::sync::Arc;

use actix_web::{App, HttpServer};

use actix_shiro_core::http::security::{
    AccountInfo, ComponentRegistry, ContextBindings, EventBus, MemorySessionManager,
    SecurityEnvironment, SecurityManager, SecurityManagerConfigurer, SecurityTransform,
    SimpleAccountRealm,
};

/// Creates the realm with test accounts.
///
/// # Shiro Equivalent
/// ```ini
/// [users]
/// admin = admin, ADMIN, USER
/// user = user, USER
/// guest = guest, GUEST
///
/// [roles]
/// ADMIN = docs:*
/// USER = docs:read
/// ```
fn realm() -> SimpleAccountRealm {
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

/// Registers the optional collaborators the assembled manager picks up.
fn registry() -> ComponentRegistry {
    ComponentRegistry::new()
        .register_realm(Arc::new(realm()))
        .register_session_manager(Arc::new(MemorySessionManager::default()))
        .register_event_bus(Arc::new(
            EventBus::new().with_handler(|event| println!("[security] {event}")),
        ))
}

fn print_startup_info() {
    println!("Actix Shiro Demo");
    println!("================");
    println!("Accounts: admin/admin, user/user, guest/guest");
    println!();
    println!("  GET  /              whoami (anonymous allowed)");
    println!("  POST /login         authenticate, returns principal + session");
    println!("  POST /logout        revert to anonymous");
    println!("  GET  /admin         role check against the current binding");
    println!("  POST /admin/report  login + ADMIN role check in one request");
    println!("  POST /docs          login + docs:read permission check");
    println!();
    println!("Listening on http://127.0.0.1:8080");
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let environment = SecurityEnvironment::build(
        SecurityManager::new(),
        &registry(),
        &SecurityManagerConfigurer::new(),
    )
    .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string()))?;
    let bindings = Arc::new(ContextBindings::new());

    print_startup_info();

    HttpServer::new(move || {
        App::new()
            .wrap(SecurityTransform::from_environment(
                &environment,
                Arc::clone(&bindings),
            ))
            .service(handlers::home::index)
            .service(handlers::auth::login)
            .service(handlers::auth::logout)
            .service(handlers::secured::admin_panel)
            .service(handlers::secured::admin_report)
            .service(handlers::secured::read_docs)
    })
    .bind("127.0.0.1:8080")?
    .run()
    .await
}
