//! Authorization strategy over the manager's realm set.
//!
//! # Shiro Equivalent
//! `org.apache.shiro.authz.Authorizer` / `ModularRealmAuthorizer`

use std::sync::Arc;

use crate::http::security::realm::Realm;

/// Strategy for answering role and permission questions about a principal.
///
/// Like [`Authenticator`](crate::http::security::Authenticator), the realm
/// set is passed in by the manager rather than held by the strategy.
pub trait Authorizer: Send + Sync {
    fn has_role(&self, realms: &[Arc<dyn Realm>], principal: &str, role: &str) -> bool;

    fn is_permitted(&self, realms: &[Arc<dyn Realm>], principal: &str, permission: &str) -> bool;
}

/// Grants access if any realm's account data carries the role/permission.
///
/// # Shiro Equivalent
/// `ModularRealmAuthorizer`
///
/// Used as the built-in fallback when no authorizer is configured on the
/// manager.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealmAuthorizer;

impl Authorizer for RealmAuthorizer {
    fn has_role(&self, realms: &[Arc<dyn Realm>], principal: &str, role: &str) -> bool {
        realms
            .iter()
            .filter_map(|realm| realm.account(principal))
            .any(|account| account.has_role(role))
    }

    fn is_permitted(&self, realms: &[Arc<dyn Realm>], principal: &str, permission: &str) -> bool {
        realms
            .iter()
            .filter_map(|realm| realm.account(principal))
            .any(|account| account.is_permitted(permission))
    }
}
