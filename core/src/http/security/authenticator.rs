//! Authentication strategy over the manager's realm set.
//!
//! # Shiro Equivalent
//! `org.apache.shiro.authc.Authenticator` / `ModularRealmAuthenticator`

use std::sync::Arc;

use crate::http::error::AuthenticationError;
use crate::http::security::realm::{AccountInfo, Realm};
use crate::http::security::subject::UsernamePasswordToken;

/// Strategy for authenticating a token against an ordered realm set.
///
/// The realm set is owned by the security manager and passed in, so a
/// strategy carries no configuration of its own and the manager stays the
/// single source of truth for realm ordering.
pub trait Authenticator: Send + Sync {
    fn authenticate(
        &self,
        realms: &[Arc<dyn Realm>],
        token: &UsernamePasswordToken,
    ) -> Result<AccountInfo, AuthenticationError>;
}

/// First-successful strategy: realms are consulted in order and the first
/// one that accepts the token wins.
///
/// # Shiro Equivalent
/// `ModularRealmAuthenticator` with `FirstSuccessfulStrategy`
///
/// Used as the built-in fallback when no authenticator is configured on
/// the manager.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealmAuthenticator;

impl Authenticator for RealmAuthenticator {
    fn authenticate(
        &self,
        realms: &[Arc<dyn Realm>],
        token: &UsernamePasswordToken,
    ) -> Result<AccountInfo, AuthenticationError> {
        let mut last_err = None;
        for realm in realms.iter().filter(|r| r.supports(token)) {
            match realm.authenticate(token) {
                Ok(account) => return Ok(account),
                Err(err) => last_err = Some(err),
            }
        }
        // An empty (or all-rejecting) realm set means nobody knows this
        // account, which is the UnknownAccount outcome by definition.
        Err(last_err
            .unwrap_or_else(|| AuthenticationError::UnknownAccount(token.username().to_string())))
    }
}
