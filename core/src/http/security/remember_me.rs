//! Remember-me manager collaborator slot.
//!
//! # Shiro Equivalent
//! `org.apache.shiro.mgt.RememberMeManager`
//!
//! Remembered identities are weaker than authenticated ones: a subject
//! rebuilt from a remembered principal reports `is_remembered()` but not
//! `is_authenticated()` until it logs in again.

use dashmap::DashMap;

use crate::http::security::realm::AccountInfo;

pub trait RememberMeManager: Send + Sync {
    /// Records the identity after a successful remember-me login.
    fn remember(&self, account: &AccountInfo);

    /// Forgets a remembered identity (logout, explicit revocation).
    fn forget(&self, principal: &str);

    /// Returns the remembered identity for a principal hint, if any.
    fn remembered(&self, principal: &str) -> Option<AccountInfo>;
}

/// In-memory remember-me store keyed by principal.
#[derive(Default)]
pub struct MemoryRememberMeManager {
    remembered: DashMap<String, AccountInfo>,
}

impl MemoryRememberMeManager {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RememberMeManager for MemoryRememberMeManager {
    fn remember(&self, account: &AccountInfo) {
        self.remembered
            .insert(account.principal().to_string(), account.clone());
    }

    fn forget(&self, principal: &str) {
        self.remembered.remove(principal);
    }

    fn remembered(&self, principal: &str) -> Option<AccountInfo> {
        self.remembered.get(principal).map(|a| a.clone())
    }
}
