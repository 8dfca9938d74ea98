//! Realms: sources of identity and authorization data.
//!
//! # Shiro Equivalent
//! `org.apache.shiro.realm.Realm` / `SimpleAccountRealm`
//!
//! A security manager consults its ordered realm set for two things:
//! authenticating a submitted token, and looking up the roles and
//! permissions of an already-known principal.

use std::collections::HashMap;

use crate::http::error::AuthenticationError;
use crate::http::security::subject::UsernamePasswordToken;

/// Identity and authorization data for one account, as resolved by a realm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    principal: String,
    roles: Vec<String>,
    permissions: Vec<String>,
}

impl AccountInfo {
    pub fn new(principal: impl Into<String>) -> Self {
        AccountInfo {
            principal: principal.into(),
            roles: Vec::new(),
            permissions: Vec::new(),
        }
    }

    /// Adds roles to the account (builder pattern).
    pub fn roles(mut self, roles: &[&str]) -> Self {
        for role in roles {
            if !self.roles.iter().any(|r| r == role) {
                self.roles.push(role.to_string());
            }
        }
        self
    }

    /// Adds permissions to the account (builder pattern).
    pub fn permissions(mut self, permissions: &[&str]) -> Self {
        for permission in permissions {
            if !self.permissions.iter().any(|p| p == permission) {
                self.permissions.push(permission.to_string());
            }
        }
        self
    }

    pub fn principal(&self) -> &str {
        &self.principal
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Exact-match permission check. Wildcard/hierarchical permission
    /// languages are the engine's concern, not this crate's.
    pub fn is_permitted(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

/// A source of identity and permission data.
///
/// # Shiro Equivalent
/// `Realm` + `AuthorizingRealm`
pub trait Realm: Send + Sync {
    /// Realm name, used for diagnostics only.
    fn name(&self) -> &str;

    /// Whether this realm understands the given token.
    fn supports(&self, _token: &UsernamePasswordToken) -> bool {
        true
    }

    /// Authenticates the token, returning the resolved account.
    fn authenticate(&self, token: &UsernamePasswordToken)
        -> Result<AccountInfo, AuthenticationError>;

    /// Looks up authorization data for a known principal.
    fn account(&self, principal: &str) -> Option<AccountInfo>;
}

/// In-memory realm holding a fixed set of accounts.
///
/// # Shiro Equivalent
/// `SimpleAccountRealm`
///
/// # Example
/// ```ignore
/// let realm = SimpleAccountRealm::new("test")
///     .with_account("secret", AccountInfo::new("admin").roles(&["ADMIN"]));
/// ```
pub struct SimpleAccountRealm {
    name: String,
    accounts: HashMap<String, (String, AccountInfo)>,
    disabled: Vec<String>,
}

impl SimpleAccountRealm {
    pub fn new(name: impl Into<String>) -> Self {
        SimpleAccountRealm {
            name: name.into(),
            accounts: HashMap::new(),
            disabled: Vec::new(),
        }
    }

    /// Adds an account with a plain-text password (builder pattern).
    ///
    /// Password hashing is owned by the wrapped engine in production
    /// setups; this realm exists for tests and demos.
    pub fn with_account(mut self, password: impl Into<String>, account: AccountInfo) -> Self {
        self.accounts
            .insert(account.principal().to_string(), (password.into(), account));
        self
    }

    /// Marks an account as disabled (builder pattern).
    pub fn disable(mut self, principal: impl Into<String>) -> Self {
        self.disabled.push(principal.into());
        self
    }
}

impl Realm for SimpleAccountRealm {
    fn name(&self) -> &str {
        &self.name
    }

    fn authenticate(
        &self,
        token: &UsernamePasswordToken,
    ) -> Result<AccountInfo, AuthenticationError> {
        let (password, account) = self
            .accounts
            .get(token.username())
            .ok_or_else(|| AuthenticationError::UnknownAccount(token.username().to_string()))?;
        if self.disabled.iter().any(|p| p == token.username()) {
            return Err(AuthenticationError::DisabledAccount(
                token.username().to_string(),
            ));
        }
        if password != token.password() {
            return Err(AuthenticationError::IncorrectCredentials(
                token.username().to_string(),
            ));
        }
        Ok(account.clone())
    }

    fn account(&self, principal: &str) -> Option<AccountInfo> {
        self.accounts
            .get(principal)
            .map(|(_, account)| account.clone())
    }
}
