/*
 * Responsibility
 * - The authenticated principal as handlers and the role guard see it
 * - Built by TokenProvider::resolve only, stored in request extensions by the
 *   access middleware, dropped with the request
 */
use std::collections::BTreeSet;

/// Principal handed to [`TokenProvider::create_token`](super::TokenProvider::create_token)
/// once an external credential check has succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedPrincipal {
    pub name: String,
    pub roles: Vec<String>,
}

impl AuthenticatedPrincipal {
    pub fn new(
        name: impl Into<String>,
        roles: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }
}

/// Authorization context attached to an authenticated request.
///
/// - `credential` is the raw bearer token, kept for audit correlation only
#[derive(Clone)]
pub struct AuthorizationContext {
    principal: String,
    roles: BTreeSet<String>,
    credential: String,
}

impl std::fmt::Debug for AuthorizationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationContext")
            .field("principal", &self.principal)
            .field("roles", &self.roles)
            .finish_non_exhaustive()
    }
}

impl AuthorizationContext {
    pub(crate) fn new(principal: String, roles: BTreeSet<String>, credential: String) -> Self {
        Self {
            principal,
            roles,
            credential,
        }
    }

    pub fn principal(&self) -> &str {
        &self.principal
    }

    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    pub fn has_any_role<S: AsRef<str>>(&self, roles: &[S]) -> bool {
        roles.iter().any(|r| self.has_role(r.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(roles: &[&str]) -> AuthorizationContext {
        AuthorizationContext::new(
            "alice".into(),
            roles.iter().map(|r| r.to_string()).collect(),
            "header.payload.signature".into(),
        )
    }

    #[test]
    fn any_role_matches_one_of() {
        let c = ctx(&["ROLE_USER"]);
        assert!(c.has_any_role(&["ROLE_USER", "ROLE_ADMIN"]));
        assert!(!c.has_any_role(&["ROLE_ADMIN"]));
    }

    #[test]
    fn roles_are_case_sensitive() {
        assert!(!ctx(&["ROLE_USER"]).has_role("role_user"));
    }

    #[test]
    fn debug_omits_credential() {
        let printed = format!("{:?}", ctx(&["ROLE_USER"]));
        assert!(printed.contains("alice"));
        assert!(!printed.contains("signature"));
    }
}
