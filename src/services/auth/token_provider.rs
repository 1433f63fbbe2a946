use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, Header, Validation};
use tracing::{error, info};

use crate::error::AppError;
use crate::services::auth::{
    AuthenticatedPrincipal, AuthorizationContext, SigningKey, TokenError, TokenErrorKind,
    claims::{ROLE_DELIMITER, TokenClaims, VerifiedClaims, join_roles},
};

/// Issues and verifies HS512 access tokens.
///
/// Every time-dependent method takes `now` explicitly; the `*_now` style
/// wrappers (`is_valid`, `authenticate_now`) read the live clock.
#[derive(Clone)]
pub struct TokenProvider {
    key: SigningKey,
    validity_seconds: u64,
    validation: Validation,
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("validity_seconds", &self.validity_seconds)
            .finish_non_exhaustive()
    }
}

impl TokenProvider {
    pub fn new(key: SigningKey, validity_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS512);
        // Expiry is checked against the caller's `now` in `parse`, strictly (`now < exp`).
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            key,
            validity_seconds,
            validation,
        }
    }

    /// Sign a token for `principal`, valid from `now` for the configured lifetime.
    ///
    /// Refuses a blank name and any role that is empty or contains the role
    /// delimiter: neither would come back unchanged from `parse`.
    pub fn create_token(
        &self,
        principal: &AuthenticatedPrincipal,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        check_principal(principal)?;

        let iat = now.timestamp();
        let ttl = i64::try_from(self.validity_seconds).unwrap_or(i64::MAX);

        let claims = TokenClaims {
            sub: principal.name.clone(),
            authorities: join_roles(&principal.roles),
            iat: Some(iat),
            exp: iat.saturating_add(ttl),
        };

        let mut header = Header::new(Algorithm::HS512);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, &claims, self.key.encoding()).map_err(|e| {
            error!(error = %e, "failed to sign JWT");
            AppError::Internal
        })
    }

    /// Verify signature, structure and expiry of `token` as of `now`.
    pub fn parse(&self, token: &str, now: DateTime<Utc>) -> Result<VerifiedClaims, TokenError> {
        if token.trim().is_empty() {
            return Err(TokenError::new(TokenErrorKind::Unparseable));
        }
        // header.payload. (no signature) is an unsecured JWT
        if token.matches('.').count() == 2 && token.ends_with('.') {
            return Err(TokenError::new(TokenErrorKind::UnsupportedFormat));
        }

        let data =
            jsonwebtoken::decode::<TokenClaims>(token, self.key.decoding(), &self.validation)?;
        let claims = data.claims;

        if claims.sub.trim().is_empty() {
            return Err(TokenError::new(TokenErrorKind::Malformed));
        }
        if now.timestamp() >= claims.exp {
            return Err(TokenError::new(TokenErrorKind::Expired));
        }

        Ok(VerifiedClaims::new(claims))
    }

    pub fn is_valid(&self, token: &str) -> bool {
        self.is_valid_at(token, Utc::now())
    }

    /// Boolean view of `parse`; the failure kind only reaches the log.
    pub fn is_valid_at(&self, token: &str, now: DateTime<Utc>) -> bool {
        self.parse(token, now).inspect_err(log_rejection).is_ok()
    }

    /// Turn verified claims into the context stored on the request.
    pub fn resolve(&self, claims: VerifiedClaims, token: &str) -> AuthorizationContext {
        AuthorizationContext::new(
            claims.subject().to_string(),
            claims.roles(),
            token.to_string(),
        )
    }

    pub fn authenticate(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthorizationContext, TokenError> {
        let claims = self.parse(token, now).inspect_err(log_rejection)?;
        Ok(self.resolve(claims, token))
    }

    pub fn authenticate_now(&self, token: &str) -> Result<AuthorizationContext, TokenError> {
        self.authenticate(token, Utc::now())
    }
}

fn check_principal(principal: &AuthenticatedPrincipal) -> Result<(), AppError> {
    if principal.name.trim().is_empty() {
        return Err(AppError::InvalidRequest("principal name must not be blank".to_string()));
    }
    if let Some(role) = principal
        .roles
        .iter()
        .find(|r| r.is_empty() || r.contains(ROLE_DELIMITER))
    {
        return Err(AppError::InvalidRequest(format!(
            "role {role:?} must be non-empty and free of {ROLE_DELIMITER:?}"
        )));
    }
    Ok(())
}

fn log_rejection(err: &TokenError) {
    info!(reason = err.kind().category(), "bearer token rejected");
}
