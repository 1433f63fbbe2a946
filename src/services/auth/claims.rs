use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Separates roles inside the `auth` claim; role names may not contain it.
pub const ROLE_DELIMITER: &str = ",";

/// Access token claims as they travel on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    #[serde(rename = "auth")]
    pub authorities: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    pub exp: i64,
}

/// Claims that passed signature, structure and expiry checks.
///
/// Only [`TokenProvider::parse`](super::TokenProvider::parse) hands these out,
/// so an unverified token can never be resolved into an authorization context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedClaims(TokenClaims);

impl VerifiedClaims {
    pub(crate) fn new(claims: TokenClaims) -> Self {
        Self(claims)
    }

    pub fn subject(&self) -> &str {
        &self.0.sub
    }

    pub fn roles(&self) -> BTreeSet<String> {
        split_roles(&self.0.authorities)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.0.exp, 0)
    }

    pub fn claims(&self) -> &TokenClaims {
        &self.0
    }
}

pub fn join_roles<S: AsRef<str>>(roles: &[S]) -> String {
    roles
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(ROLE_DELIMITER)
}

/// Empty segments are dropped: an empty `auth` claim grants no roles rather
/// than a single role named "".
pub fn split_roles(authorities: &str) -> BTreeSet<String> {
    authorities
        .split(ROLE_DELIMITER)
        .filter(|role| !role.is_empty())
        .map(str::to_string)
        .collect()
}
