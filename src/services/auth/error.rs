use std::fmt;

use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

/// Why a bearer token was rejected.
///
/// The kind is kept for logging only; callers outside the auth service see a
/// plain "not authenticated" outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenErrorKind {
    BadSignature,
    Malformed,
    Expired,
    UnsupportedFormat,
    Unparseable,
}

impl TokenErrorKind {
    /// Human-readable category used in log lines.
    pub fn category(&self) -> &'static str {
        match self {
            Self::BadSignature => "invalid signature",
            Self::Malformed => "malformed token",
            Self::Expired => "expired token",
            Self::UnsupportedFormat => "unsupported token",
            Self::Unparseable => "invalid token argument",
        }
    }
}

impl fmt::Display for TokenErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.category())
    }
}

#[derive(Debug, Error)]
#[error("{kind}")]
pub struct TokenError {
    kind: TokenErrorKind,
    #[source]
    source: Option<jsonwebtoken::errors::Error>,
}

impl TokenError {
    pub fn new(kind: TokenErrorKind) -> Self {
        Self { kind, source: None }
    }

    pub fn kind(&self) -> TokenErrorKind {
        self.kind
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        let kind = match e.kind() {
            ErrorKind::InvalidSignature => TokenErrorKind::BadSignature,
            ErrorKind::ExpiredSignature => TokenErrorKind::Expired,
            ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::MissingAlgorithm => TokenErrorKind::UnsupportedFormat,
            ErrorKind::InvalidToken
            | ErrorKind::MissingRequiredClaim(_)
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => TokenErrorKind::Malformed,
            _ => TokenErrorKind::Unparseable,
        };

        Self {
            kind,
            source: Some(e),
        }
    }
}
