pub mod claims;
pub mod context;
pub mod error;
pub mod factory;
pub mod signing_key;
pub mod token_provider;

pub use claims::{TokenClaims, VerifiedClaims};
pub use context::{AuthenticatedPrincipal, AuthorizationContext};
pub use error::{TokenError, TokenErrorKind};
pub use factory::build_token_provider;
pub use signing_key::SigningKey;
pub use token_provider::TokenProvider;
