use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;

use hello_jwt::services::auth::{AuthenticatedPrincipal, SigningKey, TokenProvider};

/// Mint an HS512 access token the API accepts, for local testing.
///
/// The token is signed with the same secret and lifetime settings the server
/// reads (`JWT_SECRET`, `JWT_TOKEN_VALIDITY_SECONDS`, `.env` honoured).
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// Subject (username) placed in `sub`
    #[arg(long)]
    sub: String,

    /// Role to grant; repeat for several (e.g. --role ROLE_USER --role ROLE_ADMIN)
    #[arg(long = "role")]
    roles: Vec<String>,

    /// Base64 signing secret (decoded length >= 64 bytes)
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    secret: String,

    /// Token lifetime in seconds
    #[arg(
        long,
        env = "JWT_TOKEN_VALIDITY_SECONDS",
        default_value_t = 86_400,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    validity_seconds: u64,

    /// Print only the token (no extra lines)
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let key = SigningKey::from_base64(&args.secret)?;
    let tokens = TokenProvider::new(key, args.validity_seconds);

    let now = Utc::now();
    let principal = AuthenticatedPrincipal::new(args.sub, args.roles);
    let token = tokens.create_token(&principal, now)?;

    if args.quiet {
        println!("{token}");
        return Ok(());
    }

    // read back what a server with the same key will see
    let claims = tokens.parse(&token, now)?;
    let expires_at = claims.expires_at().context("exp out of range")?;
    let roles: Vec<String> = claims.roles().into_iter().collect();

    println!("sub:        {}", claims.subject());
    println!("roles:      {}", roles.join(" "));
    println!("expires at: {}", expires_at.to_rfc3339());
    println!();
    println!("Authorization: Bearer {token}");

    Ok(())
}
