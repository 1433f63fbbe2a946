/*
 * Responsibility
 * - Load settings from the environment (JWT secret, token lifetime, listen port,
 *   request body / time limits)
 * - Validate them up front (missing or broken values stop the process at boot)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TOKEN_VALIDITY_SECONDS: u64 = 86_400; // 1 day
// Auth traffic is header-only; bodies above this are refused with 413.
const DEFAULT_BODY_LIMIT_BYTES: u64 = 64 * 1024;
const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
    /// The signing secret is not standard base64.
    SecretEncoding,
    /// The decoded signing secret is shorter than HS512 requires.
    SecretTooShort { len: usize, min: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
            ConfigError::SecretEncoding => write!(f, "JWT secret must be base64 encoded"),
            ConfigError::SecretTooShort { len, min } => write!(
                f,
                "JWT secret decodes to {} bytes, at least {} are required",
                len, min
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Transport limits applied to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpLimits {
    pub body_limit_bytes: usize,
    pub request_timeout: Duration,
}

impl Default for HttpLimits {
    fn default() -> Self {
        Self {
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES as usize,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECONDS),
        }
    }
}

impl HttpLimits {
    /// `REQUEST_BODY_LIMIT_BYTES` and `REQUEST_TIMEOUT_SECONDS`, each optional.
    pub fn parse(body_limit: Option<&str>, timeout: Option<&str>) -> Result<Self, ConfigError> {
        let body_limit_bytes = parse_positive(
            "REQUEST_BODY_LIMIT_BYTES",
            body_limit,
            DEFAULT_BODY_LIMIT_BYTES,
        )?;
        let timeout_seconds = parse_positive(
            "REQUEST_TIMEOUT_SECONDS",
            timeout,
            DEFAULT_REQUEST_TIMEOUT_SECONDS,
        )?;

        Ok(Self {
            body_limit_bytes: usize::try_from(body_limit_bytes)
                .map_err(|_| ConfigError::Invalid("REQUEST_BODY_LIMIT_BYTES"))?,
            request_timeout: Duration::from_secs(timeout_seconds),
        })
    }
}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // base64 encoded HMAC secret; decoded once into a SigningKey at boot
    pub jwt_secret: String,
    pub token_validity_seconds: u64,

    pub http: HttpLimits,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the secret
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("token_validity_seconds", &self.token_validity_seconds)
            .field("http", &self.http)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = match std::env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            Err(_) => DEFAULT_PORT,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;

        let token_validity_seconds =
            parse_validity_seconds(std::env::var("JWT_TOKEN_VALIDITY_SECONDS").ok().as_deref())?;

        let http = HttpLimits::parse(
            std::env::var("REQUEST_BODY_LIMIT_BYTES").ok().as_deref(),
            std::env::var("REQUEST_TIMEOUT_SECONDS").ok().as_deref(),
        )?;

        Ok(Self {
            addr,
            app_env,
            jwt_secret,
            token_validity_seconds,
            http,
        })
    }
}

/// Token lifetime must be a positive number of seconds; absent means the default.
pub fn parse_validity_seconds(raw: Option<&str>) -> Result<u64, ConfigError> {
    parse_positive(
        "JWT_TOKEN_VALIDITY_SECONDS",
        raw,
        DEFAULT_TOKEN_VALIDITY_SECONDS,
    )
}

fn parse_positive(key: &'static str, raw: Option<&str>, default: u64) -> Result<u64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(ConfigError::Invalid(key)),
        Ok(n) => Ok(n),
    }
}
