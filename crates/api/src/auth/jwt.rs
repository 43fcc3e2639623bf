//! JWT access-token generation and validation.
//!
//! Access tokens are HMAC-signed JWTs whose subject is the username. The
//! signing algorithm is configurable within the HMAC family (HS256/384/512).

use std::str::FromStr;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the username the token was issued to.
    pub sub: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit.
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret used to sign and verify tokens.
    pub secret: String,
    /// Signing algorithm (default: HS256).
    pub algorithm: Algorithm,
    /// Access token lifetime in minutes (default: 30, always positive).
    pub access_token_expiry_mins: u32,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: u32 = 30;
/// Default signing algorithm name.
const DEFAULT_ALGORITHM: &str = "HS256";

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_SECRET`               | **yes**  | --      |
    /// | `JWT_ALGORITHM`            | no       | `HS256` |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `30`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty, if the algorithm does
    /// not parse, or if the expiry is not a positive whole number of minutes.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let algorithm = parse_algorithm(
            &std::env::var("JWT_ALGORITHM").unwrap_or_else(|_| DEFAULT_ALGORITHM.to_string()),
        )
        .unwrap_or_else(|e| panic!("{e}"));

        let access_token_expiry_mins = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .map(|raw| parse_expiry_mins(&raw))
            .unwrap_or(Ok(DEFAULT_ACCESS_EXPIRY_MINS))
            .unwrap_or_else(|e| panic!("{e}"));

        Self {
            secret,
            algorithm,
            access_token_expiry_mins,
        }
    }

    /// Access token lifetime in seconds, as reported to clients.
    pub fn expires_in_secs(&self) -> i64 {
        i64::from(self.access_token_expiry_mins) * 60
    }
}

/// Parse a token lifetime in minutes. Zero, negative and non-numeric values
/// are rejected.
pub fn parse_expiry_mins(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(mins) if mins > 0 => Ok(mins),
        _ => Err(format!(
            "JWT_ACCESS_EXPIRY_MINS must be a positive number of minutes, got '{raw}'"
        )),
    }
}

/// Parse an algorithm name, accepting only the shared-secret HMAC family.
pub fn parse_algorithm(name: &str) -> Result<Algorithm, String> {
    let algorithm = Algorithm::from_str(name.trim())
        .map_err(|_| format!("Unknown JWT algorithm '{name}'"))?;
    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
        other => Err(format!(
            "JWT algorithm {other:?} is not supported; use HS256, HS384 or HS512"
        )),
    }
}

/// Generate an access token for the given username.
///
/// The token carries the subject, issue time, expiration and a unique `jti`.
pub fn generate_access_token(
    username: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.expires_in_secs();

    let claims = Claims {
        sub: username.to_string(),
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(config.algorithm),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Checks the signature, the algorithm and expiry; `sub` must be present.
/// Expiry is exact: a token is rejected as soon as `exp` has passed.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(config.algorithm);
    validation.set_required_spec_claims(&["exp", "sub"]);
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}
