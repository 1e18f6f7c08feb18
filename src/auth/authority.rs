// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the token-authority project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Token issuance and refresh
//!
//! [`TokenAuthority`] owns the signing key, the credential store and the
//! token lifespan. It provides:
//!
//! - `authenticate`: verify a username/password pair and mint a token
//! - `refresh`: verify an existing token and mint a replacement with a
//!   renewed expiry, without asking for the password again
//!
//! Tokens are HS256 JWTs whose payload is a [`Claims`] value. Nothing about
//! issued tokens is kept server-side: a token stays valid until its own
//! expiry, whether or not it has been refreshed.
//!
//! # Example Usage
//!
//! ```
//! use token_authority::auth::{CredentialStore, TokenAuthority};
//! use chrono::Duration;
//!
//! let users: CredentialStore = [("user1", "passwd")].into_iter().collect();
//! let authority = TokenAuthority::new(b"your-secret-key", users)
//!     .with_lifespan(Duration::minutes(10));
//!
//! let token = authority.authenticate("user1", "passwd").unwrap();
//! let renewed = authority.refresh(&token).unwrap();
//! assert_eq!(authority.decode(&renewed).unwrap().username, "user1");
//! ```

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::Claims;
use super::credentials::CredentialStore;
use super::error::{AuthError, AUTHENTICATION_FAILED};

/// Lifespan of issued tokens when none is configured, in seconds
pub const DEFAULT_TOKEN_LIFESPAN_SECS: u64 = 600;

/// Longest accepted token lifespan, one year
pub const MAX_TOKEN_LIFESPAN_SECS: u64 = 31_536_000;

/// Shortest accepted token lifespan, in milliseconds
pub const MIN_TOKEN_LIFESPAN_MILLIS: i64 = 1;

/// Algorithm used for every token
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Issues and refreshes signed bearer tokens
///
/// All fields are set at construction and never change, so a single
/// authority can be shared between any number of concurrent callers.
pub struct TokenAuthority {
    /// Key used to sign tokens (HMAC secret)
    signing_key: EncodingKey,

    /// Key used to verify tokens, derived from the same secret
    verification_key: DecodingKey,

    /// Known users and their secrets
    credentials: CredentialStore,

    /// Time between issuance (or refresh) and expiry
    lifespan: Duration,

    /// Signature and expiry checks applied by `refresh`
    validation: Validation,
}

impl TokenAuthority {
    /// Create an authority with the given HMAC secret and users
    ///
    /// Tokens are valid for [`DEFAULT_TOKEN_LIFESPAN_SECS`] unless
    /// [`with_lifespan`](Self::with_lifespan) is used.
    pub fn new(secret: impl AsRef<[u8]>, credentials: CredentialStore) -> Self {
        let secret = secret.as_ref();

        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = true;
        // Expiry is enforced to the second
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        TokenAuthority {
            signing_key: EncodingKey::from_secret(secret),
            verification_key: DecodingKey::from_secret(secret),
            credentials,
            lifespan: Duration::seconds(DEFAULT_TOKEN_LIFESPAN_SECS as i64),
            validation,
        }
    }

    /// Set the validity of all issued tokens to the specified duration
    ///
    /// The duration is clamped to the range [`MIN_TOKEN_LIFESPAN_MILLIS`]
    /// to [`MAX_TOKEN_LIFESPAN_SECS`], so issued tokens are never born
    /// expired and their expiry always fits in a timestamp.
    pub fn with_lifespan(mut self, lifespan: Duration) -> Self {
        let min = Duration::milliseconds(MIN_TOKEN_LIFESPAN_MILLIS);
        let max = Duration::seconds(MAX_TOKEN_LIFESPAN_SECS as i64);
        let clamped = lifespan.clamp(min, max);
        if clamped != lifespan {
            log::warn!(
                "Token lifespan {}ms out of range, using {}ms",
                lifespan.num_milliseconds(),
                clamped.num_milliseconds()
            );
        }
        self.lifespan = clamped;
        self
    }

    pub fn lifespan(&self) -> Duration {
        self.lifespan
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Verify a username/password pair and issue a token for it
    ///
    /// # Errors
    ///
    /// - [`AuthError::Unauthenticated`] with the same message whether the
    ///   user is unknown or the password is wrong
    /// - [`AuthError::Internal`] if the token cannot be signed
    pub fn authenticate(&self, username: &str, password: &str) -> Result<String, AuthError> {
        if !self.credentials.verify(username, password) {
            log::warn!("Authentication failed for user {:?}", username);
            return Err(AuthError::authentication_failed());
        }

        let claims = self.fresh_claims(username).ok_or_else(|| {
            AuthError::Internal(format!("{}: expiry out of range", AUTHENTICATION_FAILED))
        })?;
        let token = self.sign(&claims).map_err(|e| {
            AuthError::Internal(format!(
                "{}: failed to sign jwt: {}",
                AUTHENTICATION_FAILED, e
            ))
        })?;

        log::info!(
            "Issued token for user {:?} (expires at {})",
            username,
            claims.expires_at
        );
        Ok(token)
    }

    /// Verify a token and issue a replacement with a renewed expiry
    ///
    /// The username claim is carried over unchanged. The original token is
    /// left untouched and remains usable until it expires.
    ///
    /// # Errors
    ///
    /// See [`decode`](Self::decode) for verification failures.
    /// [`AuthError::Internal`] if the new token cannot be signed.
    pub fn refresh(&self, token: &str) -> Result<String, AuthError> {
        let mut claims = self.decode(token)?;
        let expiry = self.next_expiry().ok_or_else(|| {
            AuthError::Internal("failed to sign token: expiry out of range".to_string())
        })?;
        claims.expires_at = expiry.timestamp();

        let token = self
            .sign(&claims)
            .map_err(|e| AuthError::Internal(format!("failed to sign token: {}", e)))?;

        log::info!(
            "Refreshed token for user {:?} (expires at {})",
            claims.username,
            claims.expires_at
        );
        Ok(token)
    }

    /// Verify a token and return its claims
    ///
    /// The signature and the expiry are checked in a single pass.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Unauthenticated`] if the signature does not match, the
    ///   token has expired, or it is rejected for any other reason once parsed
    ///   (for example a different algorithm)
    /// - [`AuthError::Internal`] if the token is structurally malformed
    ///   (segments, base64, JSON, missing `exp`)
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.verification_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                log::debug!("JWT validation failed: {:?}", err);
                classify_decode_error(err)
            })
    }

    fn fresh_claims(&self, username: &str) -> Option<Claims> {
        self.next_expiry().map(|expiry| Claims::new(username, expiry))
    }

    /// `now + lifespan`, `None` on overflow
    fn next_expiry(&self) -> Option<DateTime<Utc>> {
        Utc::now().checked_add_signed(self.lifespan)
    }

    fn sign(&self, claims: &Claims) -> jsonwebtoken::errors::Result<String> {
        encode(&Header::new(ALGORITHM), claims, &self.signing_key)
    }
}

impl std::fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("users", &self.credentials.len())
            .field("lifespan_secs", &self.lifespan.num_seconds())
            .finish_non_exhaustive()
    }
}

/// Map a verification failure onto the RPC error taxonomy
///
/// Expired tokens are reported as `Unauthenticated`, like bad signatures:
/// both mean the caller has to log in again.
fn classify_decode_error(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_)
        | ErrorKind::MissingRequiredClaim(_) => {
            AuthError::Internal(format!("failed to parse claims: {}", err))
        }
        _ => AuthError::Unauthenticated(format!("{}: {}", AUTHENTICATION_FAILED, err)),
    }
}
