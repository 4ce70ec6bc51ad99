// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 The drinks-server Authors

//! Token signature and claims verification.

use jsonwebtoken::{decode, decode_header, Algorithm, Validation};

use super::claims::Claims;
use super::error::AuthError;
use super::jwks::JwksManager;
use crate::config::AuthSettings;

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Verifies bearer tokens against the provider's published keys.
///
/// The accepted algorithm, audience, and issuer are fixed at
/// construction. The key used for any given token is whichever
/// currently-advertised JWKS entry matches the token's `kid`, so key
/// rotation needs no code change here.
pub struct TokenVerifier {
    jwks: JwksManager,
    issuer: String,
    audience: String,
}

impl TokenVerifier {
    pub fn new(settings: AuthSettings) -> Self {
        Self {
            jwks: JwksManager::new(settings.jwks_url),
            issuer: settings.issuer,
            audience: settings.audience,
        }
    }

    /// The underlying JWKS manager (used by the health check).
    pub fn jwks(&self) -> &JwksManager {
        &self.jwks
    }

    /// Verify `token` and return its decoded claims.
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::MalformedToken)?;
        let kid = header.kid.ok_or(AuthError::MissingKeyId)?;

        let decoding_key = self.jwks.decoding_key(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.leeway = CLOCK_SKEW_LEEWAY;
        validation.set_audience(&[&self.audience]);
        validation.set_issuer(&[&self.issuer]);

        let token_data =
            decode::<Claims>(token, &decoding_key, &validation).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidIssuer
                | jsonwebtoken::errors::ErrorKind::InvalidAudience => AuthError::InvalidClaims,
                _ => AuthError::MalformedToken,
            })?;

        Ok(token_data.claims)
    }
}
