// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 The drinks-server Authors

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Authentication and authorization failure modes.
///
/// Each variant carries a fixed machine code and HTTP status. The
/// display strings are the client-facing descriptions and must stay
/// stable; clients match on them.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header on the request.
    #[error("Authorization header is expected.")]
    MissingAuthHeader,
    /// Header scheme is not `Bearer`.
    #[error("Authorization header must start with \"Bearer\".")]
    InvalidScheme,
    /// Header carries a scheme but no token.
    #[error("Token not found.")]
    MissingToken,
    /// Header splits into more than two parts.
    #[error("Authorization header must be bearer token.")]
    MalformedHeader,
    /// Token header carries no key id.
    #[error("Authorization malformed.")]
    MissingKeyId,
    /// No RSA key in the JWKS matches the token's key id.
    #[error("Unable to find the appropriate key.")]
    NoMatchingKey,
    /// Token failed to parse or its signature did not verify.
    #[error("Unable to parse authentication token.")]
    MalformedToken,
    /// Signature valid but the token has expired.
    #[error("Token expired.")]
    TokenExpired,
    /// Audience or issuer did not match the configured tenant.
    #[error("Incorrect claims. Please, check the audience and issuer.")]
    InvalidClaims,
    /// Token carries no permissions claim at all.
    #[error("Permissions not included in JWT.")]
    MissingPermissionsClaim,
    /// Permissions claim present but missing the required permission.
    #[error("Permission not found.")]
    InsufficientPermission,
    /// Generic failure the gate substitutes for verifier errors.
    #[error("unauthorized")]
    Unauthorized,
    /// JWKS endpoint could not be fetched or parsed.
    #[error("Unable to fetch verification keys: {0}")]
    JwksFetch(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    success: bool,
    error: u16,
    message: String,
}

impl AuthError {
    /// Machine code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "authorization_header_missing",
            AuthError::InvalidScheme
            | AuthError::MissingToken
            | AuthError::MalformedHeader
            | AuthError::MissingKeyId
            | AuthError::NoMatchingKey
            | AuthError::MalformedToken => "invalid_header",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidClaims | AuthError::MissingPermissionsClaim => "invalid_claims",
            AuthError::InsufficientPermission | AuthError::Unauthorized => "unauthorized",
            AuthError::JwksFetch(_) => "jwks_fetch_error",
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthHeader
            | AuthError::InvalidScheme
            | AuthError::MissingToken
            | AuthError::MalformedHeader
            | AuthError::MissingKeyId
            | AuthError::TokenExpired
            | AuthError::InvalidClaims
            | AuthError::Unauthorized
            | AuthError::JwksFetch(_) => StatusCode::UNAUTHORIZED,
            AuthError::NoMatchingKey
            | AuthError::MalformedToken
            | AuthError::MissingPermissionsClaim => StatusCode::BAD_REQUEST,
            AuthError::InsufficientPermission => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}
