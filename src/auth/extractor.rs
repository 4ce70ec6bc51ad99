// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 The drinks-server Authors

//! Bearer token extraction and the `Auth` handler extractor.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::{AuthError, Claims};
use crate::state::AppState;

/// Extract the bearer token from an `Authorization` header value.
///
/// The header must be exactly `Bearer <token>`: the scheme is matched
/// case-insensitively, a lone scheme or extra whitespace-separated
/// parts are malformed. No further syntactic validation is applied to
/// the token itself.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let value = match header {
        Some(value) if !value.trim().is_empty() => value,
        _ => return Err(AuthError::MissingAuthHeader),
    };

    let parts: Vec<&str> = value.split_whitespace().collect();

    if !parts[0].eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidScheme);
    }

    match parts.len() {
        1 => Err(AuthError::MissingToken),
        2 => Ok(parts[1]),
        _ => Err(AuthError::MalformedHeader),
    }
}

/// Extractor handing verified claims to a handler.
///
/// Routes behind the permission gate get the claims the gate already
/// verified and injected. Used on a route without a gate, the extractor
/// authenticates the request itself with no permission check (the
/// "authenticated, no specific permission" mode), collapsing verifier
/// failures the same way the gate does.
///
/// # Example
///
/// ```rust,ignore
/// async fn list_drinks_detail(
///     Auth(claims): Auth,
///     State(state): State<AppState>,
/// ) -> Json<DrinkDetailResponse> {
///     // claims.permissions were checked by the route's gate
/// }
/// ```
pub struct Auth(pub Claims);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<Claims>().cloned() {
            return Ok(Auth(claims));
        }

        let header = match parts.headers.get(AUTHORIZATION) {
            Some(value) => Some(value.to_str().map_err(|_| AuthError::MalformedHeader)?),
            None => None,
        };
        let token = bearer_token(header)?;

        match state.verifier.verify(token).await {
            Ok(claims) => Ok(Auth(claims)),
            Err(err) => {
                tracing::debug!(error = %err, "token verification failed");
                Err(AuthError::Unauthorized)
            }
        }
    }
}
