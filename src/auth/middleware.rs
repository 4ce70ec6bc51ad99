// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 The drinks-server Authors

//! Per-route authorization gate.
//!
//! Each protected route names its required [`Permission`] and is
//! wrapped with `axum::middleware::from_fn_with_state` in the router:
//!
//! ```rust,ignore
//! .route(
//!     "/drinks-detail",
//!     get(drinks::list_drinks_detail).layer(middleware::from_fn_with_state(
//!         state.clone(),
//!         |state: State<AppState>, request: Request, next: Next| {
//!             require_permission(state, Permission::DrinksDetailRead, request, next)
//!         },
//!     )),
//! )
//! ```
//!
//! The gate runs the full chain before the handler: extract bearer
//! token, verify signature and claims, enforce the permission, then
//! inject the decoded [`Claims`] into the request extensions for the
//! handler's [`super::Auth`] extractor.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::extractor::bearer_token;
use super::{check_permission, AuthError, Permission};
use crate::state::AppState;

/// Authorization gate for a single protected route.
///
/// Extraction and permission failures propagate with their specific
/// error. Verification failures of any kind are logged and then
/// replaced with a bare 401 `unauthorized`, so verifier detail never
/// reaches the client.
pub async fn require_permission(
    State(state): State<AppState>,
    permission: Permission,
    mut request: Request,
    next: Next,
) -> Response {
    let token = {
        let header = match request.headers().get(AUTHORIZATION) {
            Some(value) => match value.to_str() {
                Ok(value) => Some(value),
                Err(_) => return AuthError::MalformedHeader.into_response(),
            },
            None => None,
        };

        match bearer_token(header) {
            Ok(token) => token.to_string(),
            Err(err) => return err.into_response(),
        }
    };

    let claims = match state.verifier.verify(&token).await {
        Ok(claims) => claims,
        Err(err) => {
            tracing::debug!(
                error = %err,
                code = err.error_code(),
                "token verification failed, returning generic unauthorized"
            );
            return AuthError::Unauthorized.into_response();
        }
    };

    if let Err(err) = check_permission(permission.as_str(), &claims) {
        return err.into_response();
    }

    request.extensions_mut().insert(claims);
    next.run(request).await
}
