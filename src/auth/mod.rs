// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 The drinks-server Authors

//! # Authentication Module
//!
//! Bearer-token authentication and permission enforcement for the
//! drinks API.
//!
//! ## Auth Flow
//!
//! 1. Client obtains an RS256 access token from the identity provider
//! 2. Client sends `Authorization: Bearer <token>`
//! 3. For each protected route the gate:
//!    - extracts the bearer token from the header
//!    - fetches the provider's JWKS and verifies signature, expiry,
//!      issuer, and audience against the key matching the token's `kid`
//!    - checks the route's required permission against the token's
//!      `permissions` claim
//!    - hands the decoded claims to the handler
//!
//! ## Security
//!
//! - JWKS is fetched over HTTPS with a bounded timeout and cached with
//!   a short TTL; key rotation is observed through the `kid` lookup
//! - Only RS256 is accepted
//! - Verifier failures are collapsed into a bare 401 at the gate so
//!   verification detail never reaches the client
//! - Clock skew tolerance is 60 seconds

pub mod claims;
pub mod error;
pub mod extractor;
pub mod jwks;
pub mod middleware;
pub mod permissions;
pub mod verifier;

#[cfg(test)]
pub(crate) mod testing;

pub use claims::Claims;
pub use error::AuthError;
pub use extractor::Auth;
pub use jwks::JwksManager;
pub use permissions::{check_permission, Permission};
pub use verifier::TokenVerifier;
