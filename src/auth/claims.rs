// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 The drinks-server Authors

//! Decoded token claims.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims decoded from a verified access token.
///
/// Standard claims (`exp`, `aud`, `iss`) are validated during decode;
/// only `permissions` carries meaning afterwards. `permissions` is
/// `None` when the token was issued without RBAC claims enabled, which
/// is distinct from an empty permission list.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Issuer (the identity provider tenant URL).
    #[serde(default)]
    pub iss: String,

    /// Subject (user id).
    #[serde(default)]
    pub sub: String,

    /// Audience; the provider may emit a string or an array of strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub aud: Option<serde_json::Value>,

    /// Issued-at (seconds since epoch).
    #[serde(default)]
    pub iat: i64,

    /// Expiry (seconds since epoch).
    #[serde(default)]
    pub exp: i64,

    /// Authorized party.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azp: Option<String>,

    /// OAuth scopes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// RBAC permission strings granted to the subject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl Claims {
    /// Whether the claims grant `permission`.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .as_ref()
            .is_some_and(|permissions| permissions.iter().any(|p| p == permission))
    }
}
