// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 The drinks-server Authors

//! Route permissions and their enforcement.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{AuthError, Claims};

/// Permissions understood by this API.
///
/// The string forms mirror the identity provider's RBAC configuration
/// (`<verb>:<resource>`); tokens carry them verbatim in the
/// `permissions` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Permission {
    /// Read drinks including full recipes.
    #[serde(rename = "get:drinks-detail")]
    DrinksDetailRead,
    /// Create a drink.
    #[serde(rename = "post:drinks")]
    DrinksCreate,
    /// Update a drink.
    #[serde(rename = "patch:drinks")]
    DrinksUpdate,
    /// Delete a drink.
    #[serde(rename = "delete:drinks")]
    DrinksDelete,
}

impl Permission {
    /// The permission string as carried in token claims.
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::DrinksDetailRead => "get:drinks-detail",
            Permission::DrinksCreate => "post:drinks",
            Permission::DrinksUpdate => "patch:drinks",
            Permission::DrinksDelete => "delete:drinks",
        }
    }

    /// Parse a permission string.
    pub fn from_str(s: &str) -> Option<Permission> {
        match s {
            "get:drinks-detail" => Some(Permission::DrinksDetailRead),
            "post:drinks" => Some(Permission::DrinksCreate),
            "patch:drinks" => Some(Permission::DrinksUpdate),
            "delete:drinks" => Some(Permission::DrinksDelete),
            _ => None,
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Check that `claims` grant the `required` permission string.
///
/// A token with no `permissions` claim at all was issued without RBAC
/// enabled and is rejected as `invalid_claims` rather than merely
/// forbidden.
pub fn check_permission(required: &str, claims: &Claims) -> Result<(), AuthError> {
    let permissions = claims
        .permissions
        .as_deref()
        .ok_or(AuthError::MissingPermissionsClaim)?;

    if permissions.iter().any(|p| p == required) {
        Ok(())
    } else {
        Err(AuthError::InsufficientPermission)
    }
}
