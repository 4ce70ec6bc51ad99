// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 The drinks-server Authors

//! # Runtime Configuration
//!
//! This module defines environment variable names and the settings
//! structs loaded from them at startup. Nothing here is a module-level
//! global: `main` builds the settings once and threads them through
//! [`crate::state::AppState`].
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `AUTH0_DOMAIN` | Identity provider tenant domain (e.g. `my-tenant.eu.auth0.com`) | Required |
//! | `AUTH0_AUDIENCE` | Expected JWT audience claim | Required |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;

use url::Url;

/// Environment variable name for the identity provider tenant domain.
pub const AUTH0_DOMAIN_ENV: &str = "AUTH0_DOMAIN";

/// Environment variable name for the expected token audience.
pub const AUTH0_AUDIENCE_ENV: &str = "AUTH0_AUDIENCE";

/// Environment variable name for the server bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the server bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Configuration errors raised while loading settings at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} is required")]
    MissingVar(&'static str),
    #[error("invalid identity provider domain {domain:?}: {source}")]
    InvalidDomain {
        domain: String,
        source: url::ParseError,
    },
}

/// Token verification settings derived from the tenant domain.
///
/// The issuer and JWKS endpoint are fixed functions of the domain:
/// tokens are accepted only from `https://<domain>/` and verified with
/// keys published at `https://<domain>/.well-known/jwks.json`.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// Expected `aud` claim.
    pub audience: String,
    /// Expected `iss` claim (`https://<domain>/`).
    pub issuer: String,
    /// JWKS document URL.
    pub jwks_url: String,
}

impl AuthSettings {
    /// Build settings for a tenant domain and audience.
    pub fn new(domain: &str, audience: impl Into<String>) -> Result<Self, ConfigError> {
        let jwks_url = Url::parse(&format!("https://{domain}/.well-known/jwks.json")).map_err(
            |source| ConfigError::InvalidDomain {
                domain: domain.to_string(),
                source,
            },
        )?;

        Ok(Self {
            audience: audience.into(),
            issuer: format!("https://{domain}/"),
            jwks_url: jwks_url.to_string(),
        })
    }

    /// Load settings from `AUTH0_DOMAIN` and `AUTH0_AUDIENCE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let domain =
            env::var(AUTH0_DOMAIN_ENV).map_err(|_| ConfigError::MissingVar(AUTH0_DOMAIN_ENV))?;
        let audience = env::var(AUTH0_AUDIENCE_ENV)
            .map_err(|_| ConfigError::MissingVar(AUTH0_AUDIENCE_ENV))?;
        Self::new(&domain, audience)
    }
}
