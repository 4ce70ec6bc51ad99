// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 The drinks-server Authors

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::TokenVerifier;
use crate::config::AuthSettings;
use crate::store::InMemoryStore;

/// Application context constructed once at startup and injected into
/// every handler through axum's `State`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(store: InMemoryStore, auth: AuthSettings) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            verifier: Arc::new(TokenVerifier::new(auth)),
        }
    }
}
