// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 The drinks-server Authors

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{middleware::require_permission, Permission},
    models::{
        CreateDrinkRequest, DeleteDrinkResponse, Drink, DrinkDetailResponse, DrinkSummary,
        DrinkSummaryResponse, IngredientPart, IngredientSummary, UpdateDrinkRequest,
    },
    state::AppState,
};

pub mod drinks;
pub mod health;

/// Build the application router.
///
/// Each protected route carries its own authorization gate; the gate
/// helper cannot be wrapped in a layer-returning function because the
/// closure type is unnameable, so the `from_fn_with_state` calls are
/// wired inline.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/drinks", get(drinks::list_drinks))
        .route(
            "/drinks",
            post(drinks::create_drink).layer(middleware::from_fn_with_state(
                state.clone(),
                |state: State<AppState>, request: Request, next: Next| {
                    require_permission(state, Permission::DrinksCreate, request, next)
                },
            )),
        )
        .route(
            "/drinks-detail",
            get(drinks::list_drinks_detail).layer(middleware::from_fn_with_state(
                state.clone(),
                |state: State<AppState>, request: Request, next: Next| {
                    require_permission(state, Permission::DrinksDetailRead, request, next)
                },
            )),
        )
        .route(
            "/drinks/{id}",
            patch(drinks::update_drink).layer(middleware::from_fn_with_state(
                state.clone(),
                |state: State<AppState>, request: Request, next: Next| {
                    require_permission(state, Permission::DrinksUpdate, request, next)
                },
            )),
        )
        .route(
            "/drinks/{id}",
            delete(drinks::delete_drink).layer(middleware::from_fn_with_state(
                state.clone(),
                |state: State<AppState>, request: Request, next: Next| {
                    require_permission(state, Permission::DrinksDelete, request, next)
                },
            )),
        )
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .with_state(state);

    // Router::layer nests bottom-up: the id is set outermost, so the
    // trace span and the propagated response header both observe it.
    Router::new()
        .merge(api)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        drinks::list_drinks,
        drinks::list_drinks_detail,
        drinks::create_drink,
        drinks::update_drink,
        drinks::delete_drink,
        health::health,
        health::liveness
    ),
    components(
        schemas(
            Drink,
            DrinkSummary,
            IngredientPart,
            IngredientSummary,
            CreateDrinkRequest,
            UpdateDrinkRequest,
            DrinkDetailResponse,
            DrinkSummaryResponse,
            DeleteDrinkResponse,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Drinks", description = "Menu management"),
        (name = "Health", description = "Service health")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::testing;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn app() -> Router {
        let jwks_url = testing::spawn_jwks_server().await;
        router(testing::app_state(jwks_url))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn bearer(token: &str) -> String {
        format!("Bearer {token}")
    }

    fn token_with(permissions: &[&str]) -> String {
        testing::sign_token(&testing::claims_with_permissions(permissions))
    }

    #[tokio::test]
    async fn public_listing_requires_no_token() {
        let app = app().await;
        let (status, body) = send(
            app,
            Request::builder().uri("/drinks").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["drinks"], json!([]));
    }

    #[tokio::test]
    async fn missing_header_keeps_the_extractor_error() {
        let app = app().await;
        let (status, body) = send(
            app,
            Request::builder()
                .uri("/drinks-detail")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], 401);
        assert_eq!(body["message"], "Authorization header is expected.");
    }

    #[tokio::test]
    async fn malformed_scheme_keeps_the_extractor_error() {
        let app = app().await;
        let (status, body) = send(
            app,
            Request::builder()
                .uri("/drinks-detail")
                .header(header::AUTHORIZATION, "Token abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body["message"],
            "Authorization header must start with \"Bearer\"."
        );
    }

    #[tokio::test]
    async fn garbage_token_collapses_to_generic_unauthorized() {
        let app = app().await;
        let (status, body) = send(
            app,
            Request::builder()
                .uri("/drinks-detail")
                .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], 401);
        assert_eq!(body["message"], "unauthorized");
    }

    #[tokio::test]
    async fn expired_token_collapses_to_generic_unauthorized() {
        let app = app().await;
        let mut claims = testing::claims_with_permissions(&["get:drinks-detail"]);
        claims.exp = testing::unix_now() - 3600;
        let token = testing::sign_token(&claims);

        let (status, body) = send(
            app,
            Request::builder()
                .uri("/drinks-detail")
                .header(header::AUTHORIZATION, bearer(&token))
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "unauthorized");
    }

    #[tokio::test]
    async fn token_without_permissions_claim_is_invalid_claims() {
        let app = app().await;
        let mut claims = testing::claims_with_permissions(&[]);
        claims.permissions = None;
        let token = testing::sign_token(&claims);

        let (status, body) = send(
            app,
            Request::builder()
                .uri("/drinks-detail")
                .header(header::AUTHORIZATION, bearer(&token))
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Permissions not included in JWT.");
    }

    #[tokio::test]
    async fn missing_permission_is_forbidden() {
        let app = app().await;
        let token = token_with(&["get:drinks-detail"]);

        let (status, body) = send(
            app,
            Request::builder()
                .method("POST")
                .uri("/drinks")
                .header(header::AUTHORIZATION, bearer(&token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"title": "Cortado", "recipe": []}).to_string(),
                ))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], 403);
        assert_eq!(body["message"], "Permission not found.");
    }

    #[tokio::test]
    async fn full_crud_flow_with_granted_permissions() {
        let app = app().await;
        let token = token_with(&[
            "get:drinks-detail",
            "post:drinks",
            "patch:drinks",
            "delete:drinks",
        ]);

        // Create.
        let (status, body) = send(
            app.clone(),
            Request::builder()
                .method("POST")
                .uri("/drinks")
                .header(header::AUTHORIZATION, bearer(&token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "title": "Matcha Latte",
                        "recipe": [
                            {"name": "matcha", "color": "green", "parts": 1},
                            {"name": "milk", "color": "white", "parts": 3}
                        ]
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let id = body["drinks"][0]["id"].as_i64().unwrap();

        // Public listing hides ingredient names.
        let (_, body) = send(
            app.clone(),
            Request::builder().uri("/drinks").body(Body::empty()).unwrap(),
        )
        .await;
        assert!(body["drinks"][0]["recipe"][0].get("name").is_none());

        // Detail listing shows them.
        let (status, body) = send(
            app.clone(),
            Request::builder()
                .uri("/drinks-detail")
                .header(header::AUTHORIZATION, bearer(&token))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["drinks"][0]["recipe"][0]["name"], "matcha");

        // Update.
        let (status, body) = send(
            app.clone(),
            Request::builder()
                .method("PATCH")
                .uri(format!("/drinks/{id}"))
                .header(header::AUTHORIZATION, bearer(&token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"title": "Iced Matcha"}).to_string()))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["drinks"][0]["title"], "Iced Matcha");

        // Delete echoes the id.
        let (status, body) = send(
            app.clone(),
            Request::builder()
                .method("DELETE")
                .uri(format!("/drinks/{id}"))
                .header(header::AUTHORIZATION, bearer(&token))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "delete": id}));

        // Deleting again is not found, in the failure envelope.
        let (status, body) = send(
            app,
            Request::builder()
                .method("DELETE")
                .uri(format!("/drinks/{id}"))
                .header(header::AUTHORIZATION, bearer(&token))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({"success": false, "error": 404, "message": "resource not found"})
        );
    }

    #[tokio::test]
    async fn unmatched_key_id_collapses_at_the_gate() {
        let app = app().await;
        let claims = testing::claims_with_permissions(&["get:drinks-detail"]);
        let token = testing::sign_token_with_kid(&claims, Some("rotated-away"));

        let (status, body) = send(
            app,
            Request::builder()
                .uri("/drinks-detail")
                .header(header::AUTHORIZATION, bearer(&token))
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        // The verifier classified this as a 400-level key problem, but
        // the gate only ever reports the generic 401.
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "unauthorized");
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(testing::app_state(
            "http://127.0.0.1:9/.well-known/jwks.json",
        ));
        let _ = app.into_make_service();
    }
}
