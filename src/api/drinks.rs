// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 The drinks-server Authors

//! Drink endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{
        CreateDrinkRequest, DeleteDrinkResponse, Drink, DrinkDetailResponse, DrinkSummaryResponse,
        UpdateDrinkRequest,
    },
    state::AppState,
};

/// Public menu listing: recipes reduced to colors and proportions.
#[utoipa::path(
    get,
    path = "/drinks",
    tag = "Drinks",
    responses((status = 200, description = "Menu in summary form", body = DrinkSummaryResponse))
)]
pub async fn list_drinks(State(state): State<AppState>) -> Json<DrinkSummaryResponse> {
    let store = state.store.read().await;
    Json(DrinkSummaryResponse {
        success: true,
        drinks: store.list().iter().map(Drink::summary).collect(),
    })
}

/// Full menu listing including ingredient names.
#[utoipa::path(
    get,
    path = "/drinks-detail",
    tag = "Drinks",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Menu with full recipes", body = DrinkDetailResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Token lacks get:drinks-detail"),
    )
)]
pub async fn list_drinks_detail(
    Auth(claims): Auth,
    State(state): State<AppState>,
) -> Json<DrinkDetailResponse> {
    tracing::debug!(subject = %claims.sub, "listing drinks with recipes");

    let store = state.store.read().await;
    Json(DrinkDetailResponse {
        success: true,
        drinks: store.list(),
    })
}

/// Create a new drink.
#[utoipa::path(
    post,
    path = "/drinks",
    tag = "Drinks",
    security(("bearer" = [])),
    request_body = CreateDrinkRequest,
    responses(
        (status = 200, description = "Created drink", body = DrinkDetailResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Token lacks post:drinks"),
        (status = 422, description = "Duplicate title"),
    )
)]
pub async fn create_drink(
    Auth(claims): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreateDrinkRequest>,
) -> Result<Json<DrinkDetailResponse>, ApiError> {
    let mut store = state.store.write().await;
    let drink = store.create(request)?;

    tracing::info!(subject = %claims.sub, drink_id = drink.id, title = %drink.title, "drink created");

    Ok(Json(DrinkDetailResponse {
        success: true,
        drinks: vec![drink],
    }))
}

/// Update a drink's title and/or recipe.
#[utoipa::path(
    patch,
    path = "/drinks/{id}",
    tag = "Drinks",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Drink to update")),
    request_body = UpdateDrinkRequest,
    responses(
        (status = 200, description = "Updated drink", body = DrinkDetailResponse),
        (status = 404, description = "No drink with this id"),
    )
)]
pub async fn update_drink(
    Auth(claims): Auth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateDrinkRequest>,
) -> Result<Json<DrinkDetailResponse>, ApiError> {
    let mut store = state.store.write().await;
    let drink = store.update(id, request)?;

    tracing::info!(subject = %claims.sub, drink_id = drink.id, "drink updated");

    Ok(Json(DrinkDetailResponse {
        success: true,
        drinks: vec![drink],
    }))
}

/// Delete a drink.
#[utoipa::path(
    delete,
    path = "/drinks/{id}",
    tag = "Drinks",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Drink to delete")),
    responses(
        (status = 200, description = "Deleted", body = DeleteDrinkResponse),
        (status = 404, description = "No drink with this id"),
    )
)]
pub async fn delete_drink(
    Auth(claims): Auth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteDrinkResponse>, ApiError> {
    let mut store = state.store.write().await;
    let deleted = store.delete(id)?;

    tracing::info!(subject = %claims.sub, drink_id = deleted, "drink deleted");

    Ok(Json(DeleteDrinkResponse {
        success: true,
        delete: deleted,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::testing;
    use crate::models::IngredientPart;
    use axum::http::StatusCode;

    fn state() -> AppState {
        // No test here touches the network; the JWKS endpoint is never
        // fetched because claims are constructed directly.
        testing::app_state("http://127.0.0.1:9/.well-known/jwks.json")
    }

    fn espresso() -> CreateDrinkRequest {
        CreateDrinkRequest {
            title: "Espresso".into(),
            recipe: vec![IngredientPart {
                name: "espresso".into(),
                color: "brown".into(),
                parts: 1,
            }],
        }
    }

    #[tokio::test]
    async fn create_then_list_summary_hides_names() {
        let state = state();
        let claims = testing::claims_with_permissions(&["post:drinks"]);

        let Json(created) = create_drink(Auth(claims), State(state.clone()), Json(espresso()))
            .await
            .expect("drink creation succeeds");
        assert!(created.success);
        assert_eq!(created.drinks[0].id, 1);

        let Json(listed) = list_drinks(State(state)).await;
        assert!(listed.success);
        assert_eq!(listed.drinks.len(), 1);

        let json = serde_json::to_value(&listed.drinks[0]).unwrap();
        assert!(json["recipe"][0].get("name").is_none());
    }

    #[tokio::test]
    async fn detail_listing_includes_names() {
        let state = state();
        let create_claims = testing::claims_with_permissions(&["post:drinks"]);
        create_drink(Auth(create_claims), State(state.clone()), Json(espresso()))
            .await
            .unwrap();

        let claims = testing::claims_with_permissions(&["get:drinks-detail"]);
        let Json(detail) = list_drinks_detail(Auth(claims), State(state)).await;

        assert_eq!(detail.drinks[0].recipe[0].name, "espresso");
    }

    #[tokio::test]
    async fn update_unknown_drink_is_not_found() {
        let state = state();
        let claims = testing::claims_with_permissions(&["patch:drinks"]);

        let err = update_drink(
            Auth(claims),
            State(state),
            Path(42),
            Json(UpdateDrinkRequest::default()),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_echoes_the_deleted_id() {
        let state = state();
        let create_claims = testing::claims_with_permissions(&["post:drinks"]);
        let Json(created) = create_drink(Auth(create_claims), State(state.clone()), Json(espresso()))
            .await
            .unwrap();
        let id = created.drinks[0].id;

        let claims = testing::claims_with_permissions(&["delete:drinks"]);
        let Json(deleted) = delete_drink(Auth(claims), State(state.clone()), Path(id))
            .await
            .unwrap();

        assert!(deleted.success);
        assert_eq!(deleted.delete, id);

        let claims = testing::claims_with_permissions(&["delete:drinks"]);
        let err = delete_drink(Auth(claims), State(state), Path(id))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
