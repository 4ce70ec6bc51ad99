// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 The drinks-server Authors

//! # API Data Models
//!
//! Request and response data structures for the drinks API. All types
//! derive `Serialize`, `Deserialize`, and `ToSchema` for automatic JSON
//! handling and OpenAPI documentation.
//!
//! ## Drink Representations
//!
//! Drinks serialize in two forms: the public *summary* form, whose
//! recipe parts carry only color and proportion, and the privileged
//! *detail* form, which also names each ingredient. Only holders of the
//! `get:drinks-detail` permission (or a mutating permission) ever see
//! ingredient names.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Drink Models
// =============================================================================

/// One ingredient of a drink recipe, as stored and as shown to
/// privileged clients.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct IngredientPart {
    /// Ingredient name (privileged information).
    pub name: String,
    /// Display color for the graphic representation.
    pub color: String,
    /// Relative proportion of this ingredient.
    pub parts: u32,
}

/// The public projection of an ingredient: color and proportion only.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct IngredientSummary {
    pub color: String,
    pub parts: u32,
}

impl From<&IngredientPart> for IngredientSummary {
    fn from(part: &IngredientPart) -> Self {
        Self {
            color: part.color.clone(),
            parts: part.parts,
        }
    }
}

/// A drink on the menu, in its detail representation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Drink {
    /// Sequential identifier assigned by the store.
    pub id: i64,
    /// Drink title, unique across the menu.
    pub title: String,
    /// Full recipe including ingredient names.
    pub recipe: Vec<IngredientPart>,
}

impl Drink {
    /// Public projection of this drink: recipe reduced to colors and
    /// proportions.
    pub fn summary(&self) -> DrinkSummary {
        DrinkSummary {
            id: self.id,
            title: self.title.clone(),
            recipe: self.recipe.iter().map(IngredientSummary::from).collect(),
        }
    }
}

/// A drink in its public summary representation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct DrinkSummary {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<IngredientSummary>,
}

// =============================================================================
// Request Models
// =============================================================================

/// Request to create a new drink. Both fields are required.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateDrinkRequest {
    pub title: String,
    pub recipe: Vec<IngredientPart>,
}

/// Request to update an existing drink. Omitted fields are left
/// unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateDrinkRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub recipe: Option<Vec<IngredientPart>>,
}

// =============================================================================
// Response Models
// =============================================================================

/// Success envelope for endpoints returning detail drinks.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DrinkDetailResponse {
    pub success: bool,
    pub drinks: Vec<Drink>,
}

/// Success envelope for the public drinks listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DrinkSummaryResponse {
    pub success: bool,
    pub drinks: Vec<DrinkSummary>,
}

/// Success envelope for drink deletion, echoing the deleted id.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteDrinkResponse {
    pub success: bool,
    pub delete: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water() -> Drink {
        Drink {
            id: 1,
            title: "Water".into(),
            recipe: vec![IngredientPart {
                name: "water".into(),
                color: "blue".into(),
                parts: 1,
            }],
        }
    }

    #[test]
    fn summary_drops_ingredient_names() {
        let drink = water();
        let summary = drink.summary();

        assert_eq!(summary.id, drink.id);
        assert_eq!(summary.title, drink.title);
        assert_eq!(summary.recipe.len(), 1);

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["recipe"][0].get("name").is_none());
        assert_eq!(json["recipe"][0]["color"], "blue");
        assert_eq!(json["recipe"][0]["parts"], 1);
    }

    #[test]
    fn detail_serialization_keeps_ingredient_names() {
        let json = serde_json::to_value(water()).unwrap();
        assert_eq!(json["recipe"][0]["name"], "water");
    }

    #[test]
    fn update_request_fields_default_to_none() {
        let request: UpdateDrinkRequest = serde_json::from_str("{}").unwrap();
        assert!(request.title.is_none());
        assert!(request.recipe.is_none());
    }

    #[test]
    fn create_request_requires_both_fields() {
        let missing_recipe: Result<CreateDrinkRequest, _> =
            serde_json::from_str(r#"{"title": "Water"}"#);
        assert!(missing_recipe.is_err());

        let missing_title: Result<CreateDrinkRequest, _> =
            serde_json::from_str(r#"{"recipe": []}"#);
        assert!(missing_title.is_err());
    }
}
