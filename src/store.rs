// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 The drinks-server Authors

//! In-memory drink storage.
//!
//! A `BTreeMap` keyed by the sequential drink id keeps listings ordered
//! without a separate sort. Titles are unique across the menu; a
//! colliding insert or rename is rejected as unprocessable, matching
//! the uniqueness constraint the API has always enforced.

use std::collections::BTreeMap;

use crate::error::ApiError;
use crate::models::{CreateDrinkRequest, Drink, UpdateDrinkRequest};

#[derive(Debug)]
pub struct InMemoryStore {
    drinks: BTreeMap<i64, Drink>,
    next_id: i64,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            drinks: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All drinks, ordered by id.
    pub fn list(&self) -> Vec<Drink> {
        self.drinks.values().cloned().collect()
    }

    pub fn get(&self, id: i64) -> Result<Drink, ApiError> {
        self.drinks
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("resource not found"))
    }

    pub fn create(&mut self, request: CreateDrinkRequest) -> Result<Drink, ApiError> {
        if self.title_taken(&request.title, None) {
            return Err(ApiError::unprocessable("unprocessable"));
        }

        let id = self.next_id;
        self.next_id += 1;

        let drink = Drink {
            id,
            title: request.title,
            recipe: request.recipe,
        };
        self.drinks.insert(id, drink.clone());
        Ok(drink)
    }

    pub fn update(&mut self, id: i64, request: UpdateDrinkRequest) -> Result<Drink, ApiError> {
        if let Some(title) = &request.title {
            if self.title_taken(title, Some(id)) {
                return Err(ApiError::unprocessable("unprocessable"));
            }
        }

        let Some(drink) = self.drinks.get_mut(&id) else {
            return Err(ApiError::not_found("resource not found"));
        };

        if let Some(title) = request.title {
            drink.title = title;
        }
        if let Some(recipe) = request.recipe {
            drink.recipe = recipe;
        }

        Ok(drink.clone())
    }

    pub fn delete(&mut self, id: i64) -> Result<i64, ApiError> {
        if self.drinks.remove(&id).is_some() {
            Ok(id)
        } else {
            Err(ApiError::not_found("resource not found"))
        }
    }

    fn title_taken(&self, title: &str, exclude_id: Option<i64>) -> bool {
        self.drinks
            .values()
            .any(|drink| drink.title == title && Some(drink.id) != exclude_id)
    }
}
