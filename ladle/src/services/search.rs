use std::sync::Arc;

use crate::db::DatabaseBackend;
use crate::error::{LadleError, Result};
use crate::matching::{self, MatchResult};
use crate::models::RecipeFilter;

/// Ingredient-based recipe search: structured filters are pushed down to the
/// store, the matching pipeline runs over the returned snapshot.
#[derive(Clone)]
pub struct SearchService {
    db: Arc<dyn DatabaseBackend>,
}

impl SearchService {
    pub fn new(db: Arc<dyn DatabaseBackend>) -> Self {
        Self { db }
    }

    /// Run the full search pipeline: validate, fetch candidates, filter by
    /// AND-semantics, score, rank.
    ///
    /// Fails fast with a validation error on an empty ingredient list,
    /// before any store read. A store failure propagates as-is — no stale or
    /// partial candidate set is ever substituted. An empty result is success.
    pub async fn search(
        &self,
        ingredients: &[String],
        filter: &RecipeFilter,
    ) -> Result<Vec<MatchResult>> {
        if ingredients.is_empty() {
            return Err(LadleError::Validation(
                "At least one ingredient is required".to_string(),
            ));
        }

        let candidates = self.db.find_recipes(filter).await?;
        tracing::debug!(
            candidates = candidates.len(),
            ingredients = ingredients.len(),
            "Fetched search candidates"
        );

        let filtered = matching::filter_by_all_ingredients(candidates, ingredients);
        tracing::debug!(matched = filtered.len(), "Recipes containing all ingredients");

        let scored = filtered
            .into_iter()
            .map(|recipe| {
                let score = matching::score_recipe(&recipe, ingredients);
                MatchResult::new(recipe, score)
            })
            .collect();

        Ok(matching::rank(scored))
    }
}
