//! Ingredient matching and scoring engine.
//!
//! Pure, synchronous functions over an in-memory recipe snapshot: no I/O,
//! no shared state, safe to call from any number of request handlers
//! concurrently. The pipeline is filter (AND-semantics over the user's
//! ingredients) → score (fraction of recipe ingredients covered) → rank
//! (stable descending sort).
//!
//! The filter and the scorer quantify over the same containment relation in
//! opposite directions: the filter asks "is every user ingredient covered by
//! some recipe ingredient", the scorer asks "what fraction of recipe
//! ingredients are covered by some user ingredient". They must stay separate
//! functions — collapsing them would silently change scores.

use serde::Serialize;

use crate::models::Recipe;

/// Lowercase and trim an ingredient string. Internal whitespace, punctuation
/// and plural forms are left alone; matching is sensitive to exact substring
/// presence after this minimal normalization.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Bidirectional substring containment over pre-normalized inputs.
///
/// `"tomato"` matches `"diced tomatoes"`, and `"extra virgin olive oil"`
/// matches `"olive oil"`. No edit distance, tokenization, or stemming —
/// the check is intentionally this simple and symmetric.
pub fn matches(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// Keep only recipes whose ingredient list covers **every** user ingredient.
///
/// A recipe survives iff for every normalized user ingredient there is at
/// least one normalized recipe ingredient name that [`matches`] it. A recipe
/// with no ingredients can never satisfy a non-empty query; an empty query
/// vacuously retains everything (callers reject empty queries upstream).
/// Output order is whatever the input order was — ordering is [`rank`]'s job.
pub fn filter_by_all_ingredients(recipes: Vec<Recipe>, user_ingredients: &[String]) -> Vec<Recipe> {
    let user_normalized: Vec<String> = user_ingredients.iter().map(|s| normalize(s)).collect();

    recipes
        .into_iter()
        .filter(|recipe| {
            let recipe_normalized: Vec<String> = recipe
                .ingredients
                .iter()
                .map(|ing| normalize(&ing.name))
                .collect();

            user_normalized.iter().all(|user_ing| {
                recipe_normalized
                    .iter()
                    .any(|recipe_ing| matches(user_ing, recipe_ing))
            })
        })
        .collect()
}

/// Per-recipe score data derived by [`score_recipe`].
#[derive(Debug, Clone, Serialize)]
pub struct RecipeScore {
    /// `round(100 * matching_ingredients.len() / recipe.ingredients.len())`.
    pub match_score: u8,
    /// Normalized recipe ingredient names that matched some user ingredient.
    pub matching_ingredients: Vec<String>,
    /// Mirrors `matching_ingredients.len()` — the count of matched *recipe*
    /// ingredients, despite the name. Downstream consumers read this exact
    /// value, so it stays as-is.
    pub user_ingredients_matched: usize,
}

/// Score one recipe against the user's ingredient list.
///
/// Quantification here is recipe-ingredient-centric: each normalized recipe
/// ingredient name counts as matched when **any** normalized user ingredient
/// [`matches`] it. A recipe with no ingredients scores zero; the filter has
/// already excluded such recipes for any non-empty query.
pub fn score_recipe(recipe: &Recipe, user_ingredients: &[String]) -> RecipeScore {
    let user_normalized: Vec<String> = user_ingredients.iter().map(|s| normalize(s)).collect();

    let matching_ingredients: Vec<String> = recipe
        .ingredients
        .iter()
        .map(|ing| normalize(&ing.name))
        .filter(|recipe_ing| {
            user_normalized
                .iter()
                .any(|user_ing| matches(recipe_ing, user_ing))
        })
        .collect();

    let total = recipe.ingredients.len();
    let match_score = if total == 0 {
        0
    } else {
        // Round-half-up on the floating quotient, as Math.round does.
        (100.0 * matching_ingredients.len() as f64 / total as f64).round() as u8
    };

    RecipeScore {
        match_score,
        user_ingredients_matched: matching_ingredients.len(),
        matching_ingredients,
    }
}

/// A scored recipe, ready for ranking and serialization.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub recipe: Recipe,
    pub match_score: u8,
    pub matching_ingredients: Vec<String>,
    pub user_ingredients_matched: usize,
}

impl MatchResult {
    pub fn new(recipe: Recipe, score: RecipeScore) -> Self {
        Self {
            recipe,
            match_score: score.match_score,
            matching_ingredients: score.matching_ingredients,
            user_ingredients_matched: score.user_ingredients_matched,
        }
    }
}

/// Order scored recipes by descending `match_score`.
///
/// The sort is stable: equal scores keep their relative input order. Returns
/// a new sequence rather than reordering anything the caller still holds.
pub fn rank(scored: Vec<MatchResult>) -> Vec<MatchResult> {
    let mut ranked = scored;
    ranked.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    ranked
}
