use async_trait::async_trait;

use crate::error::Result;
use crate::models::{FilterOptions, Recipe, RecipeFilter, User};

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

/// One page of a recipe listing plus the total row count for the filter.
#[derive(Debug, Clone)]
pub struct RecipePage {
    pub recipes: Vec<Recipe>,
    pub total: u64,
}

// ---------------------------------------------------------------------------
// Individual store traits
// ---------------------------------------------------------------------------

/// Read and write operations on the recipe catalog. The matching engine only
/// ever consumes the output of `find_recipes` as a read-only snapshot.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn create_recipe(&self, recipe: &Recipe) -> Result<()>;
    async fn get_recipe_by_id(&self, id: &str) -> Result<Option<Recipe>>;
    /// Paginated listing ordered by title, for the browse endpoint.
    async fn list_recipes(&self, filter: &RecipeFilter, page: u32, limit: u32)
        -> Result<RecipePage>;
    /// Unpaginated candidate fetch for the search pipeline: every recipe
    /// satisfying the structured filter.
    async fn find_recipes(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>>;
    /// Distinct cuisines, difficulties and dietary tags across the catalog.
    async fn distinct_filter_options(&self) -> Result<FilterOptions>;
}

/// Account storage.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, user: &User) -> Result<()>;
    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn email_or_username_taken(&self, email: &str, username: &str) -> Result<bool>;
}

/// Favorite bookkeeping. `add_favorite` returns false when the pair already
/// exists; `remove_favorite` returns false when there was nothing to remove.
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    async fn add_favorite(&self, id: &str, user_id: &str, recipe_id: &str) -> Result<bool>;
    async fn remove_favorite(&self, user_id: &str, recipe_id: &str) -> Result<bool>;
    async fn is_favorite(&self, user_id: &str, recipe_id: &str) -> Result<bool>;
    /// The user's favorited recipes, most recently added first.
    async fn list_favorite_recipes(&self, user_id: &str) -> Result<Vec<Recipe>>;
}

/// Combined backend trait. Handlers and services hold `Arc<dyn DatabaseBackend>`
/// so the storage engine stays a swappable collaborator.
#[async_trait]
pub trait DatabaseBackend: RecipeStore + UserStore + FavoriteStore {
    /// Sync with remote (e.g. Turso replication). No-op for local-only backends.
    async fn sync(&self) -> Result<()>;
}
