use async_trait::async_trait;

use crate::db::connection::Database;
use crate::db::repository::{FavoriteRepository, RecipeRepository, UserRepository};
use crate::db::traits::{DatabaseBackend, FavoriteStore, RecipePage, RecipeStore, UserStore};
use crate::error::Result;
use crate::models::{FilterOptions, Recipe, RecipeFilter, User};

pub struct LibSqlBackend {
    db: Database,
}

impl LibSqlBackend {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecipeStore for LibSqlBackend {
    async fn create_recipe(&self, recipe: &Recipe) -> Result<()> {
        let conn = self.db.connect()?;
        RecipeRepository::create(&conn, recipe).await
    }
    async fn get_recipe_by_id(&self, id: &str) -> Result<Option<Recipe>> {
        let conn = self.db.connect()?;
        RecipeRepository::get_by_id(&conn, id).await
    }
    async fn list_recipes(
        &self,
        filter: &RecipeFilter,
        page: u32,
        limit: u32,
    ) -> Result<RecipePage> {
        let conn = self.db.connect()?;
        RecipeRepository::list(&conn, filter, page, limit).await
    }
    async fn find_recipes(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>> {
        let conn = self.db.connect()?;
        RecipeRepository::find(&conn, filter).await
    }
    async fn distinct_filter_options(&self) -> Result<FilterOptions> {
        let conn = self.db.connect()?;
        RecipeRepository::distinct_filter_options(&conn).await
    }
}

#[async_trait]
impl UserStore for LibSqlBackend {
    async fn create_user(&self, user: &User) -> Result<()> {
        let conn = self.db.connect()?;
        UserRepository::create(&conn, user).await
    }
    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let conn = self.db.connect()?;
        UserRepository::get_by_id(&conn, id).await
    }
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.db.connect()?;
        UserRepository::get_by_email(&conn, email).await
    }
    async fn email_or_username_taken(&self, email: &str, username: &str) -> Result<bool> {
        let conn = self.db.connect()?;
        UserRepository::email_or_username_taken(&conn, email, username).await
    }
}

#[async_trait]
impl FavoriteStore for LibSqlBackend {
    async fn add_favorite(&self, id: &str, user_id: &str, recipe_id: &str) -> Result<bool> {
        let conn = self.db.connect()?;
        FavoriteRepository::add(&conn, id, user_id, recipe_id).await
    }
    async fn remove_favorite(&self, user_id: &str, recipe_id: &str) -> Result<bool> {
        let conn = self.db.connect()?;
        FavoriteRepository::remove(&conn, user_id, recipe_id).await
    }
    async fn is_favorite(&self, user_id: &str, recipe_id: &str) -> Result<bool> {
        let conn = self.db.connect()?;
        FavoriteRepository::exists(&conn, user_id, recipe_id).await
    }
    async fn list_favorite_recipes(&self, user_id: &str) -> Result<Vec<Recipe>> {
        let conn = self.db.connect()?;
        FavoriteRepository::list_recipes(&conn, user_id).await
    }
}

#[async_trait]
impl DatabaseBackend for LibSqlBackend {
    async fn sync(&self) -> Result<()> {
        self.db.sync().await
    }
}
