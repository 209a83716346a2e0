use chrono::Utc;
use libsql::{params, Connection};

use crate::error::Result;
use crate::models::Recipe;

use super::RecipeRepository;

pub struct FavoriteRepository;

impl FavoriteRepository {
    /// Insert the pair unless it already exists. Returns false on duplicate.
    pub async fn add(conn: &Connection, id: &str, user_id: &str, recipe_id: &str) -> Result<bool> {
        let affected = conn
            .execute(
                r#"
                INSERT OR IGNORE INTO favorites (id, user_id, recipe_id, created_at)
                VALUES (?1, ?2, ?3, ?4)
                "#,
                params![id, user_id, recipe_id, Utc::now().to_rfc3339()],
            )
            .await?;

        Ok(affected > 0)
    }

    /// Delete the pair. Returns false when there was nothing to remove.
    pub async fn remove(conn: &Connection, user_id: &str, recipe_id: &str) -> Result<bool> {
        let affected = conn
            .execute(
                "DELETE FROM favorites WHERE user_id = ?1 AND recipe_id = ?2",
                params![user_id, recipe_id],
            )
            .await?;

        Ok(affected > 0)
    }

    pub async fn exists(conn: &Connection, user_id: &str, recipe_id: &str) -> Result<bool> {
        let mut rows = conn
            .query(
                "SELECT COUNT(*) FROM favorites WHERE user_id = ?1 AND recipe_id = ?2",
                params![user_id, recipe_id],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(row.get::<i64>(0)? > 0),
            None => Ok(false),
        }
    }

    /// The user's favorited recipes, most recently added first.
    pub async fn list_recipes(conn: &Connection, user_id: &str) -> Result<Vec<Recipe>> {
        let mut rows = conn
            .query(
                r#"
                SELECT r.id, r.title, r.description, r.ingredients, r.instructions,
                       r.cooking_time, r.difficulty, r.cuisine, r.serving_size,
                       r.dietary_tags, r.nutritional_info, r.image_url, r.source,
                       r.created_at, r.updated_at
                FROM favorites f
                JOIN recipes r ON r.id = f.recipe_id
                WHERE f.user_id = ?1
                ORDER BY f.created_at DESC
                "#,
                params![user_id],
            )
            .await?;

        let mut recipes = Vec::new();
        while let Some(row) = rows.next().await? {
            recipes.push(RecipeRepository::row_to_recipe(&row)?);
        }
        Ok(recipes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{RecipeRepository, UserRepository};
    use crate::models::{Recipe, User};

    async fn setup_test_db() -> Connection {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .expect("in-memory db");
        let conn = db.connect().expect("connect");
        crate::db::schema::init_schema(&conn).await.expect("schema");
        conn
    }

    async fn seed_recipe(conn: &Connection, id: &str) {
        let recipe = Recipe::new(id.to_string(), format!("Recipe {id}"), String::new());
        RecipeRepository::create(conn, &recipe).await.expect("create recipe");
    }

    async fn seed_user(conn: &Connection, id: &str) {
        let user = User::new(
            id.to_string(),
            format!("{id}-name"),
            format!("{id}@example.com"),
            "hash".to_string(),
        );
        UserRepository::create(conn, &user).await.expect("create user");
    }

    #[tokio::test]
    async fn add_is_idempotent_per_pair() {
        let conn = setup_test_db().await;
        seed_user(&conn, "u1").await;
        seed_recipe(&conn, "r1").await;

        assert!(FavoriteRepository::add(&conn, "f1", "u1", "r1").await.expect("add"));
        assert!(!FavoriteRepository::add(&conn, "f2", "u1", "r1").await.expect("add"));
        assert!(FavoriteRepository::exists(&conn, "u1", "r1").await.expect("exists"));
    }

    #[tokio::test]
    async fn remove_reports_missing_pair() {
        let conn = setup_test_db().await;
        seed_user(&conn, "u1").await;
        seed_recipe(&conn, "r1").await;

        assert!(!FavoriteRepository::remove(&conn, "u1", "r1").await.expect("remove"));
        FavoriteRepository::add(&conn, "f1", "u1", "r1").await.expect("add");
        assert!(FavoriteRepository::remove(&conn, "u1", "r1").await.expect("remove"));
        assert!(!FavoriteRepository::exists(&conn, "u1", "r1").await.expect("exists"));
    }

    #[tokio::test]
    async fn list_returns_joined_recipes() {
        let conn = setup_test_db().await;
        seed_user(&conn, "u1").await;
        seed_user(&conn, "u2").await;
        seed_recipe(&conn, "r1").await;
        seed_recipe(&conn, "r2").await;
        FavoriteRepository::add(&conn, "f1", "u1", "r1").await.expect("add");
        FavoriteRepository::add(&conn, "f2", "u1", "r2").await.expect("add");
        FavoriteRepository::add(&conn, "f3", "u2", "r2").await.expect("add");

        let recipes = FavoriteRepository::list_recipes(&conn, "u1").await.expect("list");
        assert_eq!(recipes.len(), 2);
        let ids: Vec<&str> = recipes.iter().map(|r| r.id.as_str()).collect();
        assert!(ids.contains(&"r1"));
        assert!(ids.contains(&"r2"));
    }
}
