use libsql::Connection;

use crate::error::Result;

pub async fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Recipes table. Filterable attributes get real columns; nested
        -- documents (ingredients, instructions, tags, nutrition) are JSON.
        CREATE TABLE IF NOT EXISTS recipes (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            ingredients TEXT NOT NULL DEFAULT '[]',
            instructions TEXT NOT NULL DEFAULT '[]',
            cooking_time INTEGER NOT NULL DEFAULT 0,
            difficulty TEXT NOT NULL DEFAULT 'Easy',
            cuisine TEXT NOT NULL DEFAULT '',
            serving_size INTEGER NOT NULL DEFAULT 1,
            dietary_tags TEXT NOT NULL DEFAULT '[]',
            nutritional_info TEXT,
            image_url TEXT NOT NULL DEFAULT '',
            source TEXT NOT NULL DEFAULT 'ladle',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_recipes_cuisine ON recipes(cuisine);
        CREATE INDEX IF NOT EXISTS idx_recipes_difficulty ON recipes(difficulty);
        CREATE INDEX IF NOT EXISTS idx_recipes_cooking_time ON recipes(cooking_time);
        CREATE INDEX IF NOT EXISTS idx_recipes_title ON recipes(title);

        -- Users table
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            dietary_preferences TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);

        -- Favorites: one row per user/recipe pair
        CREATE TABLE IF NOT EXISTS favorites (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            recipe_id TEXT NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
            FOREIGN KEY (recipe_id) REFERENCES recipes(id) ON DELETE CASCADE,
            UNIQUE (user_id, recipe_id)
        );

        CREATE INDEX IF NOT EXISTS idx_favorites_user_id ON favorites(user_id);
        "#,
    )
    .await?;

    Ok(())
}
