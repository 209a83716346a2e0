use chrono::{DateTime, Utc};
use libsql::{params, Connection};

use crate::db::traits::RecipePage;
use crate::error::Result;
use crate::models::{Difficulty, FilterOptions, Recipe, RecipeFilter};

const RECIPE_COLUMNS: &str = "id, title, description, ingredients, instructions, cooking_time, \
     difficulty, cuisine, serving_size, dietary_tags, nutritional_info, \
     image_url, source, created_at, updated_at";

pub struct RecipeRepository;

impl RecipeRepository {
    pub async fn create(conn: &Connection, recipe: &Recipe) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO recipes (
                id, title, description, ingredients, instructions, cooking_time,
                difficulty, cuisine, serving_size, dietary_tags, nutritional_info,
                image_url, source, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15
            )
            "#,
            params![
                recipe.id.clone(),
                recipe.title.clone(),
                recipe.description.clone(),
                serde_json::to_string(&recipe.ingredients)?,
                serde_json::to_string(&recipe.instructions)?,
                recipe.cooking_time as i64,
                recipe.difficulty.as_str(),
                recipe.cuisine.clone(),
                recipe.serving_size as i64,
                serde_json::to_string(&recipe.dietary_tags)?,
                recipe
                    .nutritional_info
                    .as_ref()
                    .map(serde_json::to_string)
                    .transpose()?,
                recipe.image_url.clone(),
                recipe.source.clone(),
                recipe.created_at.to_rfc3339(),
                recipe.updated_at.to_rfc3339(),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn get_by_id(conn: &Connection, id: &str) -> Result<Option<Recipe>> {
        let sql = format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = ?1");
        let mut rows = conn.query(&sql, params![id]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_recipe(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn list(
        conn: &Connection,
        filter: &RecipeFilter,
        page: u32,
        limit: u32,
    ) -> Result<RecipePage> {
        let (where_clause, filter_params) = Self::build_filter(filter);

        let count_sql = format!("SELECT COUNT(*) FROM recipes{where_clause}");
        let mut rows = conn
            .query(&count_sql, libsql::params_from_iter(filter_params.clone()))
            .await?;
        let total = match rows.next().await? {
            Some(row) => row.get::<i64>(0)? as u64,
            None => 0,
        };

        let offset = (page.saturating_sub(1) as i64) * limit as i64;
        let list_sql = format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes{where_clause} \
             ORDER BY title ASC LIMIT {limit} OFFSET {offset}"
        );
        let mut rows = conn
            .query(&list_sql, libsql::params_from_iter(filter_params))
            .await?;

        let mut recipes = Vec::new();
        while let Some(row) = rows.next().await? {
            recipes.push(Self::row_to_recipe(&row)?);
        }

        Ok(RecipePage { recipes, total })
    }

    pub async fn find(conn: &Connection, filter: &RecipeFilter) -> Result<Vec<Recipe>> {
        let (where_clause, filter_params) = Self::build_filter(filter);
        let sql = format!("SELECT {RECIPE_COLUMNS} FROM recipes{where_clause} ORDER BY title ASC");
        let mut rows = conn
            .query(&sql, libsql::params_from_iter(filter_params))
            .await?;

        let mut recipes = Vec::new();
        while let Some(row) = rows.next().await? {
            recipes.push(Self::row_to_recipe(&row)?);
        }
        Ok(recipes)
    }

    pub async fn distinct_filter_options(conn: &Connection) -> Result<FilterOptions> {
        let mut cuisines = Vec::new();
        let mut rows = conn
            .query(
                "SELECT DISTINCT cuisine FROM recipes WHERE cuisine != '' ORDER BY cuisine",
                (),
            )
            .await?;
        while let Some(row) = rows.next().await? {
            cuisines.push(row.get::<String>(0)?);
        }

        let mut difficulties = Vec::new();
        let mut rows = conn
            .query("SELECT DISTINCT difficulty FROM recipes ORDER BY difficulty", ())
            .await?;
        while let Some(row) = rows.next().await? {
            difficulties.push(row.get::<String>(0)?);
        }

        // Flatten the JSON tag arrays across all recipes, original-style.
        let mut dietary_tags = Vec::new();
        let mut rows = conn
            .query(
                "SELECT DISTINCT value FROM recipes, json_each(recipes.dietary_tags) \
                 WHERE value != '' ORDER BY value",
                (),
            )
            .await?;
        while let Some(row) = rows.next().await? {
            dietary_tags.push(row.get::<String>(0)?);
        }

        Ok(FilterOptions {
            cuisines,
            difficulties,
            dietary_tags,
        })
    }

    /// Build the WHERE clause for a structured filter: equality on cuisine
    /// and difficulty, membership on dietary tag, upper bound on cooking time.
    fn build_filter(filter: &RecipeFilter) -> (String, Vec<libsql::Value>) {
        let mut clauses: Vec<String> = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(cuisine) = &filter.cuisine {
            params.push(libsql::Value::from(cuisine.clone()));
            clauses.push(format!("cuisine = ?{}", params.len()));
        }
        if let Some(difficulty) = &filter.difficulty {
            params.push(libsql::Value::from(difficulty.as_str().to_string()));
            clauses.push(format!("difficulty = ?{}", params.len()));
        }
        if let Some(max_time) = filter.max_cooking_time {
            params.push(libsql::Value::from(max_time as i64));
            clauses.push(format!("cooking_time <= ?{}", params.len()));
        }
        if let Some(dietary) = &filter.dietary {
            params.push(libsql::Value::from(dietary.clone()));
            clauses.push(format!(
                "EXISTS (SELECT 1 FROM json_each(recipes.dietary_tags) \
                 WHERE json_each.value = ?{})",
                params.len()
            ));
        }

        if clauses.is_empty() {
            (String::new(), params)
        } else {
            (format!(" WHERE {}", clauses.join(" AND ")), params)
        }
    }

    pub fn row_to_recipe(row: &libsql::Row) -> Result<Recipe> {
        Ok(Recipe {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            ingredients: serde_json::from_str(&row.get::<String>(3)?).unwrap_or_default(),
            instructions: serde_json::from_str(&row.get::<String>(4)?).unwrap_or_default(),
            cooking_time: row.get::<i64>(5)? as u32,
            difficulty: Difficulty::parse(&row.get::<String>(6)?).unwrap_or(Difficulty::Easy),
            cuisine: row.get(7)?,
            serving_size: row.get::<i64>(8)? as u32,
            dietary_tags: serde_json::from_str(&row.get::<String>(9)?).unwrap_or_default(),
            nutritional_info: row
                .get::<Option<String>>(10)?
                .and_then(|s| serde_json::from_str(&s).ok()),
            image_url: row.get(11)?,
            source: row.get(12)?,
            created_at: DateTime::parse_from_rfc3339(&row.get::<String>(13)?)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
            updated_at: DateTime::parse_from_rfc3339(&row.get::<String>(14)?)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }
}
