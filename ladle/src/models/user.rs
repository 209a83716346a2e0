use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account. `password_hash` never crosses the API boundary —
/// the DTO layer strips it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub dietary_preferences: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: String, username: String, email: String, password_hash: String) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            dietary_preferences: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// A bookmark linking a user to a recipe. Unique per `(user_id, recipe_id)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    pub id: String,
    pub user_id: String,
    pub recipe_id: String,
    pub created_at: DateTime<Utc>,
}
