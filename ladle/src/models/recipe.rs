use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Recipe difficulty level. Serialized capitalized on the wire
/// (`"Easy"`, `"Medium"`, `"Hard"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Easy" => Some(Self::Easy),
            "Medium" => Some(Self::Medium),
            "Hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in a recipe's ingredient list. Only `name` participates in
/// matching; `quantity` and `unit` are carried through untouched for display.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RecipeIngredient {
    pub name: String,
    pub quantity: String,
    /// Unit of measure, e.g. `cup`, `tbsp`, `clove`. Free text with a
    /// conventional default.
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    "piece".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NutritionalInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
}

/// A stored recipe. Immutable from the matching engine's point of view —
/// the engine only reads `ingredients[].name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<RecipeIngredient>,
    pub instructions: Vec<String>,
    pub cooking_time: u32,
    pub difficulty: Difficulty,
    pub cuisine: String,
    pub serving_size: u32,
    pub dietary_tags: Vec<String>,
    pub nutritional_info: Option<NutritionalInfo>,
    pub image_url: String,
    pub source: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    pub fn new(id: String, title: String, description: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            description,
            ingredients: Vec::new(),
            instructions: Vec::new(),
            cooking_time: 0,
            difficulty: Difficulty::Easy,
            cuisine: String::new(),
            serving_size: 1,
            dietary_tags: Vec::new(),
            nutritional_info: None,
            image_url: String::new(),
            source: "ladle".to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Structured attribute predicates pushed down to the recipe store before
/// the matching stage runs.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    /// Equality on cuisine.
    pub cuisine: Option<String>,
    /// Equality on difficulty.
    pub difficulty: Option<Difficulty>,
    /// Membership in the recipe's dietary tags.
    pub dietary: Option<String>,
    /// Upper bound on cooking time in minutes.
    pub max_cooking_time: Option<u32>,
}

impl RecipeFilter {
    pub fn is_empty(&self) -> bool {
        self.cuisine.is_none()
            && self.difficulty.is_none()
            && self.dietary.is_none()
            && self.max_cooking_time.is_none()
    }
}

/// Distinct attribute values across the stored recipe set, used to populate
/// the client's filter dropdowns.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOptions {
    pub cuisines: Vec<String>,
    pub difficulties: Vec<String>,
    pub dietary_tags: Vec<String>,
}
