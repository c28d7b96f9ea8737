use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// A consumption event. `calories` is fixed when the row is written and is
/// never recomputed from the food's current calorie density.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Meal {
    pub id: i64,
    pub grams: i32,
    pub calories: i32,
    #[serde(rename = "timestamp", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub user_id: i64,
    pub food_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewMeal {
    pub user_id: i64,
    pub food_id: i64,
    pub grams: i32,
    pub calories: i32,
}

/// A meal joined with the name of its food, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct MealEntry {
    pub id: i64,
    pub food_id: i64,
    pub food_name: String,
    pub grams: i32,
    pub calories: i32,
    #[serde(rename = "timestamp", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
