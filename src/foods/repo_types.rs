use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Catalog entry. `name` is the natural key, matched case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Food {
    pub id: i64,
    pub name: String,
    pub calories_per_100g: i32,
}

#[derive(Debug, Clone)]
pub struct NewFood {
    pub name: String,
    pub calories_per_100g: i32,
}
