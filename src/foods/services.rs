use tracing::{info, warn};

use crate::{
    db::MAX_TEXT_LEN,
    error::AppError,
    foods::{
        repo::FoodRepo,
        repo_types::{Food, NewFood},
    },
};

/// Result of adding a food. A taken name is a warning for the admin, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddFoodOutcome {
    Added(Food),
    /// Carries the untouched existing row.
    AlreadyExists(Food),
}

pub async fn list_foods(foods: &dyn FoodRepo) -> Result<Vec<Food>, AppError> {
    foods.list().await
}

pub async fn get_food(foods: &dyn FoodRepo, id: i64) -> Result<Food, AppError> {
    foods.get(id).await?.ok_or(AppError::NotFound("Food"))
}

pub async fn add_food(
    foods: &dyn FoodRepo,
    name: &str,
    calories_per_100g: i32,
) -> Result<AddFoodOutcome, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Food name is required".into()));
    }
    if name.chars().count() > MAX_TEXT_LEN {
        return Err(AppError::Validation("Food name too long".into()));
    }
    if calories_per_100g < 0 {
        return Err(AppError::InvalidCalories);
    }

    if let Some(existing) = foods.find_by_name(name).await? {
        warn!(name, food_id = existing.id, "food already exists");
        return Ok(AddFoodOutcome::AlreadyExists(existing));
    }

    let inserted = foods
        .insert(NewFood {
            name: name.to_string(),
            calories_per_100g,
        })
        .await?;

    match inserted {
        Some(food) => {
            info!(food_id = food.id, name = %food.name, calories_per_100g, "food added");
            Ok(AddFoodOutcome::Added(food))
        }
        // Lost a race with a concurrent insert of the same name.
        None => {
            warn!(name, "food already exists");
            let existing = foods
                .find_by_name(name)
                .await?
                .ok_or(AppError::NotFound("Food"))?;
            Ok(AddFoodOutcome::AlreadyExists(existing))
        }
    }
}
