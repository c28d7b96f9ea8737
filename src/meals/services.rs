use tracing::{info, warn};

use crate::{
    error::AppError,
    foods::{repo::FoodRepo, services::get_food},
    meals::{
        repo::MealRepo,
        repo_types::{Meal, MealEntry, NewMeal},
    },
};

/// `floor(calories_per_100g * grams / 100)`. Fractional calories are dropped.
pub fn calories_for(calories_per_100g: i32, grams: i32) -> Result<i32, AppError> {
    if grams <= 0 {
        return Err(AppError::InvalidQuantity);
    }
    let kcal = i64::from(calories_per_100g.max(0)) * i64::from(grams) / 100;
    i32::try_from(kcal).map_err(|_| AppError::InvalidQuantity)
}

pub async fn add_meal(
    foods: &dyn FoodRepo,
    meals: &dyn MealRepo,
    user_id: i64,
    food_id: i64,
    grams: i32,
) -> Result<Meal, AppError> {
    if grams <= 0 {
        warn!(user_id, food_id, grams, "rejected non-positive quantity");
        return Err(AppError::InvalidQuantity);
    }
    let food = get_food(foods, food_id).await.map_err(|e| {
        if matches!(e, AppError::NotFound(_)) {
            warn!(user_id, food_id, "meal for unknown food");
        }
        e
    })?;
    let calories = calories_for(food.calories_per_100g, grams)?;

    let meal = meals
        .insert(NewMeal {
            user_id,
            food_id: food.id,
            grams,
            calories,
        })
        .await?;

    info!(meal_id = meal.id, user_id, food = %food.name, grams, calories, "meal added");
    Ok(meal)
}

pub async fn list_for_user(meals: &dyn MealRepo, user_id: i64) -> Result<Vec<MealEntry>, AppError> {
    meals.list_for_user(user_id).await
}

pub async fn total_calories(meals: &dyn MealRepo, user_id: i64) -> Result<i64, AppError> {
    meals.total_calories(user_id).await
}
