use serde::{Deserialize, Serialize};

use crate::{
    foods::repo_types::Food,
    meals::repo_types::{Meal, MealEntry},
};

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub meals: Vec<MealEntry>,
    pub total_calories: i64,
}

#[derive(Debug, Serialize)]
pub struct AddMealForm {
    pub foods: Vec<Food>,
}

#[derive(Debug, Deserialize)]
pub struct AddMealRequest {
    pub food_id: i64,
    pub grams: i32,
}

#[derive(Debug, Serialize)]
pub struct AddMealResponse {
    pub meal: Meal,
    /// The owner's running total including this meal.
    pub total_calories: i64,
    pub redirect_to: &'static str,
}
