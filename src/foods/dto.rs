use serde::{Deserialize, Serialize};

use crate::foods::repo_types::Food;

#[derive(Debug, Serialize)]
pub struct FoodList {
    pub foods: Vec<Food>,
}

#[derive(Debug, Deserialize)]
pub struct AddFoodRequest {
    pub name: String,
    pub calories: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashStatus {
    Success,
    Warning,
}

/// The add-food form is redisplayed after every submission with this flash.
#[derive(Debug, Serialize)]
pub struct AddFoodResponse {
    pub status: FlashStatus,
    pub message: &'static str,
    pub food: Food,
}

#[derive(Debug, Serialize)]
pub struct AddFoodForm {
    pub fields: [&'static str; 2],
}
