use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::extractors::AuthUser,
    error::AppError,
    extract::AppJson,
    foods::services::list_foods,
    meals::{
        dto::{AddMealForm, AddMealRequest, AddMealResponse, Dashboard},
        services::{add_meal, list_for_user, total_calories},
    },
    state::AppState,
};

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/add_meal", get(add_meal_form).post(create_meal))
}

#[instrument(skip_all, fields(user_id = user.id))]
pub async fn dashboard(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Dashboard>, AppError> {
    let meals = list_for_user(state.meals.as_ref(), user.id).await?;
    // Summed from the same snapshot so the list and the total always agree.
    let total_calories = meals.iter().map(|m| i64::from(m.calories)).sum();
    Ok(Json(Dashboard {
        meals,
        total_calories,
    }))
}

#[instrument(skip_all, fields(user_id = user.id))]
pub async fn add_meal_form(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<AddMealForm>, AppError> {
    let foods = list_foods(state.foods.as_ref()).await?;
    Ok(Json(AddMealForm { foods }))
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub async fn create_meal(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppJson(payload): AppJson<AddMealRequest>,
) -> Result<(StatusCode, Json<AddMealResponse>), AppError> {
    let meal = add_meal(
        state.foods.as_ref(),
        state.meals.as_ref(),
        user.id,
        payload.food_id,
        payload.grams,
    )
    .await?;
    let total_calories = total_calories(state.meals.as_ref(), user.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(AddMealResponse {
            meal,
            total_calories,
            redirect_to: "/dashboard",
        }),
    ))
}
