use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{extractors::AuthUser, services::require_admin},
    error::AppError,
    extract::AppJson,
    foods::{
        dto::{AddFoodForm, AddFoodRequest, AddFoodResponse, FlashStatus, FoodList},
        services::{add_food, list_foods, AddFoodOutcome},
    },
    state::AppState,
};

const DASHBOARD_DENIED: &str = "Access denied! Only admin can access this page.";
const ADD_FOOD_DENIED: &str = "Access denied! Only admin can add foods.";

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin_dashboard))
        .route("/admin/add_food", get(add_food_form).post(admin_add_food))
}

#[instrument(skip_all, fields(user_id = user.id))]
pub async fn admin_dashboard(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<FoodList>, AppError> {
    require_admin(&user, DASHBOARD_DENIED)?;
    let foods = list_foods(state.foods.as_ref()).await?;
    Ok(Json(FoodList { foods }))
}

#[instrument(skip_all, fields(user_id = user.id))]
pub async fn add_food_form(AuthUser(user): AuthUser) -> Result<Json<AddFoodForm>, AppError> {
    require_admin(&user, ADD_FOOD_DENIED)?;
    Ok(Json(AddFoodForm {
        fields: ["name", "calories"],
    }))
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub async fn admin_add_food(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppJson(payload): AppJson<AddFoodRequest>,
) -> Result<(StatusCode, Json<AddFoodResponse>), AppError> {
    require_admin(&user, ADD_FOOD_DENIED)?;

    let outcome = add_food(state.foods.as_ref(), &payload.name, payload.calories).await?;
    let res = match outcome {
        AddFoodOutcome::Added(food) => (
            StatusCode::CREATED,
            Json(AddFoodResponse {
                status: FlashStatus::Success,
                message: "Food added successfully!",
                food,
            }),
        ),
        AddFoodOutcome::AlreadyExists(food) => (
            StatusCode::OK,
            Json(AddFoodResponse {
                status: FlashStatus::Warning,
                message: "Food already exists!",
                food,
            }),
        ),
    };
    Ok(res)
}
