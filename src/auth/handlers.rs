use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{instrument, warn};

use crate::{
    auth::{
        dto::{
            AuthResponse, LoginRequest, LogoutResponse, PublicUser, RefreshRequest,
            RegisterRequest, RegisterResponse,
        },
        extractors::{with_session_cookie, without_session_cookie, AuthUser},
        jwt::JwtKeys,
        repo_types::User,
        services::{authenticate, landing_page, register as register_user},
    },
    error::AppError,
    extract::AppJson,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout))
        .route("/auth/refresh", post(refresh))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let user = register_user(
        state.users.as_ref(),
        &payload.username,
        &payload.email,
        &payload.password,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: user.into(),
            message: "Account created! Please log in.",
            redirect_to: "/login",
        }),
    ))
}

#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let user = authenticate(state.users.as_ref(), &payload.email, &payload.password).await?;

    let keys = JwtKeys::from_ref(&state);
    let body = issue_tokens(&keys, user)?;
    let jar = with_session_cookie(jar, body.access_token.clone(), keys.access_ttl.as_secs());

    Ok((jar, Json(body)))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RefreshRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys.verify_refresh(&payload.refresh_token).map_err(|e| {
        warn!(error = %e, "refresh rejected");
        AppError::Unauthenticated
    })?;

    let user = state
        .users
        .find_by_id(claims.sub)
        .await?
        .ok_or(AppError::Unauthenticated)?;

    Ok(Json(issue_tokens(&keys, user)?))
}

#[instrument(skip_all, fields(user_id = user.id))]
pub async fn logout(
    jar: CookieJar,
    AuthUser(user): AuthUser,
) -> (CookieJar, Json<LogoutResponse>) {
    tracing::info!(user_id = user.id, "user logged out");
    (
        without_session_cookie(jar),
        Json(LogoutResponse { redirect_to: "/" }),
    )
}

#[instrument(skip_all, fields(user_id = user.id))]
pub async fn get_me(AuthUser(user): AuthUser) -> Json<PublicUser> {
    Json(user.into())
}

fn issue_tokens(keys: &JwtKeys, user: User) -> Result<AuthResponse, AppError> {
    let access_token = keys.sign_access(user.id)?;
    let refresh_token = keys.sign_refresh(user.id)?;
    let redirect_to = landing_page(&user);
    Ok(AuthResponse {
        access_token,
        refresh_token,
        user: user.into(),
        redirect_to,
    })
}
