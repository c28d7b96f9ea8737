use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use crate::{
    auth::{
        password::{hash_password, verify_dummy, verify_password},
        repo::UserRepo,
        repo_types::{NewUser, User},
    },
    db::MAX_TEXT_LEN,
    error::AppError,
};

pub const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Create a plain (non-admin) account. The raw password is hashed before it
/// reaches the store and is never kept.
pub async fn register(
    users: &dyn UserRepo,
    username: &str,
    email: &str,
    raw_password: &str,
) -> Result<User, AppError> {
    let username = username.trim();
    let email = normalize_email(email);

    if username.is_empty() {
        return Err(AppError::Validation("Username is required".into()));
    }
    if username.chars().count() > MAX_TEXT_LEN {
        return Err(AppError::Validation("Username too long".into()));
    }
    if email.chars().count() > MAX_TEXT_LEN {
        return Err(AppError::Validation("Email too long".into()));
    }
    if !is_valid_email(&email) {
        return Err(AppError::Validation("Invalid email".into()));
    }
    if raw_password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation("Password too short".into()));
    }

    // Friendly early exits; the store's unique constraints are authoritative.
    if users.find_by_email(&email).await?.is_some() {
        warn!(%email, "email already registered");
        return Err(AppError::DuplicateEmail);
    }
    if users.find_by_username(username).await?.is_some() {
        warn!(%username, "username already taken");
        return Err(AppError::DuplicateUsername);
    }

    let password_hash = hash_password(raw_password)?;
    let user = users
        .create(NewUser {
            username: username.to_string(),
            email,
            password_hash,
            is_admin: false,
        })
        .await?;

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok(user)
}

/// Resolve credentials to a user. Unknown email and wrong password produce
/// the same error and cost one hash verification each.
pub async fn authenticate(
    users: &dyn UserRepo,
    email: &str,
    raw_password: &str,
) -> Result<User, AppError> {
    let email = normalize_email(email);

    let Some(user) = users.find_by_email(&email).await? else {
        verify_dummy(raw_password);
        warn!(%email, "login unknown email");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(raw_password, &user.password_hash)? {
        warn!(%email, user_id = user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok(user)
}

pub fn is_admin(user: &User) -> bool {
    user.is_admin
}

pub fn require_admin(user: &User, denied_message: &str) -> Result<(), AppError> {
    if is_admin(user) {
        return Ok(());
    }
    warn!(user_id = user.id, "admin access denied");
    Err(AppError::Denied(denied_message.to_string()))
}

/// Where the client should land after a successful login.
pub fn landing_page(user: &User) -> &'static str {
    if is_admin(user) {
        "/admin"
    } else {
        "/dashboard"
    }
}
