use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    auth::repo_types::{NewUser, User},
    db::unique_violation,
    error::AppError,
};

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    /// Insert a user. Uniqueness of email and username is enforced here,
    /// atomically, and reported as `DuplicateEmail` / `DuplicateUsername`.
    async fn create(&self, user: NewUser) -> Result<User, AppError>;
}

#[derive(Clone)]
pub struct PgUserRepo {
    db: PgPool,
}

impl PgUserRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

const USER_COLUMNS: &str = "id, username, email, password_hash, is_admin, created_at";

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let res = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, email, password_hash, is_admin)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.is_admin)
        .fetch_one(&self.db)
        .await;

        match res {
            Ok(u) => Ok(u),
            Err(e) => match unique_violation(&e).as_deref() {
                Some("users_email_key") => Err(AppError::DuplicateEmail),
                Some("users_username_key") => Err(AppError::DuplicateUsername),
                _ => Err(e.into()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.into(),
            email: email.into(),
            password_hash: "hash".into(),
            is_admin: false,
        }
    }

    #[sqlx::test]
    async fn unique_constraints_map_to_duplicate_errors(pool: PgPool) {
        let repo = PgUserRepo::new(pool);
        let first = repo
            .create(new_user("alice", "alice@example.com"))
            .await
            .unwrap();

        let err = repo
            .create(new_user("alice2", "alice@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateEmail));

        let err = repo
            .create(new_user("alice", "other@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateUsername));

        let found = repo.find_by_email("alice@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
        assert_eq!(found.username, "alice");
    }

    #[sqlx::test]
    async fn overlong_username_is_a_validation_error(pool: PgPool) {
        let repo = PgUserRepo::new(pool);
        let err = repo
            .create(new_user(&"u".repeat(101), "long@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(repo.find_by_email("long@example.com").await.unwrap().is_none());
    }
}
