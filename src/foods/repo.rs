use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    error::AppError,
    foods::repo_types::{Food, NewFood},
};

#[async_trait]
pub trait FoodRepo: Send + Sync {
    /// All foods ordered by id ascending.
    async fn list(&self) -> Result<Vec<Food>, AppError>;
    async fn get(&self, id: i64) -> Result<Option<Food>, AppError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Food>, AppError>;
    /// Insert unless the name is taken. `None` means a food with that name
    /// already exists and nothing was written.
    async fn insert(&self, food: NewFood) -> Result<Option<Food>, AppError>;
    async fn count(&self) -> Result<i64, AppError>;
    /// Insert all foods in one transaction, in order.
    async fn insert_many(&self, foods: Vec<NewFood>) -> Result<u64, AppError>;
}

#[derive(Clone)]
pub struct PgFoodRepo {
    db: PgPool,
}

impl PgFoodRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FoodRepo for PgFoodRepo {
    async fn list(&self) -> Result<Vec<Food>, AppError> {
        let rows = sqlx::query_as::<_, Food>(
            r#"
            SELECT id, name, calories_per_100g
            FROM foods
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn get(&self, id: i64) -> Result<Option<Food>, AppError> {
        let row = sqlx::query_as::<_, Food>(
            r#"SELECT id, name, calories_per_100g FROM foods WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Food>, AppError> {
        let row = sqlx::query_as::<_, Food>(
            r#"SELECT id, name, calories_per_100g FROM foods WHERE name = $1"#,
        )
        .bind(name)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn insert(&self, food: NewFood) -> Result<Option<Food>, AppError> {
        let row = sqlx::query_as::<_, Food>(
            r#"
            INSERT INTO foods (name, calories_per_100g)
            VALUES ($1, $2)
            ON CONFLICT (name) DO NOTHING
            RETURNING id, name, calories_per_100g
            "#,
        )
        .bind(&food.name)
        .bind(food.calories_per_100g)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM foods")
            .fetch_one(&self.db)
            .await?;
        Ok(n)
    }

    async fn insert_many(&self, foods: Vec<NewFood>) -> Result<u64, AppError> {
        let mut tx = self.db.begin().await?;
        let mut inserted = 0;
        for food in &foods {
            let res = sqlx::query(
                r#"
                INSERT INTO foods (name, calories_per_100g)
                VALUES ($1, $2)
                ON CONFLICT (name) DO NOTHING
                "#,
            )
            .bind(&food.name)
            .bind(food.calories_per_100g)
            .execute(&mut *tx)
            .await?;
            inserted += res.rows_affected();
        }
        tx.commit().await?;
        Ok(inserted)
    }
}
