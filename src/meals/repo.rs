use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    error::AppError,
    meals::repo_types::{Meal, MealEntry, NewMeal},
};

#[async_trait]
pub trait MealRepo: Send + Sync {
    /// Append a meal; the store stamps id and creation time.
    async fn insert(&self, meal: NewMeal) -> Result<Meal, AppError>;
    /// Meals owned by `user_id`, oldest first, each with its food's name.
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<MealEntry>, AppError>;
    async fn total_calories(&self, user_id: i64) -> Result<i64, AppError>;
}

#[derive(Clone)]
pub struct PgMealRepo {
    db: PgPool,
}

impl PgMealRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MealRepo for PgMealRepo {
    async fn insert(&self, meal: NewMeal) -> Result<Meal, AppError> {
        let res = sqlx::query_as::<_, Meal>(
            r#"
            INSERT INTO meals (grams, calories, user_id, food_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, grams, calories, created_at, user_id, food_id
            "#,
        )
        .bind(meal.grams)
        .bind(meal.calories)
        .bind(meal.user_id)
        .bind(meal.food_id)
        .fetch_one(&self.db)
        .await;

        match res {
            Ok(m) => Ok(m),
            Err(e) => {
                let fk_constraint = e
                    .as_database_error()
                    .filter(|d| d.is_foreign_key_violation())
                    .map(|d| d.constraint().unwrap_or_default().to_string());
                match fk_constraint.as_deref() {
                    Some("meals_user_id_fkey") => Err(AppError::NotFound("User")),
                    Some(_) => Err(AppError::NotFound("Food")),
                    None => Err(e.into()),
                }
            }
        }
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<MealEntry>, AppError> {
        let rows = sqlx::query_as::<_, MealEntry>(
            r#"
            SELECT m.id, m.food_id, f.name AS food_name, m.grams, m.calories, m.created_at
            FROM meals m
            JOIN foods f ON f.id = m.food_id
            WHERE m.user_id = $1
            ORDER BY m.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn total_calories(&self, user_id: i64) -> Result<i64, AppError> {
        let (total,): (i64,) = sqlx::query_as(
            r#"SELECT COALESCE(SUM(calories), 0)::BIGINT FROM meals WHERE user_id = $1"#,
        )
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auth::repo::{PgUserRepo, UserRepo},
        auth::repo_types::NewUser,
        foods::repo::{FoodRepo, PgFoodRepo},
        foods::repo_types::NewFood,
    };

    async fn user_and_food(pool: &PgPool) -> (i64, i64) {
        let user = PgUserRepo::new(pool.clone())
            .create(NewUser {
                username: "erin".into(),
                email: "erin@example.com".into(),
                password_hash: "hash".into(),
                is_admin: false,
            })
            .await
            .unwrap();
        let food = PgFoodRepo::new(pool.clone())
            .insert(NewFood {
                name: "Chicken".into(),
                calories_per_100g: 239,
            })
            .await
            .unwrap()
            .unwrap();
        (user.id, food.id)
    }

    fn new_meal(user_id: i64, food_id: i64, grams: i32, calories: i32) -> NewMeal {
        NewMeal {
            user_id,
            food_id,
            grams,
            calories,
        }
    }

    #[sqlx::test]
    async fn total_is_zero_without_meals(pool: PgPool) {
        let repo = PgMealRepo::new(pool);
        assert_eq!(repo.total_calories(12345).await.unwrap(), 0);
        assert!(repo.list_for_user(12345).await.unwrap().is_empty());
    }

    #[sqlx::test]
    async fn list_joins_food_name_and_total_sums(pool: PgPool) {
        let (user_id, food_id) = user_and_food(&pool).await;
        let repo = PgMealRepo::new(pool);
        repo.insert(new_meal(user_id, food_id, 150, 358)).await.unwrap();
        repo.insert(new_meal(user_id, food_id, 100, 239)).await.unwrap();

        let entries = repo.list_for_user(user_id).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.food_name == "Chicken"));
        assert!(entries[0].id < entries[1].id);
        assert_eq!(repo.total_calories(user_id).await.unwrap(), 597);
    }

    #[sqlx::test]
    async fn foreign_key_violations_map_to_not_found(pool: PgPool) {
        let (user_id, food_id) = user_and_food(&pool).await;
        let repo = PgMealRepo::new(pool);

        let err = repo.insert(new_meal(user_id + 1000, food_id, 10, 1)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound("User")));

        let err = repo.insert(new_meal(user_id, food_id + 1000, 10, 1)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound("Food")));

        assert_eq!(repo.total_calories(user_id).await.unwrap(), 0);
    }
}
