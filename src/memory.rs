//! In-memory repositories backing the unit tests. One lock guards all
//! tables, so uniqueness checks and inserts are atomic like the database's.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::{
    auth::{
        repo::UserRepo,
        repo_types::{NewUser, User},
    },
    error::AppError,
    foods::{
        repo::FoodRepo,
        repo_types::{Food, NewFood},
    },
    meals::{
        repo::MealRepo,
        repo_types::{Meal, MealEntry, NewMeal},
    },
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    foods: Vec<Food>,
    meals: Vec<Meal>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    /// Change a food's calorie density in place; used to check that
    /// recorded meals keep their original calories.
    pub fn set_food_calories(&self, food_id: i64, calories_per_100g: i32) {
        if let Some(f) = self.lock().foods.iter_mut().find(|f| f.id == food_id) {
            f.calories_per_100g = calories_per_100g;
        }
    }
}

fn next_id(len: usize) -> i64 {
    len as i64 + 1
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.lock().users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let mut t = self.lock();
        if t.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::DuplicateEmail);
        }
        if t.users.iter().any(|u| u.username == user.username) {
            return Err(AppError::DuplicateUsername);
        }
        let row = User {
            id: next_id(t.users.len()),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            is_admin: user.is_admin,
            created_at: OffsetDateTime::now_utc(),
        };
        t.users.push(row.clone());
        Ok(row)
    }
}

#[async_trait]
impl FoodRepo for MemoryStore {
    async fn list(&self) -> Result<Vec<Food>, AppError> {
        let mut foods = self.lock().foods.clone();
        foods.sort_by_key(|f| f.id);
        Ok(foods)
    }

    async fn get(&self, id: i64) -> Result<Option<Food>, AppError> {
        Ok(self.lock().foods.iter().find(|f| f.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Food>, AppError> {
        Ok(self.lock().foods.iter().find(|f| f.name == name).cloned())
    }

    async fn insert(&self, food: NewFood) -> Result<Option<Food>, AppError> {
        let mut t = self.lock();
        if t.foods.iter().any(|f| f.name == food.name) {
            return Ok(None);
        }
        let row = Food {
            id: next_id(t.foods.len()),
            name: food.name,
            calories_per_100g: food.calories_per_100g,
        };
        t.foods.push(row.clone());
        Ok(Some(row))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.lock().foods.len() as i64)
    }

    async fn insert_many(&self, foods: Vec<NewFood>) -> Result<u64, AppError> {
        let mut inserted = 0;
        for food in foods {
            if FoodRepo::insert(self, food).await?.is_some() {
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}

#[async_trait]
impl MealRepo for MemoryStore {
    async fn insert(&self, meal: NewMeal) -> Result<Meal, AppError> {
        let mut t = self.lock();
        if !t.foods.iter().any(|f| f.id == meal.food_id) {
            return Err(AppError::NotFound("Food"));
        }
        let row = Meal {
            id: next_id(t.meals.len()),
            grams: meal.grams,
            calories: meal.calories,
            created_at: OffsetDateTime::now_utc(),
            user_id: meal.user_id,
            food_id: meal.food_id,
        };
        t.meals.push(row.clone());
        Ok(row)
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<MealEntry>, AppError> {
        let t = self.lock();
        let entries = t
            .meals
            .iter()
            .filter(|m| m.user_id == user_id)
            .filter_map(|m| {
                let food = t.foods.iter().find(|f| f.id == m.food_id)?;
                Some(MealEntry {
                    id: m.id,
                    food_id: m.food_id,
                    food_name: food.name.clone(),
                    grams: m.grams,
                    calories: m.calories,
                    created_at: m.created_at,
                })
            })
            .collect();
        Ok(entries)
    }

    async fn total_calories(&self, user_id: i64) -> Result<i64, AppError> {
        Ok(self
            .lock()
            .meals
            .iter()
            .filter(|m| m.user_id == user_id)
            .map(|m| i64::from(m.calories))
            .sum())
    }
}
