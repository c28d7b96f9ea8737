//! First-run bootstrap: the seed admin account and the reference food list.
//! Both steps are check-then-create and safe to run on every start.

use tracing::{debug, info};

use crate::{
    auth::{
        password::hash_password,
        repo::UserRepo,
        repo_types::{NewUser, User},
        services::normalize_email,
    },
    config::SeedConfig,
    error::AppError,
    foods::{repo::FoodRepo, repo_types::NewFood},
};

pub const DEFAULT_FOODS: [(&str, i32); 25] = [
    ("Rice", 130),
    ("Chicken", 239),
    ("Apple", 52),
    ("Milk", 42),
    ("Bread", 265),
    ("Egg", 155),
    ("Banana", 89),
    ("Potato", 77),
    ("Cheese", 402),
    ("Fish", 206),
    ("Oats", 389),
    ("Yogurt", 59),
    ("Tomato", 18),
    ("Cucumber", 16),
    ("Carrot", 41),
    ("Spinach", 23),
    ("Pasta", 131),
    ("Beef", 250),
    ("Pork", 242),
    ("Lentils", 116),
    ("Almonds", 579),
    ("Peanuts", 567),
    ("Walnuts", 654),
    ("Avocado", 160),
    ("Mango", 60),
];

/// Create the admin account unless one with the seed email exists.
/// Returns the new user, or `None` when nothing was done.
pub async fn ensure_admin_seed(
    users: &dyn UserRepo,
    seed: &SeedConfig,
) -> Result<Option<User>, AppError> {
    let email = normalize_email(&seed.admin_email);
    if users.find_by_email(&email).await?.is_some() {
        debug!(%email, "admin seed present");
        return Ok(None);
    }

    let password_hash = hash_password(&seed.admin_password)?;
    let admin = users
        .create(NewUser {
            username: seed.admin_username.clone(),
            email,
            password_hash,
            is_admin: true,
        })
        .await?;

    info!(user_id = admin.id, email = %admin.email, "admin user created");
    Ok(Some(admin))
}

/// Insert the reference foods when the catalog is empty. Returns rows inserted.
pub async fn ensure_food_seed(foods: &dyn FoodRepo) -> Result<u64, AppError> {
    if foods.count().await? > 0 {
        debug!("food catalog already populated");
        return Ok(0);
    }

    let batch = DEFAULT_FOODS
        .iter()
        .map(|(name, kcal)| NewFood {
            name: (*name).to_string(),
            calories_per_100g: *kcal,
        })
        .collect();
    let inserted = foods.insert_many(batch).await?;

    info!(inserted, "default foods inserted");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{auth::services::authenticate, foods::services::add_food, memory::MemoryStore};

    fn seed_config() -> SeedConfig {
        SeedConfig {
            admin_email: "admin@example.com".into(),
            admin_username: "Admin".into(),
            admin_password: "Ani@1112".into(),
        }
    }

    #[tokio::test]
    async fn admin_seed_is_idempotent() {
        let store = MemoryStore::new();
        let cfg = seed_config();

        let created = ensure_admin_seed(&store, &cfg).await.unwrap();
        assert!(created.is_some_and(|u| u.is_admin));
        assert!(ensure_admin_seed(&store, &cfg).await.unwrap().is_none());
        assert_eq!(store.user_count(), 1);

        let admin = authenticate(&store, "admin@example.com", "Ani@1112")
            .await
            .unwrap();
        assert!(admin.is_admin);
        assert_eq!(admin.username, "Admin");
    }

    #[tokio::test]
    async fn food_seed_fills_empty_catalog_in_order() {
        let store = MemoryStore::new();
        assert_eq!(ensure_food_seed(&store).await.unwrap(), 25);

        let seeded: Vec<(String, i32)> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|f| (f.name, f.calories_per_100g))
            .collect();
        let expected: Vec<(String, i32)> = [
            ("Rice", 130),
            ("Chicken", 239),
            ("Apple", 52),
            ("Milk", 42),
            ("Bread", 265),
            ("Egg", 155),
            ("Banana", 89),
            ("Potato", 77),
            ("Cheese", 402),
            ("Fish", 206),
            ("Oats", 389),
            ("Yogurt", 59),
            ("Tomato", 18),
            ("Cucumber", 16),
            ("Carrot", 41),
            ("Spinach", 23),
            ("Pasta", 131),
            ("Beef", 250),
            ("Pork", 242),
            ("Lentils", 116),
            ("Almonds", 579),
            ("Peanuts", 567),
            ("Walnuts", 654),
            ("Avocado", 160),
            ("Mango", 60),
        ]
        .into_iter()
        .map(|(name, kcal)| (name.to_string(), kcal))
        .collect();
        assert_eq!(seeded, expected);

        assert_eq!(ensure_food_seed(&store).await.unwrap(), 0);
        assert_eq!(store.list().await.unwrap().len(), 25);
    }

    #[tokio::test]
    async fn food_seed_skips_non_empty_catalog() {
        let store = MemoryStore::new();
        add_food(&store, "Kiwi", 61).await.unwrap();
        assert_eq!(ensure_food_seed(&store).await.unwrap(), 0);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }
}
