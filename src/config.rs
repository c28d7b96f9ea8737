use anyhow::ensure;
use serde::Deserialize;

/// Upper bound for any token lifetime: one year.
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

/// Credentials of the account created on first start.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    pub admin_email: String,
    pub admin_username: String,
    pub admin_password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt: JwtConfig,
    pub seed: SeedConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let db_max_connections = env_parse("DB_MAX_CONNECTIONS", 10);
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "caltrack".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "caltrack-users".into()),
            ttl_minutes: ttl_minutes("JWT_TTL_MINUTES", 60)?,
            refresh_ttl_minutes: ttl_minutes("JWT_REFRESH_TTL_MINUTES", 60 * 24 * 14)?,
        };
        let seed = SeedConfig::from_env();
        Ok(Self {
            database_url,
            db_max_connections,
            jwt,
            seed,
        })
    }
}

impl SeedConfig {
    pub fn from_env() -> Self {
        Self {
            admin_email: std::env::var("SEED_ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@example.com".into()),
            admin_username: std::env::var("SEED_ADMIN_USERNAME").unwrap_or_else(|_| "Admin".into()),
            admin_password: std::env::var("SEED_ADMIN_PASSWORD")
                .unwrap_or_else(|_| "Ani@1112".into()),
        }
    }
}

fn ttl_minutes(key: &str, default: i64) -> anyhow::Result<i64> {
    let minutes = env_parse(key, default);
    ensure!(
        (1..=MAX_TTL_MINUTES).contains(&minutes),
        "{key} must be between 1 and {MAX_TTL_MINUTES} minutes, got {minutes}"
    );
    Ok(minutes)
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
