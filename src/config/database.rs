//! Document store selection
//!
//! An empty `url` keeps documents in process memory; anything else must be a
//! PostgreSQL URL.

use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use super::error::ValidationError;

/// Document generation is CPU-bound on the compiler, not on the database.
const MAX_POOL_SIZE: u32 = 32;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    #[serde(default)]
    pub url: String,

    /// Pool size; defaults to 5
    pub max_connections: Option<u32>,

    /// Apply `migrations/` on startup
    #[serde(default)]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn postgres(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections.unwrap_or(5)
    }

    /// Pool settings for the PostgreSQL document repository.
    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections())
            .acquire_timeout(Duration::from_secs(10))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.is_configured() {
            return Ok(());
        }
        let url = self.url.trim();
        if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if !(1..=MAX_POOL_SIZE).contains(&self.max_connections()) {
            return Err(ValidationError::InvalidPoolSize(MAX_POOL_SIZE));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_url_means_in_memory() {
        let config = DatabaseConfig::default();
        assert!(!config.is_configured());
        assert!(config.validate().is_ok());

        let blank = DatabaseConfig::postgres("   ");
        assert!(!blank.is_configured());
    }

    #[test]
    fn postgres_url_is_accepted() {
        let config = DatabaseConfig::postgres("postgresql://forge:pw@db:5432/charters");
        assert!(config.is_configured());
        assert_eq!(config.max_connections(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn other_schemes_are_rejected() {
        let config = DatabaseConfig::postgres("mysql://localhost/charters");
        assert_eq!(config.validate(), Err(ValidationError::InvalidDatabaseUrl));
    }

    #[test]
    fn pool_size_is_bounded() {
        for size in [0, MAX_POOL_SIZE + 1] {
            let config = DatabaseConfig {
                max_connections: Some(size),
                ..DatabaseConfig::postgres("postgres://localhost/charters")
            };
            assert_eq!(
                config.validate(),
                Err(ValidationError::InvalidPoolSize(MAX_POOL_SIZE))
            );
        }
    }

    #[test]
    fn pool_size_is_ignored_without_url() {
        let config = DatabaseConfig {
            max_connections: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
