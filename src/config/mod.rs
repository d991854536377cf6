//! Service configuration
//!
//! Everything is read from `CHARTER_FORGE__<SECTION>__<KEY>` environment
//! variables, with a `.env` file honoured in development:
//!
//! ```text
//! CHARTER_FORGE__DOCUMENT__OUTPUT_PATH=/var/lib/charter-forge
//! CHARTER_FORGE__DOCUMENT__TEMPLATE_PATH=/etc/charter-forge/charter.tex
//! CHARTER_FORGE__DOCUMENT__COMPILE_PASSES=2
//! CHARTER_FORGE__SERVER__BIND_ADDRESS=0.0.0.0:8080
//! CHARTER_FORGE__DATABASE__URL=postgres://forge@db/charters
//! ```
//!
//! Only the two document paths are required.

mod database;
mod document;
mod error;
mod server;

pub use database::DatabaseConfig;
pub use document::DocumentConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    pub document: DocumentConfig,
}

impl AppConfig {
    /// Reads `.env` (if present) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(config::Environment::with_prefix("CHARTER_FORGE").separator("__"))
    }

    fn from_source<S>(source: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Checks each section, then that a request can outlive its compilation.
    ///
    /// `TimeoutLayer` cancels the whole request, so a request timeout shorter
    /// than `compile_passes * compile_timeout_secs` would abort compilations
    /// that were still within their per-pass budget.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.document.validate()?;

        let compile_secs = self.document.worst_case_compile_secs();
        if self.server.request_timeout_secs <= compile_secs {
            return Err(ValidationError::RequestTimeoutBelowCompileBudget {
                request_secs: self.server.request_timeout_secs,
                compile_secs,
            });
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
