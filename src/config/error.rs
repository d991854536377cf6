//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// A configuration value that loaded but cannot be used
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid bind address '{0}', expected host:port")]
    InvalidBindAddress(String),

    #[error("Request timeout must be between 1 and {0} seconds")]
    InvalidTimeout(u64),

    #[error("Database URL must start with postgres:// or postgresql://")]
    InvalidDatabaseUrl,

    #[error("Database pool size must be between 1 and {0}")]
    InvalidPoolSize(u32),

    #[error("Compile timeout must be between 1 and {0} seconds")]
    InvalidCompileTimeout(u64),

    #[error("Compile passes must be between 1 and {0}")]
    InvalidCompilePasses(u32),

    #[error("Diagnostic buffer must hold at least {0} bytes")]
    InvalidDiagnosticLimit(usize),

    #[error(
        "Request timeout ({request_secs}s) is shorter than the worst-case compile time \
         ({compile_secs}s); raise SERVER__REQUEST_TIMEOUT_SECS or lower the compile budget"
    )]
    RequestTimeoutBelowCompileBudget { request_secs: u64, compile_secs: u64 },
}
