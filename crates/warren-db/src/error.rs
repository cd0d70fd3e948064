//! Error types for the data layer.
//!
//! All errors are propagated via [`StoreError`], which wraps the underlying
//! [`sqlx`] errors with additional context about which operation failed.

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A `PostgreSQL` migration failed.
    #[error("PostgreSQL migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored enum column held a value outside the closed variant set.
    #[error("invalid {column} value in database: {value}")]
    InvalidEnum {
        /// The column that held the value.
        column: &'static str,
        /// The offending value.
        value: String,
    },

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Whether the underlying failure is a unique-constraint violation.
    ///
    /// The engine uses this to turn races on unique keys (group names,
    /// one-log-per-day) into conflicts instead of internal errors.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Postgres(sqlx::Error::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }
}
