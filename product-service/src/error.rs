//! Error types for service startup and database access

use std::fmt;
use thiserror::Error;

use crate::repository::{RepositoryError, RepositoryErrorKind, RepositoryOperation};

// ============================================================================
// Structured Database Errors
// ============================================================================

/// Database operation being performed when the error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseOperation {
    /// Establishing a database connection
    Connect,
    /// Executing a query
    Query,
    /// Creating tables and indexes at startup
    Schema,
    /// Acquiring a connection from the pool
    PoolAcquire,
}

impl fmt::Display for DatabaseOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect => write!(f, "connect"),
            Self::Query => write!(f, "query"),
            Self::Schema => write!(f, "schema"),
            Self::PoolAcquire => write!(f, "pool_acquire"),
        }
    }
}

/// Category of database error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseErrorKind {
    /// Failed to establish connection
    ConnectionFailed,
    /// Record not found
    NotFound,
    /// Constraint violation (unique, foreign key, check)
    ConstraintViolation,
    /// Query execution failed
    QueryFailed,
    /// Type conversion error
    TypeConversion,
    /// Configuration error
    Configuration,
    /// Connection pool exhausted
    PoolExhausted,
    /// Other/unknown error
    Other,
}

impl fmt::Display for DatabaseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::NotFound => write!(f, "not_found"),
            Self::ConstraintViolation => write!(f, "constraint_violation"),
            Self::QueryFailed => write!(f, "query_failed"),
            Self::TypeConversion => write!(f, "type_conversion"),
            Self::Configuration => write!(f, "configuration"),
            Self::PoolExhausted => write!(f, "pool_exhausted"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Structured database error with operation context
///
/// `message` holds the driver's own text unchanged. The HTTP layer forwards
/// it to clients on 500 responses, so nothing here should add detail that
/// is not already in the driver error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseError {
    /// The operation being performed when the error occurred
    pub operation: DatabaseOperation,
    /// The category of error
    pub kind: DatabaseErrorKind,
    /// Human-readable error message
    pub message: String,
    /// Additional context (e.g., table name, statement)
    pub context: Option<String>,
}

impl DatabaseError {
    /// Create a new database error
    pub fn new(
        operation: DatabaseOperation,
        kind: DatabaseErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            context: None,
        }
    }

    /// Create a connection failed error
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::new(
            DatabaseOperation::Connect,
            DatabaseErrorKind::ConnectionFailed,
            message,
        )
    }

    /// Create a pool exhausted error
    pub fn pool_exhausted(message: impl Into<String>) -> Self {
        Self::new(
            DatabaseOperation::PoolAcquire,
            DatabaseErrorKind::PoolExhausted,
            message,
        )
    }

    /// Check if this error is retriable (transient errors that may succeed on retry)
    pub fn is_retriable(&self) -> bool {
        matches!(
            self.kind,
            DatabaseErrorKind::ConnectionFailed | DatabaseErrorKind::PoolExhausted
        )
    }

    /// Replace the operation, keeping kind and message
    #[must_use]
    pub fn during(mut self, operation: DatabaseOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Add context to an existing error
    #[must_use]
    pub fn add_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Database {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let Some(ref ctx) = self.context {
            write!(f, " [context: {}]", ctx)?;
        }
        Ok(())
    }
}

impl std::error::Error for DatabaseError {}

/// Result type alias using the service error
pub type Result<T> = std::result::Result<T, Error>;

/// Service-level error raised while loading config, connecting, or serving
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Structured database error with operation context
    #[error("{0}")]
    Database(DatabaseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::Error as E;
        match err {
            E::RowNotFound => Self::new(
                DatabaseOperation::Query,
                DatabaseErrorKind::NotFound,
                "Row not found",
            ),
            E::PoolTimedOut => Self::pool_exhausted("Connection pool timed out"),
            E::PoolClosed => Self::connection_failed("Connection pool is closed"),
            E::Configuration(e) => Self::new(
                DatabaseOperation::Connect,
                DatabaseErrorKind::Configuration,
                e.to_string(),
            ),
            E::Io(e) => Self::connection_failed(e.to_string()),
            E::Tls(e) => Self::connection_failed(format!("TLS error: {}", e)),
            E::ColumnNotFound(col) => Self::new(
                DatabaseOperation::Query,
                DatabaseErrorKind::QueryFailed,
                format!("Column not found: {}", col),
            ),
            E::ColumnDecode { index, source } => Self::new(
                DatabaseOperation::Query,
                DatabaseErrorKind::TypeConversion,
                format!("Failed to decode column {}: {}", index, source),
            ),
            E::Decode(e) => Self::new(
                DatabaseOperation::Query,
                DatabaseErrorKind::TypeConversion,
                e.to_string(),
            ),
            E::Database(db_err) => {
                let kind = if db_err.is_unique_violation()
                    || db_err.is_foreign_key_violation()
                    || db_err.is_check_violation()
                {
                    DatabaseErrorKind::ConstraintViolation
                } else {
                    DatabaseErrorKind::QueryFailed
                };
                // Postgres renders the bare server message here, e.g.
                // `duplicate key value violates unique constraint "..."`.
                Self::new(DatabaseOperation::Query, kind, db_err.message())
            }
            E::WorkerCrashed => Self::connection_failed("Database worker crashed"),
            _ => Self::new(
                DatabaseOperation::Query,
                DatabaseErrorKind::Other,
                err.to_string(),
            ),
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::Database(DatabaseError::from(err))
    }
}

impl From<DatabaseError> for Error {
    fn from(err: DatabaseError) -> Self {
        Error::Database(err)
    }
}

impl DatabaseError {
    /// Convert into a repository error raised by `operation`
    ///
    /// The kind is narrowed to the repository's categories; the message is
    /// carried over unchanged.
    pub fn into_repository_error(self, operation: RepositoryOperation) -> RepositoryError {
        let kind = match self.kind {
            DatabaseErrorKind::NotFound => RepositoryErrorKind::NotFound,
            DatabaseErrorKind::ConstraintViolation => RepositoryErrorKind::ConstraintViolation,
            DatabaseErrorKind::ConnectionFailed | DatabaseErrorKind::PoolExhausted => {
                RepositoryErrorKind::ConnectionFailed
            }
            _ => RepositoryErrorKind::DatabaseError,
        };

        RepositoryError::new(operation, kind, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_operation_display() {
        assert_eq!(DatabaseOperation::Connect.to_string(), "connect");
        assert_eq!(DatabaseOperation::Schema.to_string(), "schema");
        assert_eq!(DatabaseOperation::PoolAcquire.to_string(), "pool_acquire");
    }

    #[test]
    fn test_database_error_display_with_context() {
        let err = DatabaseError::connection_failed("refused").add_context("products");
        assert_eq!(
            err.to_string(),
            "Database connection_failed error during connect: refused [context: products]"
        );
    }

    #[test]
    fn test_retriable_kinds() {
        assert!(DatabaseError::connection_failed("x").is_retriable());
        assert!(DatabaseError::pool_exhausted("x").is_retriable());
        assert!(!DatabaseError::new(
            DatabaseOperation::Query,
            DatabaseErrorKind::ConstraintViolation,
            "dup"
        )
        .is_retriable());
    }

    #[test]
    fn test_sqlx_pool_errors_map_to_connection_kinds() {
        let err = DatabaseError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(err.kind, DatabaseErrorKind::PoolExhausted);

        let err = DatabaseError::from(sqlx::Error::PoolClosed);
        assert_eq!(err.kind, DatabaseErrorKind::ConnectionFailed);

        let err = DatabaseError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.kind, DatabaseErrorKind::NotFound);
    }

    #[test]
    fn test_database_error_into_repository_error_keeps_message() {
        let err = DatabaseError::new(
            DatabaseOperation::Query,
            DatabaseErrorKind::ConstraintViolation,
            "duplicate key value violates unique constraint \"idx_products_sku\"",
        );
        let repo_err = err.into_repository_error(RepositoryOperation::Create);
        assert_eq!(repo_err.kind, RepositoryErrorKind::ConstraintViolation);
        assert_eq!(repo_err.operation, RepositoryOperation::Create);
        assert!(repo_err.message.starts_with("duplicate key value"));
    }

    #[test]
    fn test_connection_errors_become_connection_failed() {
        let repo_err = DatabaseError::pool_exhausted("Connection pool timed out")
            .into_repository_error(RepositoryOperation::Ping);
        assert_eq!(repo_err.kind, RepositoryErrorKind::ConnectionFailed);
        assert_eq!(repo_err.operation, RepositoryOperation::Ping);
    }

    #[test]
    fn test_error_display() {
        let err = Error::Internal("boom".to_string());
        assert_eq!(err.to_string(), "Internal error: boom");
    }
}
