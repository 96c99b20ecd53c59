use thiserror::Error;

/// Datastore failures, classified by origin. Repositories convert
/// `sqlx::Error` into this at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DbError {
    #[error("database connection failed: {0}")]
    Connection(String),
    #[error("table `{table}` does not exist")]
    MissingSchema { table: String },
    #[error("record not found")]
    NotFound,
    #[error("duplicate key: {0}")]
    Conflict(String),
    #[error("failed to decode row: {0}")]
    Decode(String),
    #[error("database error: {0}")]
    Other(String),
}

impl DbError {
    pub fn is_missing_schema(&self) -> bool {
        matches!(self, DbError::MissingSchema { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, DbError::Conflict(_))
    }
}

const UNDEFINED_TABLE: &str = "42P01";
const UNIQUE_VIOLATION: &str = "23505";

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => DbError::NotFound,
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some(UNDEFINED_TABLE) => DbError::MissingSchema {
                    table: missing_table_name(db_err.message()),
                },
                Some(UNIQUE_VIOLATION) => DbError::Conflict(db_err.message().to_string()),
                // Class 08: connection exception
                Some(code) if code.starts_with("08") => DbError::Connection(err.to_string()),
                _ => DbError::Other(err.to_string()),
            },
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Configuration(_) => DbError::Connection(err.to_string()),
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. } => DbError::Decode(err.to_string()),
            _ => DbError::Other(err.to_string()),
        }
    }
}

/// Pulls the relation name out of `relation "public.prizes" does not exist`.
fn missing_table_name(message: &str) -> String {
    message
        .split('"')
        .nth(1)
        .map(|name| name.rsplit('.').next().unwrap_or(name).to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
