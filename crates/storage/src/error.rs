use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    ConstraintViolation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e)) if e.is_unique_violation()
        )
    }

    /// Turns a unique-constraint failure into a `ConstraintViolation` carrying
    /// `message`, leaving every other error untouched.
    pub fn on_unique_violation(self, message: impl FnOnce() -> String) -> Self {
        if self.is_unique_violation() {
            StorageError::ConstraintViolation(message())
        } else {
            self
        }
    }
}
