use sea_orm::{DbErr, SqlErr};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },
    #[error("{entity} '{key}' already exists")]
    Conflict { entity: &'static str, key: String },
    #[error("database error: {0}")]
    Database(#[from] DbErr),
    #[error("stored document is malformed: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Maps a unique index violation on insert to [`StoreError::Conflict`]
    pub(crate) fn on_insert(err: DbErr, entity: &'static str, key: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::Conflict {
                entity,
                key: key.to_string(),
            },
            _ => StoreError::Database(err),
        }
    }
}
