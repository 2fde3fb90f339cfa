use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("corrupt state file: {0}")]
    Corrupt(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: u64) -> Self {
        Self::NotFound(format!("{} {} not found", entity, id))
    }

    pub fn duplicate_code(code: &str) -> Self {
        Self::Conflict(format!("a product with code \"{}\" already exists", code))
    }
}
