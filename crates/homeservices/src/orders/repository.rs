use super::domain::{OrderId, OrderRecord};

/// Storage abstraction so the service module can be exercised in isolation.
pub trait OrderRepository: Send + Sync {
    fn insert(&self, record: OrderRecord) -> Result<OrderRecord, RepositoryError>;
    /// Store `record` only if the stored copy still equals `expected`.
    ///
    /// The comparison and the write must happen as one step; a stale `expected` yields
    /// [`RepositoryError::Conflict`].
    fn update_if_unchanged(
        &self,
        expected: &OrderRecord,
        record: OrderRecord,
    ) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &OrderId) -> Result<Option<OrderRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists or changed concurrently")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
