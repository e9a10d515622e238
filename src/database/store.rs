use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{User, UserChanges, UserDocument};

/// Errors raised by a document store implementation
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique index rejected the write. `field` is the dotted document path.
    #[error("duplicate value for unique field '{field}'")]
    Duplicate { field: &'static str },

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// The users collection. Every call is a fresh round-trip against the
/// backing store; implementations keep no read cache.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new document and return it with its assigned id
    async fn insert(&self, doc: UserDocument) -> Result<User, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// All users whose name, email or profile name contains `term`,
    /// ignoring case. `None` returns the whole collection in store order.
    async fn find_all(&self, term: Option<&str>) -> Result<Vec<User>, StoreError>;

    /// Overwrite the given fields. `None` when no record has this id.
    async fn update(&self, id: Uuid, changes: &UserChanges) -> Result<Option<User>, StoreError>;

    /// Returns whether a record was removed
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Connectivity check for the health endpoint
    async fn ping(&self) -> Result<(), StoreError>;
}
