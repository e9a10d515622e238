use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{User, UserChanges, UserDocument};
use crate::database::store::{StoreError, UserStore};

/// Business outcome of a users operation. Anything the service cannot
/// classify collapses into `Unavailable` after being logged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Database service unavailable")]
    Unavailable,
}

/// Users repository: CRUD over the store with existence and uniqueness checks
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Create user with duplicate email check
    pub async fn create(&self, doc: UserDocument) -> Result<User, ServiceError> {
        let context = "Error creating user";

        let existing = self
            .store
            .find_by_email(&doc.email)
            .await
            .map_err(|e| handle_store_error(e, context))?;
        if existing.is_some() {
            return Err(email_in_use(&doc.email));
        }

        let email = doc.email.clone();
        let code = doc.profile.code.clone();
        let user = self.store.insert(doc).await.map_err(|e| match e {
            StoreError::Duplicate { field } => duplicate(field, &email, &code),
            other => handle_store_error(other, context),
        })?;

        tracing::debug!(id = %user.id, "created user");
        Ok(user)
    }

    /// All users, or those whose name, email or profile name contains `search`
    pub async fn find_many(&self, search: Option<&str>) -> Result<Vec<User>, ServiceError> {
        let term = search.filter(|s| !s.is_empty());
        self.store
            .find_all(term)
            .await
            .map_err(|e| handle_store_error(e, "Error retrieving users"))
    }

    pub async fn find_one(&self, id: &str) -> Result<User, ServiceError> {
        self.load(id, "Error retrieving user").await
    }

    /// Apply a partial update after existence and email uniqueness checks
    pub async fn update(&self, id: &str, changes: UserChanges) -> Result<User, ServiceError> {
        let context = "Error updating user";
        let current = self.load(id, context).await?;

        if changes.is_empty() {
            return Ok(current);
        }

        if let Some(email) = &changes.email {
            let holder = self
                .store
                .find_by_email(email)
                .await
                .map_err(|e| handle_store_error(e, context))?;
            if holder.is_some_and(|other| other.id != current.id) {
                return Err(email_in_use(email));
            }
        }

        let email = changes.email.clone().unwrap_or_default();
        let code = changes
            .profile
            .as_ref()
            .map(|p| p.code.clone())
            .unwrap_or_default();

        let updated = self
            .store
            .update(current.id, &changes)
            .await
            .map_err(|e| match e {
                StoreError::Duplicate { field } => duplicate(field, &email, &code),
                other => handle_store_error(other, context),
            })?;

        // Removed between the existence check and the write
        let user = updated.ok_or_else(|| not_found(id))?;
        tracing::debug!(id = %user.id, "updated user");
        Ok(user)
    }

    pub async fn remove(&self, id: &str) -> Result<(), ServiceError> {
        let context = "Error deleting user";
        let current = self.load(id, context).await?;

        let deleted = self
            .store
            .delete(current.id)
            .await
            .map_err(|e| handle_store_error(e, context))?;

        // Removed between the existence check and the delete
        if !deleted {
            return Err(not_found(id));
        }

        tracing::debug!(id = %current.id, "deleted user");
        Ok(())
    }

    /// Store connectivity for health reporting
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.store.ping().await
    }

    async fn load(&self, id: &str, context: &str) -> Result<User, ServiceError> {
        let uuid = parse_id(id)?;
        self.store
            .find_by_id(uuid)
            .await
            .map_err(|e| handle_store_error(e, context))?
            .ok_or_else(|| not_found(id))
    }
}

fn parse_id(id: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(id).map_err(|_| ServiceError::BadRequest(format!("Invalid ID format: {}", id)))
}

fn not_found(id: &str) -> ServiceError {
    ServiceError::NotFound(format!("User with ID {} not found", id))
}

fn email_in_use(email: &str) -> ServiceError {
    ServiceError::Conflict(format!("Email {} is already in use", email))
}

fn duplicate(field: &str, email: &str, code: &str) -> ServiceError {
    match field {
        "email" => email_in_use(email),
        "profile.code" => ServiceError::Conflict(format!("Profile code {} is already in use", code)),
        other => ServiceError::Conflict(format!("{} is already in use", other)),
    }
}

/// Store failures that are not business errors are logged and downgraded
fn handle_store_error(err: StoreError, context: &str) -> ServiceError {
    match err {
        StoreError::Duplicate { field } => {
            ServiceError::Conflict(format!("{} is already in use", field))
        }
        other => {
            tracing::error!(error = %other, "Database error: {}", context);
            ServiceError::Unavailable
        }
    }
}
