use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::models::{User, UserChanges, UserDocument};
use crate::database::store::{StoreError, UserStore};

/// In-process users collection with the same uniqueness rules as the
/// postgres indexes. Insertion order is the native order.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks `candidate` against every record except `skip`
    fn check_unique(users: &[User], candidate: &User, skip: Option<Uuid>) -> Result<(), StoreError> {
        for other in users.iter().filter(|u| Some(u.id) != skip) {
            if other.email == candidate.email {
                return Err(StoreError::Duplicate { field: "email" });
            }
            if other.profile.code == candidate.profile.code {
                return Err(StoreError::Duplicate { field: "profile.code" });
            }
        }
        Ok(())
    }
}

fn matches(user: &User, needle: &str) -> bool {
    [&user.name, &user.email, &user.profile.profile_name]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, doc: UserDocument) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        let user = doc.with_id(Uuid::new_v4());
        Self::check_unique(&users, &user, None)?;
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_all(&self, term: Option<&str>) -> Result<Vec<User>, StoreError> {
        let users = self.users.read().await;
        Ok(match term {
            Some(term) => {
                let needle = term.to_lowercase();
                users.iter().filter(|u| matches(u, &needle)).cloned().collect()
            }
            None => users.clone(),
        })
    }

    async fn update(&self, id: Uuid, changes: &UserChanges) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().await;
        let Some(index) = users.iter().position(|u| u.id == id) else {
            return Ok(None);
        };

        let mut updated = users[index].clone();
        changes.apply_to(&mut updated);
        Self::check_unique(&users, &updated, Some(id))?;
        users[index] = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() != before)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
