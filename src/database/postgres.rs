use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::database::models::{User, UserChanges, UserDocument, UserRow};
use crate::database::store::{StoreError, UserStore};

const EMAIL_INDEX: &str = "users_email_key";
const PROFILE_CODE_INDEX: &str = "users_profile_code_key";

/// Users collection stored as JSONB documents in a single postgres table
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the collection table and its unique indexes if missing
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (
                id UUID PRIMARY KEY,
                doc JSONB NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(&format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS {} ON users ((doc->>'email'))",
            EMAIL_INDEX
        ))
        .execute(&self.pool)
        .await?;

        sqlx::query(&format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS {} ON users ((doc->'profile'->>'code'))",
            PROFILE_CODE_INDEX
        ))
        .execute(&self.pool)
        .await?;

        tracing::info!("users collection ready");
        Ok(())
    }
}

/// Map unique index violations onto the document field they guard
fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some(EMAIL_INDEX) => return StoreError::Duplicate { field: "email" },
                Some(PROFILE_CODE_INDEX) => return StoreError::Duplicate { field: "profile.code" },
                _ => {}
            }
        }
    }
    StoreError::Database(err)
}

/// `%term%` with LIKE metacharacters escaped
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, doc: UserDocument) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (id, doc) VALUES ($1, $2) RETURNING id, doc",
        )
        .bind(Uuid::new_v4())
        .bind(Json(&doc))
        .fetch_one(&self.pool)
        .await
        .map_err(classify)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT id, doc FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, doc FROM users WHERE doc->>'email' = $1 LIMIT 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_all(&self, term: Option<&str>) -> Result<Vec<User>, StoreError> {
        let rows = match term {
            Some(term) => {
                sqlx::query_as::<_, UserRow>(
                    "SELECT id, doc FROM users
                     WHERE doc->>'name' ILIKE $1
                        OR doc->>'email' ILIKE $1
                        OR doc->'profile'->>'profileName' ILIKE $1",
                )
                .bind(like_pattern(term))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, UserRow>("SELECT id, doc FROM users")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn update(&self, id: Uuid, changes: &UserChanges) -> Result<Option<User>, StoreError> {
        // Top-level merge: a supplied profile replaces the stored one
        let row = sqlx::query_as::<_, UserRow>(
            "UPDATE users SET doc = doc || $2 WHERE id = $1 RETURNING id, doc",
        )
        .bind(id)
        .bind(Json(changes))
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        Ok(row.map(User::from))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
