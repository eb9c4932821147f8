//! User Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{User, UserCreate, UserRole, UserUpdate};
use crate::utils::time::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all users
    pub async fn find_all(&self) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user ORDER BY email")
            .await?
            .take(0)?;
        Ok(users)
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let thing = BaseRepository::parse_id(id, TABLE)?;
        let user: Option<User> = self.base.db().select(thing).await?;
        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email_owned = email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email_owned))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a new user
    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        // Check duplicate email
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already in use",
                data.email
            )));
        }

        // Hash password
        let hash_password = User::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let role = data.role.unwrap_or(UserRole::Customer);

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE user SET
                    email = $email,
                    hash_password = $hash_password,
                    role = $role,
                    is_active = true,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("email", data.email))
            .bind(("hash_password", hash_password))
            .bind(("role", role))
            .bind(("created_at", now_millis()))
            .await?;

        let created: Option<User> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Update a user (email and/or password)
    pub async fn update(&self, id: &str, data: UserUpdate) -> RepoResult<User> {
        let thing = BaseRepository::parse_id(id, TABLE)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))?;

        // Check the new email is not taken by another user
        if let Some(ref email) = data.email
            && let Some(found) = self.find_by_email(email).await?
            && found.id != existing.id
        {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already in use",
                email
            )));
        }

        let email = data.email.unwrap_or(existing.email);
        let hash_password = match data.password {
            Some(password) => User::hash_password(&password)
                .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?,
            None => existing.hash_password,
        };

        self.base
            .db()
            .query("UPDATE $thing SET email = $email, hash_password = $hash_password")
            .bind(("thing", thing))
            .bind(("email", email))
            .bind(("hash_password", hash_password))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Mark a user inactive (login is refused, record stays)
    pub async fn disable(&self, id: &str) -> RepoResult<User> {
        let thing = BaseRepository::parse_id(id, TABLE)?;
        self.base
            .db()
            .query("UPDATE $thing SET is_active = false")
            .bind(("thing", thing))
            .await?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Hard delete a user record
    ///
    /// Reservation detachment is the booking layer's job; callers run the
    /// cascade first (see `UserService::delete`).
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = BaseRepository::parse_id(id, TABLE)?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }

    /// Upsert a user from an OAuth2 profile (no local password)
    ///
    /// OAuth accounts get an unusable random password hash so the
    /// password-login path can never match them by accident.
    pub async fn upsert_oauth(&self, email: &str) -> RepoResult<User> {
        if let Some(existing) = self.find_by_email(email).await? {
            return Ok(existing);
        }

        let random_secret = uuid::Uuid::new_v4().to_string();
        let hash_password = User::hash_password(&random_secret)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE user SET
                    email = $email,
                    hash_password = $hash_password,
                    role = $role,
                    is_active = true,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("email", email.to_string()))
            .bind(("hash_password", hash_password))
            .bind(("role", UserRole::Customer))
            .bind(("created_at", now_millis()))
            .await?;

        let created: Option<User> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// RecordId helper for cross-repo queries
    pub fn record_id(id: &str) -> RepoResult<RecordId> {
        BaseRepository::parse_id(id, TABLE)
    }
}
