//! User Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// User ID type
pub type UserId = RecordId;

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Staff,
    Customer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Staff => "staff",
            UserRole::Customer => "customer",
        }
    }

    /// 角色的静态权限表
    ///
    /// admin 在 `CurrentUser::has_permission` 中直接放行，
    /// 这里仍返回 "all" 便于令牌内容自描述。
    pub fn permissions(&self) -> Vec<String> {
        let perms: &[&str] = match self {
            UserRole::Admin => &["all"],
            UserRole::Staff => &[
                "tables:*",
                "menus:*",
                "menu-items:*",
                "reservations:*",
                "bills:*",
                "transactions:*",
                "users:read",
            ],
            UserRole::Customer => &[
                "menus:read",
                "menu-items:read",
                "tables:read",
                "reservations:read",
                "reservations:manage",
            ],
        };
        perms.iter().map(|p| p.to_string()).collect()
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "staff" => Ok(UserRole::Staff),
            "customer" => Ok(UserRole::Customer),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// User model matching SurrealDB schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<UserId>,
    pub email: String,
    #[serde(skip_serializing)]
    pub hash_password: String,
    pub role: UserRole,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    /// Unix millis
    #[serde(default)]
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

/// Create user payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserCreate {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
    /// Defaults to customer; only admins may assign elevated roles (handler-enforced)
    pub role: Option<UserRole>,
}

/// Update user payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserUpdate {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: Option<String>,
}

impl User {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_password)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = User::hash_password("correct horse battery").unwrap();
        let user = User {
            id: None,
            email: "a@b.com".into(),
            hash_password: hash,
            role: UserRole::Customer,
            is_active: true,
            created_at: 0,
        };
        assert!(user.verify_password("correct horse battery").unwrap());
        assert!(!user.verify_password("wrong").unwrap());
    }

    #[test]
    fn test_user_create_validation() {
        let ok = UserCreate {
            email: "guest@example.com".into(),
            password: "longenough".into(),
            role: None,
        };
        assert!(ok.validate().is_ok());

        let bad_email = UserCreate {
            email: "not-an-email".into(),
            password: "longenough".into(),
            role: None,
        };
        assert!(bad_email.validate().is_err());

        let short_password = UserCreate {
            email: "guest@example.com".into(),
            password: "short".into(),
            role: None,
        };
        assert!(short_password.validate().is_err());
    }
}
