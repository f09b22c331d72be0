//! Principal database model

use auth_core::{Principal, PrincipalStatus};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the principals table
#[derive(Debug, Clone, FromRow)]
pub struct PrincipalModel {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub status: String,
    pub failed_attempts: i32,
    pub locked_until: Option<DateTime<Utc>>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PrincipalModel> for Principal {
    fn from(model: PrincipalModel) -> Self {
        Self {
            id: model.id,
            email: model.email,
            username: model.username,
            password_hash: model.password_hash,
            status: PrincipalStatus::from_str_or_inactive(&model.status),
            failed_attempts: model.failed_attempts,
            locked_until: model.locked_until,
            last_login_at: model.last_login_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_to_entity() {
        let now = Utc::now();
        let model = PrincipalModel {
            id: 7,
            email: "admin@test.com".to_string(),
            username: "admin".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            status: "active".to_string(),
            failed_attempts: 2,
            locked_until: None,
            last_login_at: Some(now),
            created_at: now,
            updated_at: now,
        };

        let principal = Principal::from(model);
        assert_eq!(principal.id, 7);
        assert_eq!(principal.status, PrincipalStatus::Active);
        assert_eq!(principal.failed_attempts, 2);
        assert!(principal.is_active());
    }

    #[test]
    fn test_unknown_status_maps_to_inactive() {
        let now = Utc::now();
        let model = PrincipalModel {
            id: 7,
            email: "admin@test.com".to_string(),
            username: "admin".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            status: "suspended".to_string(),
            failed_attempts: 0,
            locked_until: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        };

        assert!(!Principal::from(model).is_active());
    }
}
