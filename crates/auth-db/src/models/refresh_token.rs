//! Refresh token database model

use auth_core::RefreshTokenRecord;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the refresh_tokens table
#[derive(Debug, Clone, FromRow)]
pub struct RefreshTokenModel {
    pub id: i64,
    pub owner_id: i64,
    pub token_fingerprint: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub superseded_by: Option<i64>,
}

impl From<RefreshTokenModel> for RefreshTokenRecord {
    fn from(model: RefreshTokenModel) -> Self {
        Self {
            id: model.id,
            owner_id: model.owner_id,
            token_fingerprint: model.token_fingerprint,
            issued_at: model.issued_at,
            expires_at: model.expires_at,
            revoked_at: model.revoked_at,
            superseded_by: model.superseded_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_model_to_record() {
        let now = Utc::now();
        let model = RefreshTokenModel {
            id: 3,
            owner_id: 42,
            token_fingerprint: "fp".to_string(),
            issued_at: now,
            expires_at: now + Duration::days(7),
            revoked_at: None,
            superseded_by: None,
        };

        let record = RefreshTokenRecord::from(model);
        assert_eq!(record.id, 3);
        assert_eq!(record.owner_id, 42);
        assert!(record.is_valid());
    }
}
