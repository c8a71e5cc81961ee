use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::Row;

use crate::domain::models::UserProfile;
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::ProfileStorage;

/// Repository for user profiles; preferences are stored as JSON
#[derive(Clone)]
pub struct ProfileRepository {
    db: DbConnection,
}

impl ProfileRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileStorage for ProfileRepository {
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        let row = sqlx::query(
            r#"
            SELECT user_id, preferences
            FROM user_profiles
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => {
                let raw: String = r.get("preferences");
                let preferences = serde_json::from_str(&raw)
                    .with_context(|| format!("Corrupt preferences for user {}", user_id))?;
                Ok(Some(UserProfile {
                    user_id: r.get("user_id"),
                    preferences,
                }))
            }
            None => Ok(None),
        }
    }

    async fn upsert_profile(&self, profile: &UserProfile) -> Result<()> {
        let preferences = serde_json::to_string(&profile.preferences)?;
        sqlx::query(
            r#"
            INSERT INTO user_profiles (user_id, preferences)
            VALUES (?, ?)
            ON CONFLICT(user_id) DO UPDATE SET preferences = excluded.preferences
            "#,
        )
        .bind(&profile.user_id)
        .bind(preferences)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_profile(&self, user_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM user_profiles WHERE user_id = ?")
            .bind(user_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
