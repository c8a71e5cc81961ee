use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::User;
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::UserStorage;

/// Repository for identity records
#[derive(Clone)]
pub struct UserRepository {
    db: DbConnection,
}

impl UserRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn from_row(row: &SqliteRow) -> User {
        User {
            id: row.get("id"),
            name: row.get("name"),
            email: row.get("email"),
            phone: row.get("phone"),
            created_at: row.get("created_at"),
        }
    }
}

#[async_trait]
impl UserStorage for UserRepository {
    async fn store_user(&self, user: &User) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, name, email, phone, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.created_at)
        .execute(self.db.pool())
        .await;

        match result {
            Ok(_) => Ok(true),
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, phone, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::from_row))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, phone, created_at
            FROM users
            WHERE email = ?
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::from_row))
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET name = ?, email = ?, phone = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_user(&self, user_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, email: &str) -> User {
        User {
            id: id.to_string(),
            name: "Ana".to_string(),
            email: email.to_string(),
            phone: None,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_store_find_and_delete_user() {
        let repo = UserRepository::new(DbConnection::init_test().await.unwrap());
        assert!(repo.store_user(&user("user::1", "ana@example.com")).await.unwrap());
        assert!(!repo.store_user(&user("user::2", "ana@example.com")).await.unwrap());

        let by_email = repo.find_user_by_email("ana@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, "user::1");
        assert!(repo.find_user_by_email("bob@example.com").await.unwrap().is_none());

        assert!(repo.delete_user("user::1").await.unwrap());
        assert!(!repo.delete_user("user::1").await.unwrap());
        assert!(repo.get_user("user::1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_user() {
        let repo = UserRepository::new(DbConnection::init_test().await.unwrap());
        let mut stored = user("user::1", "ana@example.com");
        repo.store_user(&stored).await.unwrap();

        stored.name = "Ana Maria".to_string();
        stored.phone = Some("+55 11 99999-0000".to_string());
        repo.update_user(&stored).await.unwrap();

        let loaded = repo.get_user("user::1").await.unwrap().unwrap();
        assert_eq!(loaded, stored);
    }
}
