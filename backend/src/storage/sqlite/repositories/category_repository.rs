use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::Category;
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::CategoryStorage;

/// Repository for category operations
#[derive(Clone)]
pub struct CategoryRepository {
    db: DbConnection,
}

impl CategoryRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn from_row(row: &SqliteRow) -> Category {
        Category {
            id: row.get("id"),
            user_id: row.get("user_id"),
            name: row.get("name"),
            icon: row.get("icon"),
            color: row.get("color"),
            is_default: row.get("is_default"),
        }
    }
}

#[async_trait]
impl CategoryStorage for CategoryRepository {
    async fn store_category(&self, category: &Category) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO categories (id, user_id, name, icon, color, is_default)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&category.id)
        .bind(&category.user_id)
        .bind(&category.name)
        .bind(&category.icon)
        .bind(&category.color)
        .bind(category.is_default)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_category(&self, category_id: &str) -> Result<Option<Category>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, name, icon, color, is_default
            FROM categories
            WHERE id = ?
            "#,
        )
        .bind(category_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::from_row))
    }

    async fn list_categories(&self, user_id: &str) -> Result<Vec<Category>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, name, icon, color, is_default
            FROM categories
            WHERE user_id = ?
            ORDER BY ROWID ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::from_row).collect())
    }

    async fn update_category(&self, category: &Category) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE categories
            SET name = ?, icon = ?, color = ?
            WHERE id = ?
            "#,
        )
        .bind(&category.name)
        .bind(&category.icon)
        .bind(&category.color)
        .bind(&category.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_category(&self, category_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(category_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str, user_id: &str, name: &str) -> Category {
        Category {
            id: id.to_string(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            icon: "🍽️".to_string(),
            color: "#FF6B6B".to_string(),
            is_default: true,
        }
    }

    #[tokio::test]
    async fn test_list_is_scoped_and_ordered_by_insertion() {
        let repo = CategoryRepository::new(DbConnection::init_test().await.unwrap());
        repo.store_category(&category("category::b", "user::1", "Transport")).await.unwrap();
        repo.store_category(&category("category::a", "user::1", "Food")).await.unwrap();
        repo.store_category(&category("category::c", "user::2", "Other")).await.unwrap();

        let listed = repo.list_categories("user::1").await.unwrap();
        let names: Vec<&str> = listed.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Transport", "Food"]);
        assert!(listed.iter().all(|c| c.is_default));
    }

    #[tokio::test]
    async fn test_update_and_delete_category() {
        let repo = CategoryRepository::new(DbConnection::init_test().await.unwrap());
        let mut stored = category("category::1", "user::1", "Food");
        repo.store_category(&stored).await.unwrap();

        stored.name = "Groceries".to_string();
        stored.color = "#00FF00".to_string();
        repo.update_category(&stored).await.unwrap();
        assert_eq!(repo.get_category("category::1").await.unwrap().unwrap(), stored);

        assert!(repo.delete_category("category::1").await.unwrap());
        assert!(repo.get_category("category::1").await.unwrap().is_none());
    }
}
