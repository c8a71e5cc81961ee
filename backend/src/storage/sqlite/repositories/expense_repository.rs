use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::Expense;
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::ExpenseStorage;

const EXPENSE_COLUMNS: &str =
    "id, user_id, name, amount, category_id, date, payment_method, description, tags, receipt_ref";

/// Repository for expense operations; tags are stored as a JSON array
#[derive(Clone)]
pub struct ExpenseRepository {
    db: DbConnection,
}

impl ExpenseRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn from_row(row: &SqliteRow) -> Result<Expense> {
        let id: String = row.get("id");
        let raw_tags: String = row.get("tags");
        let tags = serde_json::from_str(&raw_tags).with_context(|| format!("Corrupt tags on expense {}", id))?;

        Ok(Expense {
            id,
            user_id: row.get("user_id"),
            name: row.get("name"),
            amount: row.get("amount"),
            category_id: row.get("category_id"),
            date: row.get("date"),
            payment_method: row.get("payment_method"),
            description: row.get("description"),
            tags,
            receipt_ref: row.get("receipt_ref"),
        })
    }

    fn from_rows(rows: &[SqliteRow]) -> Result<Vec<Expense>> {
        rows.iter().map(Self::from_row).collect()
    }
}

#[async_trait]
impl ExpenseStorage for ExpenseRepository {
    async fn store_expense(&self, expense: &Expense) -> Result<()> {
        let tags = serde_json::to_string(&expense.tags)?;
        sqlx::query(
            r#"
            INSERT INTO expenses (id, user_id, name, amount, category_id, date, payment_method, description, tags, receipt_ref)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&expense.id)
        .bind(&expense.user_id)
        .bind(&expense.name)
        .bind(expense.amount)
        .bind(&expense.category_id)
        .bind(&expense.date)
        .bind(&expense.payment_method)
        .bind(&expense.description)
        .bind(tags)
        .bind(&expense.receipt_ref)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>> {
        let row = sqlx::query(&format!("SELECT {} FROM expenses WHERE id = ?", EXPENSE_COLUMNS))
            .bind(expense_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn list_expenses(&self, user_id: &str) -> Result<Vec<Expense>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM expenses WHERE user_id = ? ORDER BY ROWID ASC",
            EXPENSE_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        Self::from_rows(&rows)
    }

    async fn list_expenses_by_category(&self, user_id: &str, category_id: &str) -> Result<Vec<Expense>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM expenses WHERE user_id = ? AND category_id = ? ORDER BY ROWID ASC",
            EXPENSE_COLUMNS
        ))
        .bind(user_id)
        .bind(category_id)
        .fetch_all(self.db.pool())
        .await?;

        Self::from_rows(&rows)
    }

    async fn list_expenses_in_range(&self, user_id: &str, start_date: &str, end_date: &str) -> Result<Vec<Expense>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM expenses WHERE user_id = ? AND date >= ? AND date <= ? ORDER BY ROWID ASC",
            EXPENSE_COLUMNS
        ))
        .bind(user_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(self.db.pool())
        .await?;

        Self::from_rows(&rows)
    }

    async fn update_expense(&self, expense: &Expense) -> Result<()> {
        let tags = serde_json::to_string(&expense.tags)?;
        sqlx::query(
            r#"
            UPDATE expenses
            SET name = ?, amount = ?, category_id = ?, date = ?, payment_method = ?,
                description = ?, tags = ?, receipt_ref = ?
            WHERE id = ?
            "#,
        )
        .bind(&expense.name)
        .bind(expense.amount)
        .bind(&expense.category_id)
        .bind(&expense.date)
        .bind(&expense.payment_method)
        .bind(&expense.description)
        .bind(tags)
        .bind(&expense.receipt_ref)
        .bind(&expense.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(expense_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(id: &str, user_id: &str, category_id: &str, date: &str) -> Expense {
        Expense {
            id: id.to_string(),
            user_id: user_id.to_string(),
            name: "Lunch".to_string(),
            amount: 25.5,
            category_id: category_id.to_string(),
            date: date.to_string(),
            payment_method: "Cash".to_string(),
            description: Some("with team".to_string()),
            tags: vec!["work".to_string(), "food".to_string()],
            receipt_ref: None,
        }
    }

    #[tokio::test]
    async fn test_tags_survive_storage() {
        let repo = ExpenseRepository::new(DbConnection::init_test().await.unwrap());
        let stored = expense("expense::1", "user::1", "category::1", "2024-01-05");
        repo.store_expense(&stored).await.unwrap();

        let loaded = repo.get_expense("expense::1").await.unwrap().unwrap();
        assert_eq!(loaded, stored);
    }

    #[tokio::test]
    async fn test_filtered_listings() {
        let repo = ExpenseRepository::new(DbConnection::init_test().await.unwrap());
        repo.store_expense(&expense("expense::1", "user::1", "category::1", "2024-01-05")).await.unwrap();
        repo.store_expense(&expense("expense::2", "user::1", "category::2", "2024-01-31")).await.unwrap();
        repo.store_expense(&expense("expense::3", "user::1", "category::1", "2024-02-01")).await.unwrap();
        repo.store_expense(&expense("expense::4", "user::2", "category::1", "2024-01-10")).await.unwrap();

        assert_eq!(repo.list_expenses("user::1").await.unwrap().len(), 3);

        let in_category = repo.list_expenses_by_category("user::1", "category::1").await.unwrap();
        let ids: Vec<&str> = in_category.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["expense::1", "expense::3"]);

        let january = repo
            .list_expenses_in_range("user::1", "2024-01-01", "2024-01-31")
            .await
            .unwrap();
        assert_eq!(january.len(), 2);
    }

    #[tokio::test]
    async fn test_update_and_delete_expense() {
        let repo = ExpenseRepository::new(DbConnection::init_test().await.unwrap());
        let mut stored = expense("expense::1", "user::1", "category::1", "2024-01-05");
        repo.store_expense(&stored).await.unwrap();

        stored.amount = 30.0;
        stored.tags.clear();
        repo.update_expense(&stored).await.unwrap();
        assert_eq!(repo.get_expense("expense::1").await.unwrap().unwrap(), stored);

        assert!(repo.delete_expense("expense::1").await.unwrap());
        assert!(repo.get_expense("expense::1").await.unwrap().is_none());
    }
}
