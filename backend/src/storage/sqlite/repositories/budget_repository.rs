use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::Budget;
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::BudgetStorage;

/// Repository for budget operations.
///
/// `limit` is a reserved word in SQL, so the column is `budget_limit`.
#[derive(Clone)]
pub struct BudgetRepository {
    db: DbConnection,
}

impl BudgetRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn from_row(row: &SqliteRow) -> Budget {
        Budget {
            id: row.get("id"),
            user_id: row.get("user_id"),
            category_id: row.get("category_id"),
            month_year: row.get("month_year"),
            limit: row.get("budget_limit"),
        }
    }
}

#[async_trait]
impl BudgetStorage for BudgetRepository {
    async fn store_budget(&self, budget: &Budget) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO budgets (id, user_id, category_id, month_year, budget_limit)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&budget.id)
        .bind(&budget.user_id)
        .bind(&budget.category_id)
        .bind(&budget.month_year)
        .bind(budget.limit)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_budget(&self, budget_id: &str) -> Result<Option<Budget>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, category_id, month_year, budget_limit
            FROM budgets
            WHERE id = ?
            "#,
        )
        .bind(budget_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::from_row))
    }

    async fn list_budgets(&self, user_id: &str) -> Result<Vec<Budget>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, category_id, month_year, budget_limit
            FROM budgets
            WHERE user_id = ?
            ORDER BY ROWID ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::from_row).collect())
    }

    async fn list_budgets_for_month(&self, user_id: &str, month_year: &str) -> Result<Vec<Budget>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, category_id, month_year, budget_limit
            FROM budgets
            WHERE user_id = ? AND month_year = ?
            ORDER BY ROWID ASC
            "#,
        )
        .bind(user_id)
        .bind(month_year)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::from_row).collect())
    }

    async fn find_budget(&self, user_id: &str, category_id: &str, month_year: &str) -> Result<Option<Budget>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, category_id, month_year, budget_limit
            FROM budgets
            WHERE user_id = ? AND category_id = ? AND month_year = ?
            ORDER BY ROWID ASC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(category_id)
        .bind(month_year)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::from_row))
    }

    async fn update_budget(&self, budget: &Budget) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE budgets
            SET category_id = ?, month_year = ?, budget_limit = ?
            WHERE id = ?
            "#,
        )
        .bind(&budget.category_id)
        .bind(&budget.month_year)
        .bind(budget.limit)
        .bind(&budget.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_budget(&self, budget_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM budgets WHERE id = ?")
            .bind(budget_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
