use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::SavingsGoal;
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::SavingsGoalStorage;

/// Repository for savings goal operations
#[derive(Clone)]
pub struct SavingsGoalRepository {
    db: DbConnection,
}

impl SavingsGoalRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn from_row(row: &SqliteRow) -> SavingsGoal {
        SavingsGoal {
            id: row.get("id"),
            user_id: row.get("user_id"),
            name: row.get("name"),
            target_amount: row.get("target_amount"),
            current_amount: row.get("current_amount"),
            target_date: row.get("target_date"),
            description: row.get("description"),
        }
    }
}

#[async_trait]
impl SavingsGoalStorage for SavingsGoalRepository {
    async fn store_savings_goal(&self, goal: &SavingsGoal) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO savings_goals (id, user_id, name, target_amount, current_amount, target_date, description)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&goal.id)
        .bind(&goal.user_id)
        .bind(&goal.name)
        .bind(goal.target_amount)
        .bind(goal.current_amount)
        .bind(&goal.target_date)
        .bind(&goal.description)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_savings_goal(&self, goal_id: &str) -> Result<Option<SavingsGoal>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, name, target_amount, current_amount, target_date, description
            FROM savings_goals
            WHERE id = ?
            "#,
        )
        .bind(goal_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::from_row))
    }

    async fn list_savings_goals(&self, user_id: &str) -> Result<Vec<SavingsGoal>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, name, target_amount, current_amount, target_date, description
            FROM savings_goals
            WHERE user_id = ?
            ORDER BY ROWID ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::from_row).collect())
    }

    async fn update_savings_goal(&self, goal: &SavingsGoal) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE savings_goals
            SET name = ?, target_amount = ?, current_amount = ?, target_date = ?, description = ?
            WHERE id = ?
            "#,
        )
        .bind(&goal.name)
        .bind(goal.target_amount)
        .bind(goal.current_amount)
        .bind(&goal.target_date)
        .bind(&goal.description)
        .bind(&goal.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_savings_goal(&self, goal_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM savings_goals WHERE id = ?")
            .bind(goal_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_goal_lifecycle() {
        let repo = SavingsGoalRepository::new(DbConnection::init_test().await.unwrap());
        let mut goal = SavingsGoal {
            id: "savings_goal::1".to_string(),
            user_id: "user::1".to_string(),
            name: "Emergency fund".to_string(),
            target_amount: 5000.0,
            current_amount: 0.0,
            target_date: "2025-06-30".to_string(),
            description: None,
        };
        repo.store_savings_goal(&goal).await.unwrap();

        goal.current_amount = 1200.0;
        goal.description = Some("six months of rent".to_string());
        repo.update_savings_goal(&goal).await.unwrap();

        let listed = repo.list_savings_goals("user::1").await.unwrap();
        assert_eq!(listed, vec![goal]);

        assert!(repo.delete_savings_goal("savings_goal::1").await.unwrap());
        assert!(repo.get_savings_goal("savings_goal::1").await.unwrap().is_none());
    }
}
