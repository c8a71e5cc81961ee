use anyhow::Result;
use async_trait::async_trait;
use sqlx::Row;

use crate::domain::models::PaymentMethod;
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::PaymentMethodStorage;

/// Repository for payment method operations
#[derive(Clone)]
pub struct PaymentMethodRepository {
    db: DbConnection,
}

impl PaymentMethodRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentMethodStorage for PaymentMethodRepository {
    async fn store_payment_method(&self, payment_method: &PaymentMethod) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO payment_methods (id, user_id, name, icon, is_default)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&payment_method.id)
        .bind(&payment_method.user_id)
        .bind(&payment_method.name)
        .bind(&payment_method.icon)
        .bind(payment_method.is_default)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn list_payment_methods(&self, user_id: &str) -> Result<Vec<PaymentMethod>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, name, icon, is_default
            FROM payment_methods
            WHERE user_id = ?
            ORDER BY ROWID ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        let payment_methods = rows
            .iter()
            .map(|row| PaymentMethod {
                id: row.get("id"),
                user_id: row.get("user_id"),
                name: row.get("name"),
                icon: row.get("icon"),
                is_default: row.get("is_default"),
            })
            .collect();

        Ok(payment_methods)
    }

    async fn delete_payment_method(&self, payment_method_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM payment_methods WHERE id = ?")
            .bind(payment_method_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
