//! Domain model for a recorded expense.
use serde::{Deserialize, Serialize};

use crate::domain::ownership::Owned;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub amount: f64,
    pub category_id: String,
    /// Calendar day, YYYY-MM-DD. Lexicographic order is date order.
    pub date: String,
    /// Free-form payment method name, matched by name rather than id
    pub payment_method: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub receipt_ref: Option<String>,
}

impl Expense {
    pub fn generate_id() -> String {
        super::generate_id("expense")
    }

    /// The YYYY-MM bucket this expense falls into
    pub fn month_bucket(&self) -> &str {
        self.date.get(..7).unwrap_or(&self.date)
    }

    /// Apply a partial update, leaving absent fields untouched
    pub fn apply(&mut self, patch: ExpensePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(payment_method) = patch.payment_method {
            self.payment_method = payment_method;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(receipt_ref) = patch.receipt_ref {
            self.receipt_ref = Some(receipt_ref);
        }
    }
}

impl Owned for Expense {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpensePatch {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub category_id: Option<String>,
    pub date: Option<String>,
    pub payment_method: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub receipt_ref: Option<String>,
}
