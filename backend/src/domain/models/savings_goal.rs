//! Domain model for a savings goal.
use serde::{Deserialize, Serialize};

use crate::domain::ownership::Owned;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: String,
    pub description: Option<String>,
}

impl SavingsGoal {
    pub fn generate_id() -> String {
        super::generate_id("savings_goal")
    }

    /// Add a signed delta to the saved amount, never going below zero
    pub fn adjust_progress(&mut self, delta: f64) {
        self.current_amount = (self.current_amount + delta).max(0.0);
    }

    pub fn apply(&mut self, patch: SavingsGoalPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(target_amount) = patch.target_amount {
            self.target_amount = target_amount;
        }
        if let Some(target_date) = patch.target_date {
            self.target_date = target_date;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
    }
}

impl Owned for SavingsGoal {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SavingsGoalPatch {
    pub name: Option<String>,
    pub target_amount: Option<f64>,
    pub target_date: Option<String>,
    pub description: Option<String>,
}
