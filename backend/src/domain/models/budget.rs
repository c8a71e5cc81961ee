//! Domain model for a monthly category budget.
use serde::{Deserialize, Serialize};

use crate::domain::ownership::Owned;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    /// Month bucket, YYYY-MM
    pub month_year: String,
    pub limit: f64,
}

impl Budget {
    pub fn generate_id() -> String {
        super::generate_id("budget")
    }
}

impl Owned for Budget {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}
