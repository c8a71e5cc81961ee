//! Domain model for a payment method.
use serde::{Deserialize, Serialize};

use crate::domain::ownership::Owned;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub icon: String,
    pub is_default: bool,
}

impl PaymentMethod {
    pub fn generate_id() -> String {
        super::generate_id("payment_method")
    }
}

impl Owned for PaymentMethod {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}
