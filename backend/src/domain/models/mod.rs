//! Domain models for the household finance backend.
//!
//! These are the stored entities. Every owned entity carries the id of the
//! user it belongs to; that field never leaves the backend.

pub mod budget;
pub mod category;
pub mod expense;
pub mod payment_method;
pub mod savings_goal;
pub mod user;

pub use budget::Budget;
pub use category::{Category, CategoryPatch};
pub use expense::{Expense, ExpensePatch};
pub use payment_method::PaymentMethod;
pub use savings_goal::{SavingsGoal, SavingsGoalPatch};
pub use user::{User, UserProfile};

/// Generate a new record id of the form `<kind>::<uuid>`
pub fn generate_id(kind: &str) -> String {
    format!("{}::{}", kind, uuid::Uuid::new_v4())
}
