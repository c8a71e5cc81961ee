//! # Storage Module
//!
//! Persistence for users, profiles, categories, payment methods, expenses,
//! budgets and savings goals. The domain layer only sees the traits in
//! [`traits`]; [`sqlite`] provides the implementation used by the server.

pub mod sqlite;
pub mod traits;

pub use sqlite::DbConnection;
pub use traits::{
    BudgetStorage, CategoryStorage, Connection, ExpenseStorage, PaymentMethodStorage, ProfileStorage,
    SavingsGoalStorage, UserStorage,
};
