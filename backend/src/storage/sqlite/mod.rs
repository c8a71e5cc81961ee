//! # SQLite Storage Module
//!
//! SQLite implementations of the storage traits.
//!
//! - **connection.rs** - pool management and schema setup
//! - **repositories/** - one repository per collection

pub mod connection;
pub mod repositories;

pub use connection::DbConnection;
pub use repositories::{
    BudgetRepository, CategoryRepository, ExpenseRepository, PaymentMethodRepository, ProfileRepository,
    SavingsGoalRepository, UserRepository,
};
