//! # Domain Module
//!
//! Business logic for the household finance backend.
//!
//! ## Module Organization
//!
//! - **aggregation**: Pure dashboard, report and lifetime statistics
//! - **budget_evaluator**: Pure budget status and alert classification
//! - **lifecycle_service**: Registration, default seeding, account deletion and export
//! - ***_service**: Entity services, one per collection
//! - **ownership**: The single ownership check every owned read and write goes through
//! - **calendar**: Month keys, date parsing and the injectable clock
//!
//! ## Business Rules
//!
//! - Every owned record is visible only to its owner; foreign and missing
//!   records are indistinguishable (`NotFound`)
//! - Budget spending is derived from expenses on every read, never stored
//! - A budget is unique per owner, category and month
//! - A category cannot be deleted while any of its owner's expenses use it
//! - Savings progress never drops below zero
//!
//! Services are generic over the storage [`Connection`](crate::storage::Connection)
//! and take an [`Identity`] produced by [`UserService::authenticate`].

pub mod aggregation;
pub mod budget_evaluator;
pub mod budget_service;
pub mod calendar;
pub mod category_service;
pub mod commands;
pub mod errors;
pub mod expense_service;
pub mod identity;
pub mod lifecycle_service;
pub mod models;
pub mod ownership;
pub mod payment_method_service;
pub mod report_export;
pub mod savings_goal_service;
pub mod user_service;
pub mod validation;

pub use budget_service::BudgetService;
pub use calendar::{Clock, FixedClock, MonthKey, SystemClock};
pub use category_service::CategoryService;
pub use errors::{DomainError, DomainResult, RecordKind};
pub use expense_service::ExpenseService;
pub use identity::Identity;
pub use lifecycle_service::LifecycleService;
pub use payment_method_service::PaymentMethodService;
pub use savings_goal_service::SavingsGoalService;
pub use user_service::UserService;
