//! Conversions between domain types and the `shared` wire DTOs.
//!
//! Owner ids never cross this boundary: every `to_dto` drops `user_id`.

pub mod budget_mapper;
pub mod category_mapper;
pub mod expense_mapper;
pub mod payment_method_mapper;
pub mod savings_goal_mapper;
pub mod user_mapper;
