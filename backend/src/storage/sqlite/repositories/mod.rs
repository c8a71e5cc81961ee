pub mod budget_repository;
pub mod category_repository;
pub mod expense_repository;
pub mod payment_method_repository;
pub mod profile_repository;
pub mod savings_goal_repository;
pub mod user_repository;

pub use budget_repository::BudgetRepository;
pub use category_repository::CategoryRepository;
pub use expense_repository::ExpenseRepository;
pub use payment_method_repository::PaymentMethodRepository;
pub use profile_repository::ProfileRepository;
pub use savings_goal_repository::SavingsGoalRepository;
pub use user_repository::UserRepository;
