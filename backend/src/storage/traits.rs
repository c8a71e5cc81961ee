//! # Storage Traits
//!
//! Storage abstraction used by the domain layer. Repositories return domain
//! models and `anyhow::Result`; they perform no ownership checks, which stay
//! in the domain services.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{Budget, Category, Expense, PaymentMethod, SavingsGoal, User, UserProfile};

/// Identity records
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Returns false if a user with the same id or email already exists
    async fn store_user(&self, user: &User) -> Result<bool>;

    async fn get_user(&self, user_id: &str) -> Result<Option<User>>;

    /// Look up a user by normalised email
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Update name, email and phone of an existing user
    async fn update_user(&self, user: &User) -> Result<()>;

    /// Returns true if the user was found and deleted
    async fn delete_user(&self, user_id: &str) -> Result<bool>;
}

/// At most one profile per user
#[async_trait]
pub trait ProfileStorage: Send + Sync {
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>>;

    /// Insert or replace the user's profile
    async fn upsert_profile(&self, profile: &UserProfile) -> Result<()>;

    async fn delete_profile(&self, user_id: &str) -> Result<bool>;
}

#[async_trait]
pub trait CategoryStorage: Send + Sync {
    async fn store_category(&self, category: &Category) -> Result<()>;

    async fn get_category(&self, category_id: &str) -> Result<Option<Category>>;

    /// All categories of a user in insertion order
    async fn list_categories(&self, user_id: &str) -> Result<Vec<Category>>;

    async fn update_category(&self, category: &Category) -> Result<()>;

    async fn delete_category(&self, category_id: &str) -> Result<bool>;
}

#[async_trait]
pub trait PaymentMethodStorage: Send + Sync {
    async fn store_payment_method(&self, payment_method: &PaymentMethod) -> Result<()>;

    /// All payment methods of a user in insertion order
    async fn list_payment_methods(&self, user_id: &str) -> Result<Vec<PaymentMethod>>;

    async fn delete_payment_method(&self, payment_method_id: &str) -> Result<bool>;
}

#[async_trait]
pub trait ExpenseStorage: Send + Sync {
    async fn store_expense(&self, expense: &Expense) -> Result<()>;

    async fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>>;

    /// All expenses of a user in insertion order
    async fn list_expenses(&self, user_id: &str) -> Result<Vec<Expense>>;

    /// A user's expenses in one category, in insertion order
    async fn list_expenses_by_category(&self, user_id: &str, category_id: &str) -> Result<Vec<Expense>>;

    /// A user's expenses with `start <= date <= end`, in insertion order
    async fn list_expenses_in_range(&self, user_id: &str, start_date: &str, end_date: &str) -> Result<Vec<Expense>>;

    async fn update_expense(&self, expense: &Expense) -> Result<()>;

    async fn delete_expense(&self, expense_id: &str) -> Result<bool>;
}

#[async_trait]
pub trait BudgetStorage: Send + Sync {
    async fn store_budget(&self, budget: &Budget) -> Result<()>;

    async fn get_budget(&self, budget_id: &str) -> Result<Option<Budget>>;

    /// All budgets of a user in insertion order
    async fn list_budgets(&self, user_id: &str) -> Result<Vec<Budget>>;

    /// A user's budgets for one YYYY-MM month
    async fn list_budgets_for_month(&self, user_id: &str, month_year: &str) -> Result<Vec<Budget>>;

    /// The user's budget for a category and month, if one exists
    async fn find_budget(&self, user_id: &str, category_id: &str, month_year: &str) -> Result<Option<Budget>>;

    async fn update_budget(&self, budget: &Budget) -> Result<()>;

    async fn delete_budget(&self, budget_id: &str) -> Result<bool>;
}

#[async_trait]
pub trait SavingsGoalStorage: Send + Sync {
    async fn store_savings_goal(&self, goal: &SavingsGoal) -> Result<()>;

    async fn get_savings_goal(&self, goal_id: &str) -> Result<Option<SavingsGoal>>;

    /// All savings goals of a user in insertion order
    async fn list_savings_goals(&self, user_id: &str) -> Result<Vec<SavingsGoal>>;

    async fn update_savings_goal(&self, goal: &SavingsGoal) -> Result<()>;

    async fn delete_savings_goal(&self, goal_id: &str) -> Result<bool>;
}

/// A storage backend able to hand out one repository per collection
pub trait Connection: Send + Sync + Clone + 'static {
    type UserRepository: UserStorage + Clone;
    type ProfileRepository: ProfileStorage + Clone;
    type CategoryRepository: CategoryStorage + Clone;
    type PaymentMethodRepository: PaymentMethodStorage + Clone;
    type ExpenseRepository: ExpenseStorage + Clone;
    type BudgetRepository: BudgetStorage + Clone;
    type SavingsGoalRepository: SavingsGoalStorage + Clone;

    fn create_user_repository(&self) -> Self::UserRepository;
    fn create_profile_repository(&self) -> Self::ProfileRepository;
    fn create_category_repository(&self) -> Self::CategoryRepository;
    fn create_payment_method_repository(&self) -> Self::PaymentMethodRepository;
    fn create_expense_repository(&self) -> Self::ExpenseRepository;
    fn create_budget_repository(&self) -> Self::BudgetRepository;
    fn create_savings_goal_repository(&self) -> Self::SavingsGoalRepository;
}
