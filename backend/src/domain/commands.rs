//! Domain-level command and query types.
//!
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the public DTOs defined in
//! the `shared` crate to these internal types.

pub mod categories {
    use crate::domain::models::CategoryPatch;

    /// Input for creating a user-defined category.
    #[derive(Debug, Clone)]
    pub struct AddCategoryCommand {
        pub name: String,
        pub icon: String,
        pub color: String,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateCategoryCommand {
        pub category_id: String,
        pub patch: CategoryPatch,
    }
}

pub mod payment_methods {
    #[derive(Debug, Clone)]
    pub struct AddPaymentMethodCommand {
        pub name: String,
        pub icon: String,
    }
}

pub mod expenses {
    use crate::domain::models::{Category, Expense, ExpensePatch};

    /// Optional filters for listing expenses. Date bounds are inclusive.
    #[derive(Debug, Clone, Default)]
    pub struct ExpenseListQuery {
        pub start_date: Option<String>,
        pub end_date: Option<String>,
        pub category_id: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct AddExpenseCommand {
        pub name: String,
        pub amount: f64,
        pub category_id: String,
        pub date: String,
        pub payment_method: String,
        pub description: Option<String>,
        pub tags: Vec<String>,
        pub receipt_ref: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateExpenseCommand {
        pub expense_id: String,
        pub patch: ExpensePatch,
    }

    /// Report window and optional category filter
    #[derive(Debug, Clone)]
    pub struct ReportQuery {
        pub start_date: String,
        pub end_date: String,
        pub category_id: Option<String>,
    }

    /// An expense joined with its category, if the category still resolves.
    #[derive(Debug, Clone, PartialEq)]
    pub struct ExpenseWithCategory {
        pub expense: Expense,
        pub category: Option<Category>,
    }

    /// A rendered CSV document and the file name it should be saved under.
    #[derive(Debug, Clone, PartialEq)]
    pub struct CsvReport {
        pub filename: String,
        pub content: String,
    }
}

pub mod budgets {
    #[derive(Debug, Clone)]
    pub struct SetBudgetCommand {
        pub category_id: String,
        pub month_year: String,
        pub limit: f64,
    }
}

pub mod savings_goals {
    use crate::domain::models::{SavingsGoal, SavingsGoalPatch};
    use shared::SavingsGoalStatus;

    #[derive(Debug, Clone)]
    pub struct AddSavingsGoalCommand {
        pub name: String,
        pub target_amount: f64,
        pub target_date: String,
        pub description: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateSavingsGoalCommand {
        pub goal_id: String,
        pub patch: SavingsGoalPatch,
    }

    /// Signed delta applied to a goal's saved amount
    #[derive(Debug, Clone)]
    pub struct UpdateSavingsProgressCommand {
        pub goal_id: String,
        pub amount: f64,
    }

    /// A goal with its derived progress as of a given day.
    #[derive(Debug, Clone, PartialEq)]
    pub struct SavingsGoalProgress {
        pub goal: SavingsGoal,
        pub percentage: f64,
        pub remaining: f64,
        pub days_remaining: i64,
        pub status: SavingsGoalStatus,
    }
}

pub mod users {
    use crate::domain::models::{Budget, Category, Expense, PaymentMethod, SavingsGoal, User};
    use shared::UserPreferences;

    #[derive(Debug, Clone)]
    pub struct RegisterUserCommand {
        pub name: String,
        pub email: String,
        pub phone: Option<String>,
    }

    /// The new user's id plus the ids of the seeded defaults.
    #[derive(Debug, Clone)]
    pub struct RegistrationResult {
        pub user_id: String,
        pub category_ids: Vec<String>,
        pub payment_method_ids: Vec<String>,
    }

    /// Partial profile update; absent fields are left untouched
    #[derive(Debug, Clone, Default)]
    pub struct UpdateProfileCommand {
        pub name: Option<String>,
        pub phone: Option<String>,
        pub preferences: Option<UserPreferences>,
    }

    /// Everything a user owns, read at one point in time.
    #[derive(Debug, Clone)]
    pub struct UserDataSnapshot {
        /// RFC 3339
        pub export_date: String,
        pub user: User,
        pub preferences: Option<UserPreferences>,
        pub expenses: Vec<Expense>,
        pub categories: Vec<Category>,
        pub budgets: Vec<Budget>,
        pub savings_goals: Vec<SavingsGoal>,
        pub payment_methods: Vec<PaymentMethod>,
    }
}
