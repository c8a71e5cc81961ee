//! Lifecycle coordinator: registration, default seeding, account deletion
//! and full data export.
//!
//! ## Seeding
//!
//! Seeding inserts the fixed catalog unconditionally. Callers seed only when
//! the user's collection is empty; calling twice duplicates every row.
//! Registration always seeds, since a new user's collections are empty.
//!
//! ## Account deletion
//!
//! A sequential sweep with no rollback: expenses, categories, budgets,
//! savings goals and payment methods row by row, then the profile, then the
//! user record. A storage failure stops the sweep and leaves the remaining
//! rows in place.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::calendar::Clock;
use crate::domain::commands::users::{RegisterUserCommand, RegistrationResult, UserDataSnapshot};
use crate::domain::errors::{DomainError, DomainResult, RecordKind};
use crate::domain::identity::Identity;
use crate::domain::models::{Category, PaymentMethod, User};
use crate::domain::validation::require_text;
use crate::storage::{
    BudgetStorage, CategoryStorage, Connection, ExpenseStorage, PaymentMethodStorage, ProfileStorage,
    SavingsGoalStorage, UserStorage,
};

/// (name, icon, color) of each default category
pub const DEFAULT_CATEGORIES: [(&str, &str, &str); 8] = [
    ("Food", "🍽️", "#FF6B6B"),
    ("Transport", "🚗", "#4ECDC4"),
    ("Housing", "🏠", "#45B7D1"),
    ("Health", "⚕️", "#96CEB4"),
    ("Education", "📚", "#FFEAA7"),
    ("Leisure", "🎮", "#DDA0DD"),
    ("Clothing", "👕", "#98D8C8"),
    ("Other", "📦", "#A0A0A0"),
];

/// (name, icon) of each default payment method
pub const DEFAULT_PAYMENT_METHODS: [(&str, &str); 6] = [
    ("Cash", "💵"),
    ("Debit Card", "💳"),
    ("Credit Card", "💳"),
    ("PIX", "📱"),
    ("Bank Transfer", "🏦"),
    ("Boleto", "📄"),
];

/// Trim and lowercase an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Clone)]
pub struct LifecycleService<C: Connection> {
    user_repository: C::UserRepository,
    profile_repository: C::ProfileRepository,
    category_repository: C::CategoryRepository,
    payment_method_repository: C::PaymentMethodRepository,
    expense_repository: C::ExpenseRepository,
    budget_repository: C::BudgetRepository,
    savings_goal_repository: C::SavingsGoalRepository,
    clock: Arc<dyn Clock>,
}

impl<C: Connection> LifecycleService<C> {
    pub fn new(connection: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            user_repository: connection.create_user_repository(),
            profile_repository: connection.create_profile_repository(),
            category_repository: connection.create_category_repository(),
            payment_method_repository: connection.create_payment_method_repository(),
            expense_repository: connection.create_expense_repository(),
            budget_repository: connection.create_budget_repository(),
            savings_goal_repository: connection.create_savings_goal_repository(),
            clock,
        }
    }

    /// Create a user and seed their default categories and payment methods
    pub async fn register_user(&self, command: RegisterUserCommand) -> DomainResult<RegistrationResult> {
        let name = require_text("Name", &command.name)?;
        let email = normalize_email(&command.email);
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::validation("Email must be a valid address"));
        }
        info!("Registering user {}", email);

        if self.user_repository.find_user_by_email(&email).await?.is_some() {
            warn!("Registration rejected: {} is already registered", email);
            return Err(DomainError::Conflict(format!("Email {} is already registered", email)));
        }

        let user = User {
            id: User::generate_id(),
            name,
            email,
            phone: command.phone,
            created_at: self.clock.now().to_rfc3339(),
        };
        if !self.user_repository.store_user(&user).await? {
            warn!("Registration rejected: {} was registered concurrently", user.email);
            return Err(DomainError::Conflict(format!("Email {} is already registered", user.email)));
        }

        let identity = Identity::new(user.id.clone());
        let category_ids = self.seed_default_categories(&identity).await?;
        let payment_method_ids = self.seed_default_payment_methods(&identity).await?;

        Ok(RegistrationResult {
            user_id: user.id,
            category_ids,
            payment_method_ids,
        })
    }

    /// Insert the default category catalog for the caller
    pub async fn seed_default_categories(&self, identity: &Identity) -> DomainResult<Vec<String>> {
        info!("Seeding default categories for {}", identity.user_id());

        let mut ids = Vec::with_capacity(DEFAULT_CATEGORIES.len());
        for (name, icon, color) in DEFAULT_CATEGORIES {
            let category = Category {
                id: Category::generate_id(),
                user_id: identity.user_id().to_string(),
                name: name.to_string(),
                icon: icon.to_string(),
                color: color.to_string(),
                is_default: true,
            };
            self.category_repository.store_category(&category).await?;
            ids.push(category.id);
        }
        Ok(ids)
    }

    /// Insert the default payment method catalog for the caller
    pub async fn seed_default_payment_methods(&self, identity: &Identity) -> DomainResult<Vec<String>> {
        info!("Seeding default payment methods for {}", identity.user_id());

        let mut ids = Vec::with_capacity(DEFAULT_PAYMENT_METHODS.len());
        for (name, icon) in DEFAULT_PAYMENT_METHODS {
            let payment_method = PaymentMethod {
                id: PaymentMethod::generate_id(),
                user_id: identity.user_id().to_string(),
                name: name.to_string(),
                icon: icon.to_string(),
                is_default: true,
            };
            self.payment_method_repository
                .store_payment_method(&payment_method)
                .await?;
            ids.push(payment_method.id);
        }
        Ok(ids)
    }

    /// Remove every row the caller owns, then the caller's user record
    pub async fn delete_account(&self, identity: &Identity) -> DomainResult<()> {
        let user_id = identity.user_id();
        info!("Deleting account {}", user_id);

        let expenses = self.expense_repository.list_expenses(user_id).await?;
        for expense in &expenses {
            self.expense_repository.delete_expense(&expense.id).await?;
        }

        let categories = self.category_repository.list_categories(user_id).await?;
        for category in &categories {
            self.category_repository.delete_category(&category.id).await?;
        }

        let budgets = self.budget_repository.list_budgets(user_id).await?;
        for budget in &budgets {
            self.budget_repository.delete_budget(&budget.id).await?;
        }

        let goals = self.savings_goal_repository.list_savings_goals(user_id).await?;
        for goal in &goals {
            self.savings_goal_repository.delete_savings_goal(&goal.id).await?;
        }

        let payment_methods = self.payment_method_repository.list_payment_methods(user_id).await?;
        for payment_method in &payment_methods {
            self.payment_method_repository
                .delete_payment_method(&payment_method.id)
                .await?;
        }

        self.profile_repository.delete_profile(user_id).await?;
        self.user_repository.delete_user(user_id).await?;

        debug!(
            "Removed {} expenses, {} categories, {} budgets, {} goals, {} payment methods",
            expenses.len(),
            categories.len(),
            budgets.len(),
            goals.len(),
            payment_methods.len()
        );
        Ok(())
    }

    /// Snapshot of everything the caller owns
    pub async fn export_user_data(&self, identity: &Identity) -> DomainResult<UserDataSnapshot> {
        let user_id = identity.user_id();
        info!("Exporting data for {}", user_id);

        let user = self
            .user_repository
            .get_user(user_id)
            .await?
            .ok_or(DomainError::NotFound(RecordKind::User))?;
        let preferences = self.profile_repository.get_profile(user_id).await?.map(|p| p.preferences);

        Ok(UserDataSnapshot {
            export_date: self.clock.now().to_rfc3339(),
            user,
            preferences,
            expenses: self.expense_repository.list_expenses(user_id).await?,
            categories: self.category_repository.list_categories(user_id).await?,
            budgets: self.budget_repository.list_budgets(user_id).await?,
            savings_goals: self.savings_goal_repository.list_savings_goals(user_id).await?,
            payment_methods: self.payment_method_repository.list_payment_methods(user_id).await?,
        })
    }
}
