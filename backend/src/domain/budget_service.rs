//! Budget service: monthly per-category limits and their live status.
//!
//! A budget is unique per (owner, category, month). Setting a budget that
//! already exists updates its limit and keeps its id.

use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::aggregation::CategoryIndex;
use crate::domain::budget_evaluator::{self, BudgetAlertEntry, EvaluatedBudget};
use crate::domain::calendar::{resolve_month, Clock, MonthKey};
use crate::domain::commands::budgets::SetBudgetCommand;
use crate::domain::errors::{DomainResult, RecordKind};
use crate::domain::identity::Identity;
use crate::domain::models::{Budget, Expense};
use crate::domain::ownership::ensure_owned;
use crate::domain::validation::require_positive;
use crate::storage::{BudgetStorage, CategoryStorage, Connection, ExpenseStorage};

#[derive(Clone)]
pub struct BudgetService<C: Connection> {
    budget_repository: C::BudgetRepository,
    category_repository: C::CategoryRepository,
    expense_repository: C::ExpenseRepository,
    clock: Arc<dyn Clock>,
}

impl<C: Connection> BudgetService<C> {
    pub fn new(connection: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            budget_repository: connection.create_budget_repository(),
            category_repository: connection.create_category_repository(),
            expense_repository: connection.create_expense_repository(),
            clock,
        }
    }

    async fn expenses_in_month(&self, identity: &Identity, month: &MonthKey) -> DomainResult<Vec<Expense>> {
        Ok(self
            .expense_repository
            .list_expenses_in_range(identity.user_id(), &month.range_start(), &month.range_end())
            .await?)
    }

    /// The caller's budgets for `month_year` (or the current month) with derived status
    pub async fn get_user_budgets(
        &self,
        identity: &Identity,
        month_year: Option<&str>,
    ) -> DomainResult<Vec<EvaluatedBudget>> {
        let month = resolve_month(month_year, self.clock.as_ref())?;
        info!("Listing budgets for {} in {}", identity.user_id(), month);

        let budgets = self
            .budget_repository
            .list_budgets_for_month(identity.user_id(), &month.to_string())
            .await?;
        let expenses = self.expenses_in_month(identity, &month).await?;
        let categories = self.category_repository.list_categories(identity.user_id()).await?;
        debug!("Evaluating {} budgets against {} expenses", budgets.len(), expenses.len());

        Ok(budget_evaluator::evaluate_budgets(
            budgets,
            &expenses,
            &CategoryIndex::new(&categories),
        ))
    }

    /// Create the budget for a category and month, or update its limit if one exists
    pub async fn set_budget(&self, identity: &Identity, command: SetBudgetCommand) -> DomainResult<String> {
        info!("Setting budget for {}: {:?}", identity.user_id(), command);

        let limit = require_positive("Budget limit", command.limit)?;
        let month: MonthKey = command.month_year.parse()?;
        let category = self.category_repository.get_category(&command.category_id).await?;
        let category = ensure_owned(category, identity, RecordKind::Category)?;

        let existing = self
            .budget_repository
            .find_budget(identity.user_id(), &category.id, &month.to_string())
            .await?;

        match existing {
            Some(mut budget) => {
                debug!("Updating existing budget {}", budget.id);
                budget.limit = limit;
                self.budget_repository.update_budget(&budget).await?;
                Ok(budget.id)
            }
            None => {
                let budget = Budget {
                    id: Budget::generate_id(),
                    user_id: identity.user_id().to_string(),
                    category_id: category.id,
                    month_year: month.to_string(),
                    limit,
                };
                self.budget_repository.store_budget(&budget).await?;
                Ok(budget.id)
            }
        }
    }

    pub async fn delete_budget(&self, identity: &Identity, budget_id: &str) -> DomainResult<()> {
        info!("Deleting budget {} for {}", budget_id, identity.user_id());

        let budget = self.budget_repository.get_budget(budget_id).await?;
        let budget = ensure_owned(budget, identity, RecordKind::Budget)?;
        self.budget_repository.delete_budget(&budget.id).await?;
        Ok(())
    }

    /// Alerts for the current month's budgets at or above 80% of their limit
    pub async fn get_budget_alerts(&self, identity: &Identity) -> DomainResult<Vec<BudgetAlertEntry>> {
        let month = self.clock.current_month();
        info!("Budget alerts for {} in {}", identity.user_id(), month);

        let budgets = self
            .budget_repository
            .list_budgets_for_month(identity.user_id(), &month.to_string())
            .await?;
        let expenses = self.expenses_in_month(identity, &month).await?;
        let categories = self.category_repository.list_categories(identity.user_id()).await?;

        Ok(budget_evaluator::budget_alerts(
            &budgets,
            &expenses,
            &CategoryIndex::new(&categories),
        ))
    }
}
