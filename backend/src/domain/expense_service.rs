//! Expense service domain logic for the household finance backend.
//!
//! Covers expense CRUD plus the read-side views built on top of the
//! aggregation engine:
//!
//! - **Listing** with optional date range and category filter, newest first,
//!   each expense joined with its category
//! - **Dashboard statistics** for a month (defaults to the clock's month)
//! - **Reports** over an inclusive date range, as data or as CSV
//!
//! ## Business Rules
//!
//! - Names are required; amounts must be positive
//! - Dates are YYYY-MM-DD calendar days
//! - The referenced category must belong to the caller
//! - Payment method is a free-form name, not checked against stored methods

use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::aggregation::{self, CategoryIndex, DashboardSummary, ReportFilter, ReportSummary};
use crate::domain::calendar::{parse_day, resolve_month, Clock};
use crate::domain::commands::expenses::{
    AddExpenseCommand, CsvReport, ExpenseListQuery, ExpenseWithCategory, ReportQuery, UpdateExpenseCommand,
};
use crate::domain::errors::{DomainResult, RecordKind};
use crate::domain::identity::Identity;
use crate::domain::models::{Category, Expense};
use crate::domain::ownership::ensure_owned;
use crate::domain::report_export::{csv_filename, render_expenses_csv};
use crate::domain::validation::{require_positive, require_text};
use crate::storage::{CategoryStorage, Connection, ExpenseStorage};

#[derive(Clone)]
pub struct ExpenseService<C: Connection> {
    expense_repository: C::ExpenseRepository,
    category_repository: C::CategoryRepository,
    clock: Arc<dyn Clock>,
}

impl<C: Connection> ExpenseService<C> {
    pub fn new(connection: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            expense_repository: connection.create_expense_repository(),
            category_repository: connection.create_category_repository(),
            clock,
        }
    }

    async fn require_owned_category(&self, identity: &Identity, category_id: &str) -> DomainResult<Category> {
        let category = self.category_repository.get_category(category_id).await?;
        ensure_owned(category, identity, RecordKind::Category)
    }

    async fn get_owned_expense(&self, identity: &Identity, expense_id: &str) -> DomainResult<Expense> {
        let expense = self.expense_repository.get_expense(expense_id).await?;
        ensure_owned(expense, identity, RecordKind::Expense)
    }

    /// List the caller's expenses, newest first
    pub async fn get_user_expenses(
        &self,
        identity: &Identity,
        query: ExpenseListQuery,
    ) -> DomainResult<Vec<ExpenseWithCategory>> {
        info!("Listing expenses for {}: {:?}", identity.user_id(), query);

        if let Some(start) = &query.start_date {
            parse_day(start)?;
        }
        if let Some(end) = &query.end_date {
            parse_day(end)?;
        }

        let user_id = identity.user_id();
        let expenses = match (&query.start_date, &query.end_date) {
            (Some(start), Some(end)) => self.expense_repository.list_expenses_in_range(user_id, start, end).await?,
            _ => self.expense_repository.list_expenses(user_id).await?,
        };
        let categories = self.category_repository.list_categories(user_id).await?;
        let index = CategoryIndex::new(&categories);

        let mut listed: Vec<ExpenseWithCategory> = expenses
            .into_iter()
            .filter(|e| query.start_date.as_deref().map_or(true, |start| e.date.as_str() >= start))
            .filter(|e| query.end_date.as_deref().map_or(true, |end| e.date.as_str() <= end))
            .filter(|e| query.category_id.as_deref().map_or(true, |id| e.category_id == id))
            .map(|expense| ExpenseWithCategory {
                category: index.get(&expense.category_id).cloned(),
                expense,
            })
            .collect();
        listed.sort_by(|a, b| b.expense.date.cmp(&a.expense.date));

        debug!("Returning {} expenses", listed.len());
        Ok(listed)
    }

    pub async fn add_expense(&self, identity: &Identity, command: AddExpenseCommand) -> DomainResult<String> {
        info!("Adding expense for {}: {:?}", identity.user_id(), command);

        let name = require_text("Expense name", &command.name)?;
        let amount = require_positive("Expense amount", command.amount)?;
        parse_day(&command.date)?;
        let payment_method = require_text("Payment method", &command.payment_method)?;
        let category = self.require_owned_category(identity, &command.category_id).await?;

        let expense = Expense {
            id: Expense::generate_id(),
            user_id: identity.user_id().to_string(),
            name,
            amount,
            category_id: category.id,
            date: command.date,
            payment_method,
            description: command.description,
            tags: command.tags,
            receipt_ref: command.receipt_ref,
        };
        self.expense_repository.store_expense(&expense).await?;

        Ok(expense.id)
    }

    pub async fn update_expense(&self, identity: &Identity, command: UpdateExpenseCommand) -> DomainResult<()> {
        info!("Updating expense {} for {}", command.expense_id, identity.user_id());

        let mut expense = self.get_owned_expense(identity, &command.expense_id).await?;
        let mut patch = command.patch;

        if let Some(name) = patch.name.take() {
            patch.name = Some(require_text("Expense name", &name)?);
        }
        if let Some(amount) = patch.amount {
            require_positive("Expense amount", amount)?;
        }
        if let Some(date) = &patch.date {
            parse_day(date)?;
        }
        if let Some(payment_method) = patch.payment_method.take() {
            patch.payment_method = Some(require_text("Payment method", &payment_method)?);
        }
        if let Some(category_id) = &patch.category_id {
            self.require_owned_category(identity, category_id).await?;
        }

        expense.apply(patch);
        self.expense_repository.update_expense(&expense).await?;

        Ok(())
    }

    pub async fn delete_expense(&self, identity: &Identity, expense_id: &str) -> DomainResult<()> {
        info!("Deleting expense {} for {}", expense_id, identity.user_id());

        let expense = self.get_owned_expense(identity, expense_id).await?;
        self.expense_repository.delete_expense(&expense.id).await?;
        Ok(())
    }

    /// Dashboard statistics for `month` (YYYY-MM), or the current month
    pub async fn get_dashboard_stats(&self, identity: &Identity, month: Option<&str>) -> DomainResult<DashboardSummary> {
        let month = resolve_month(month, self.clock.as_ref())?;
        info!("Dashboard stats for {} in {}", identity.user_id(), month);

        let expenses = self.expense_repository.list_expenses(identity.user_id()).await?;
        let categories = self.category_repository.list_categories(identity.user_id()).await?;
        debug!("Aggregating {} expenses", expenses.len());

        Ok(aggregation::dashboard_stats(&expenses, &categories, month))
    }

    fn report_filter(query: ReportQuery) -> DomainResult<ReportFilter> {
        parse_day(&query.start_date)?;
        parse_day(&query.end_date)?;
        Ok(ReportFilter {
            start_date: query.start_date,
            end_date: query.end_date,
            category_id: query.category_id,
        })
    }

    pub async fn generate_report(&self, identity: &Identity, query: ReportQuery) -> DomainResult<ReportSummary> {
        info!("Report for {}: {:?}", identity.user_id(), query);

        let filter = Self::report_filter(query)?;
        let expenses = self
            .expense_repository
            .list_expenses_in_range(identity.user_id(), &filter.start_date, &filter.end_date)
            .await?;
        let categories = self.category_repository.list_categories(identity.user_id()).await?;

        Ok(aggregation::expense_report(&expenses, &categories, &filter))
    }

    /// The expenses of a report rendered as CSV, oldest first
    pub async fn export_report_csv(&self, identity: &Identity, query: ReportQuery) -> DomainResult<CsvReport> {
        info!("CSV report for {}: {:?}", identity.user_id(), query);

        let filter = Self::report_filter(query)?;
        let expenses = self
            .expense_repository
            .list_expenses_in_range(identity.user_id(), &filter.start_date, &filter.end_date)
            .await?;
        let categories = self.category_repository.list_categories(identity.user_id()).await?;
        let index = CategoryIndex::new(&categories);

        let matching = aggregation::filter_for_report(&expenses, &filter);
        let content = render_expenses_csv(&matching, &index)?;

        Ok(CsvReport {
            filename: csv_filename(&filter.start_date, &filter.end_date),
            content,
        })
    }
}
