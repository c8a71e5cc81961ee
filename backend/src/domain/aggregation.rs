//! Aggregation engine for the household finance backend.
//!
//! Pure functions that turn a caller-scoped slice of expenses (plus the
//! caller's categories for display metadata) into derived views:
//!
//! - **Dashboard statistics** for one month against the month before it
//! - **Expense reports** over an inclusive date range
//! - **Lifetime statistics** over every expense the user has recorded
//!
//! Nothing here reads the clock or touches storage. Services load the rows,
//! resolve the month, and hand both in.
//!
//! Percentages are always guarded: a zero or non-finite denominator yields 0.

use std::collections::{BTreeMap, HashMap, HashSet};

use super::calendar::MonthKey;
use super::models::{Category, Expense};

/// Number of entries kept in the dashboard's recent expense list
pub const RECENT_EXPENSE_LIMIT: usize = 5;
/// Number of populated months kept in lifetime trends
pub const MONTHLY_TREND_LIMIT: usize = 6;
/// Number of categories kept in lifetime top categories
pub const TOP_CATEGORY_LIMIT: usize = 5;

/// Display metadata of a category captured at aggregation time
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryLabel {
    pub name: String,
    pub icon: String,
    pub color: String,
}

impl CategoryLabel {
    fn of(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            icon: category.icon.clone(),
            color: category.color.clone(),
        }
    }

    /// Label used when an expense points at a category that no longer resolves
    pub fn fallback() -> Self {
        Self {
            name: Category::FALLBACK_NAME.to_string(),
            icon: Category::FALLBACK_ICON.to_string(),
            color: Category::FALLBACK_COLOR.to_string(),
        }
    }
}

/// Category id to category lookup used while grouping
pub struct CategoryIndex<'a> {
    by_id: HashMap<&'a str, &'a Category>,
}

impl<'a> CategoryIndex<'a> {
    pub fn new(categories: &'a [Category]) -> Self {
        Self {
            by_id: categories.iter().map(|c| (c.id.as_str(), c)).collect(),
        }
    }

    pub fn get(&self, category_id: &str) -> Option<&'a Category> {
        self.by_id.get(category_id).copied()
    }

    pub fn label(&self, category_id: &str) -> CategoryLabel {
        self.get(category_id)
            .map(CategoryLabel::of)
            .unwrap_or_else(CategoryLabel::fallback)
    }
}

/// One category's share of a month
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category_id: String,
    pub label: CategoryLabel,
    pub total: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub month: MonthKey,
    pub total_month: f64,
    pub total_prev_month: f64,
    pub daily_average: f64,
    pub expense_count: usize,
    pub category_breakdown: Vec<CategoryShare>,
    pub recent_expenses: Vec<Expense>,
}

/// Inclusive date-range filter for reports
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFilter {
    pub start_date: String,
    pub end_date: String,
    pub category_id: Option<String>,
}

impl ReportFilter {
    pub fn matches(&self, expense: &Expense) -> bool {
        let in_range = expense.date.as_str() >= self.start_date.as_str()
            && expense.date.as_str() <= self.end_date.as_str();
        let in_category = self
            .category_id
            .as_deref()
            .map_or(true, |id| expense.category_id == id);
        in_range && in_category
    }
}

/// A keyed group of a report with its share of the report total
#[derive(Debug, Clone, PartialEq)]
pub struct ReportGroup {
    pub key: String,
    pub amount: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub start_date: String,
    pub end_date: String,
    pub total: f64,
    pub count: usize,
    pub average: f64,
    /// Sorted by amount descending
    pub by_category: Vec<ReportGroup>,
    /// Sorted by amount descending
    pub by_payment_method: Vec<ReportGroup>,
    /// Sorted by date ascending
    pub by_day: Vec<ReportGroup>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopCategoryEntry {
    pub category_id: String,
    pub label: CategoryLabel,
    pub total: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LifetimeStats {
    pub total_expenses: usize,
    pub total_amount: f64,
    pub categories_used: usize,
    pub days_active: usize,
    /// (YYYY-MM, total) pairs, chronological
    pub monthly_trends: Vec<(String, f64)>,
    pub max_monthly_amount: f64,
    pub top_categories: Vec<TopCategoryEntry>,
}

/// `part / whole × 100`, or 0 when the ratio is undefined
pub fn percentage_of(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 || !whole.is_finite() {
        return 0.0;
    }
    let percentage = part / whole * 100.0;
    if percentage.is_finite() {
        percentage
    } else {
        0.0
    }
}

/// Sum of the amounts of expenses falling inside `month`
pub fn month_total<'a, I>(expenses: I, month: &MonthKey) -> f64
where
    I: IntoIterator<Item = &'a Expense>,
{
    expenses
        .into_iter()
        .filter(|e| month.contains(&e.date))
        .map(|e| e.amount)
        .sum()
}

/// Accumulates amounts per key, remembering first-appearance order
struct OrderedTotals {
    order: Vec<String>,
    totals: HashMap<String, (f64, usize)>,
}

impl OrderedTotals {
    fn new() -> Self {
        Self {
            order: Vec::new(),
            totals: HashMap::new(),
        }
    }

    fn add(&mut self, key: &str, amount: f64) {
        match self.totals.get_mut(key) {
            Some((total, count)) => {
                *total += amount;
                *count += 1;
            }
            None => {
                self.order.push(key.to_string());
                self.totals.insert(key.to_string(), (amount, 1));
            }
        }
    }

    /// (key, total, count) in first-appearance order
    fn into_entries(mut self) -> Vec<(String, f64, usize)> {
        self.order
            .into_iter()
            .filter_map(|key| {
                let (total, count) = self.totals.remove(&key)?;
                Some((key, total, count))
            })
            .collect()
    }
}

fn sort_by_amount_desc<T>(entries: &mut [T], amount: impl Fn(&T) -> f64) {
    entries.sort_by(|a, b| amount(b).total_cmp(&amount(a)));
}

/// Dashboard statistics for `month` over all of a user's expenses.
pub fn dashboard_stats(expenses: &[Expense], categories: &[Category], month: MonthKey) -> DashboardSummary {
    let index = CategoryIndex::new(categories);
    let previous = month.previous();

    let this_month: Vec<&Expense> = expenses.iter().filter(|e| month.contains(&e.date)).collect();

    let mut grouped = OrderedTotals::new();
    for expense in &this_month {
        grouped.add(&expense.category_id, expense.amount);
    }
    let groups = grouped.into_entries();

    // Summing the groups keeps the month total equal to the breakdown sum
    let total_month: f64 = groups.iter().map(|(_, total, _)| *total).sum();
    let total_prev_month = month_total(expenses, &previous);

    let category_breakdown = groups
        .into_iter()
        .map(|(category_id, total, _)| CategoryShare {
            label: index.label(&category_id),
            percentage: percentage_of(total, total_month),
            category_id,
            total,
        })
        .collect();

    let mut recent_expenses: Vec<Expense> = this_month.iter().map(|e| (*e).clone()).collect();
    recent_expenses.sort_by(|a, b| b.date.cmp(&a.date));
    recent_expenses.truncate(RECENT_EXPENSE_LIMIT);

    DashboardSummary {
        month,
        total_month,
        total_prev_month,
        daily_average: total_month / f64::from(month.days_in_month()),
        expense_count: this_month.len(),
        category_breakdown,
        recent_expenses,
    }
}

/// Expenses matching a report filter, oldest first.
pub fn filter_for_report<'a>(expenses: &'a [Expense], filter: &ReportFilter) -> Vec<&'a Expense> {
    let mut matching: Vec<&Expense> = expenses.iter().filter(|e| filter.matches(e)).collect();
    matching.sort_by(|a, b| a.date.cmp(&b.date));
    matching
}

/// Totals and breakdowns for the expenses matching `filter`.
pub fn expense_report(expenses: &[Expense], categories: &[Category], filter: &ReportFilter) -> ReportSummary {
    let index = CategoryIndex::new(categories);
    let matching = filter_for_report(expenses, filter);

    let total: f64 = matching.iter().map(|e| e.amount).sum();
    let count = matching.len();
    let average = if count == 0 { 0.0 } else { total / count as f64 };

    let mut by_category = OrderedTotals::new();
    let mut by_payment_method = OrderedTotals::new();
    let mut by_day: BTreeMap<String, f64> = BTreeMap::new();

    for expense in &matching {
        by_category.add(&index.label(&expense.category_id).name, expense.amount);
        by_payment_method.add(&expense.payment_method, expense.amount);
        *by_day.entry(expense.date.clone()).or_insert(0.0) += expense.amount;
    }

    let to_groups = |totals: OrderedTotals| {
        let mut groups: Vec<ReportGroup> = totals
            .into_entries()
            .into_iter()
            .map(|(key, amount, _)| ReportGroup {
                key,
                amount,
                percentage: percentage_of(amount, total),
            })
            .collect();
        sort_by_amount_desc(&mut groups, |g| g.amount);
        groups
    };

    let by_category = to_groups(by_category);
    let by_payment_method = to_groups(by_payment_method);
    let by_day = by_day
        .into_iter()
        .map(|(key, amount)| ReportGroup {
            key,
            amount,
            percentage: percentage_of(amount, total),
        })
        .collect();

    ReportSummary {
        start_date: filter.start_date.clone(),
        end_date: filter.end_date.clone(),
        total,
        count,
        average,
        by_category,
        by_payment_method,
        by_day,
    }
}

/// Lifetime statistics over every expense a user has recorded.
pub fn lifetime_stats(expenses: &[Expense], categories: &[Category]) -> LifetimeStats {
    let index = CategoryIndex::new(categories);

    let total_amount: f64 = expenses.iter().map(|e| e.amount).sum();
    let categories_used = expenses
        .iter()
        .map(|e| e.category_id.as_str())
        .collect::<HashSet<_>>()
        .len();
    let days_active = expenses
        .iter()
        .map(|e| e.date.as_str())
        .collect::<HashSet<_>>()
        .len();

    let mut monthly: BTreeMap<String, f64> = BTreeMap::new();
    for expense in expenses {
        *monthly.entry(expense.month_bucket().to_string()).or_insert(0.0) += expense.amount;
    }
    let skip = monthly.len().saturating_sub(MONTHLY_TREND_LIMIT);
    let monthly_trends: Vec<(String, f64)> = monthly.into_iter().skip(skip).collect();
    let max_monthly_amount = monthly_trends
        .iter()
        .map(|(_, amount)| *amount)
        .fold(1.0_f64, f64::max);

    let mut by_category = OrderedTotals::new();
    for expense in expenses {
        by_category.add(&expense.category_id, expense.amount);
    }
    let mut top_categories: Vec<TopCategoryEntry> = by_category
        .into_entries()
        .into_iter()
        .map(|(category_id, total, count)| TopCategoryEntry {
            label: index.label(&category_id),
            category_id,
            total,
            count,
        })
        .collect();
    sort_by_amount_desc(&mut top_categories, |c| c.total);
    top_categories.truncate(TOP_CATEGORY_LIMIT);

    LifetimeStats {
        total_expenses: expenses.len(),
        total_amount,
        categories_used,
        days_active,
        monthly_trends,
        max_monthly_amount,
        top_categories,
    }
}
