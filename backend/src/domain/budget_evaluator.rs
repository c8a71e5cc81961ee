//! Budget evaluator: spend-vs-limit status and alert classification.
//!
//! `spent` is never stored. Every evaluation recomputes it from the expense
//! rows passed in, so a budget always reflects the latest expense data.

use shared::{AlertType, BudgetStatus};

use super::aggregation::{percentage_of, CategoryIndex, CategoryLabel};
use super::calendar::MonthKey;
use super::models::{Budget, Expense};

pub const CAUTION_THRESHOLD: f64 = 80.0;
pub const WARNING_THRESHOLD: f64 = 90.0;
pub const EXCEEDED_THRESHOLD: f64 = 100.0;

/// Derived state of one budget for its month
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetEvaluation {
    pub spent: f64,
    /// Negative once the limit is exceeded
    pub remaining: f64,
    /// Unclamped; used for classification
    pub percentage: f64,
    /// Clamped to 100 for progress bars
    pub display_percentage: f64,
    pub status: BudgetStatus,
}

/// A budget joined with its evaluation and category label
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedBudget {
    pub budget: Budget,
    pub category: Option<super::models::Category>,
    pub evaluation: BudgetEvaluation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetAlertEntry {
    pub budget_id: String,
    pub label: CategoryLabel,
    pub spent: f64,
    pub limit: f64,
    pub percentage: f64,
    pub alert_type: AlertType,
}

/// Classify an unclamped percentage. Boundaries are closed at 80, 90 and 100.
pub fn classify(percentage: f64) -> BudgetStatus {
    if percentage >= EXCEEDED_THRESHOLD {
        BudgetStatus::Exceeded
    } else if percentage >= WARNING_THRESHOLD {
        BudgetStatus::Warning
    } else if percentage >= CAUTION_THRESHOLD {
        BudgetStatus::Caution
    } else {
        BudgetStatus::Safe
    }
}

/// The alert type for a status, if that status alerts at all
pub fn alert_type(status: BudgetStatus) -> Option<AlertType> {
    match status {
        BudgetStatus::Safe => None,
        BudgetStatus::Caution => Some(AlertType::Caution),
        BudgetStatus::Warning => Some(AlertType::Warning),
        BudgetStatus::Exceeded => Some(AlertType::Exceeded),
    }
}

/// Sum of expenses in `category_id` dated inside `month`
pub fn spent_in_month(expenses: &[Expense], category_id: &str, month: &MonthKey) -> f64 {
    expenses
        .iter()
        .filter(|e| e.category_id == category_id && month.contains(&e.date))
        .map(|e| e.amount)
        .sum()
}

/// Evaluate a limit against an amount spent
pub fn evaluate(limit: f64, spent: f64) -> BudgetEvaluation {
    let percentage = percentage_of(spent, limit);
    BudgetEvaluation {
        spent,
        remaining: limit - spent,
        percentage,
        display_percentage: percentage.min(EXCEEDED_THRESHOLD),
        status: classify(percentage),
    }
}

/// Evaluate a budget against the owner's expenses.
///
/// A budget whose month key does not parse matches no expenses.
pub fn evaluate_budget(budget: &Budget, expenses: &[Expense]) -> BudgetEvaluation {
    let spent = budget
        .month_year
        .parse::<MonthKey>()
        .map(|month| spent_in_month(expenses, &budget.category_id, &month))
        .unwrap_or(0.0);
    evaluate(budget.limit, spent)
}

/// Evaluate every budget, joining each with its category
pub fn evaluate_budgets(
    budgets: Vec<Budget>,
    expenses: &[Expense],
    categories: &CategoryIndex<'_>,
) -> Vec<EvaluatedBudget> {
    budgets
        .into_iter()
        .map(|budget| EvaluatedBudget {
            evaluation: evaluate_budget(&budget, expenses),
            category: categories.get(&budget.category_id).cloned(),
            budget,
        })
        .collect()
}

/// Alerts for every budget at or above the caution threshold
pub fn budget_alerts(budgets: &[Budget], expenses: &[Expense], categories: &CategoryIndex<'_>) -> Vec<BudgetAlertEntry> {
    budgets
        .iter()
        .filter_map(|budget| {
            let evaluation = evaluate_budget(budget, expenses);
            let alert_type = alert_type(evaluation.status)?;
            Some(BudgetAlertEntry {
                budget_id: budget.id.clone(),
                label: categories.label(&budget.category_id),
                spent: evaluation.spent,
                limit: budget.limit,
                percentage: evaluation.percentage,
                alert_type,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Category;

    fn budget(id: &str, category_id: &str, month_year: &str, limit: f64) -> Budget {
        Budget {
            id: id.to_string(),
            user_id: "user::a".to_string(),
            category_id: category_id.to_string(),
            month_year: month_year.to_string(),
            limit,
        }
    }

    fn expense(category_id: &str, amount: f64, date: &str) -> Expense {
        Expense {
            id: format!("expense::{}", date),
            user_id: "user::a".to_string(),
            name: "x".to_string(),
            amount,
            category_id: category_id.to_string(),
            date: date.to_string(),
            payment_method: "Cash".to_string(),
            description: None,
            tags: vec![],
            receipt_ref: None,
        }
    }

    #[test]
    fn test_classification_boundaries_are_closed() {
        assert_eq!(classify(0.0), BudgetStatus::Safe);
        assert_eq!(classify(79.999), BudgetStatus::Safe);
        assert_eq!(classify(80.0), BudgetStatus::Caution);
        assert_eq!(classify(89.999), BudgetStatus::Caution);
        assert_eq!(classify(90.0), BudgetStatus::Warning);
        assert_eq!(classify(99.999), BudgetStatus::Warning);
        assert_eq!(classify(100.0), BudgetStatus::Exceeded);
        assert_eq!(classify(250.0), BudgetStatus::Exceeded);
    }

    #[test]
    fn test_classification_is_monotonic() {
        let mut previous = BudgetStatus::Safe;
        for step in 0..=2000 {
            let status = classify(step as f64 * 0.1);
            assert!(status >= previous, "severity dropped at {}", step as f64 * 0.1);
            previous = status;
        }
    }

    #[test]
    fn test_exceeded_scenario() {
        let expenses = vec![expense("c::food", 100.0, "2024-01-05"), expense("c::food", 50.0, "2024-01-20")];
        let evaluation = evaluate_budget(&budget("b1", "c::food", "2024-01", 120.0), &expenses);

        assert_eq!(evaluation.spent, 150.0);
        assert_eq!(evaluation.remaining, -30.0);
        assert!((evaluation.percentage - 125.0).abs() < 1e-9);
        assert_eq!(evaluation.display_percentage, 100.0);
        assert_eq!(evaluation.status, BudgetStatus::Exceeded);
    }

    #[test]
    fn test_zero_limit_yields_zero_percentage() {
        let evaluation = evaluate(0.0, 50.0);
        assert_eq!(evaluation.percentage, 0.0);
        assert_eq!(evaluation.status, BudgetStatus::Safe);
        assert!(evaluation.percentage.is_finite());
    }

    #[test]
    fn test_spent_only_counts_matching_category_and_month() {
        let expenses = vec![
            expense("c::food", 10.0, "2024-01-01"),
            expense("c::food", 20.0, "2024-02-01"),
            expense("c::bus", 40.0, "2024-01-15"),
        ];
        let month: MonthKey = "2024-01".parse().unwrap();
        assert_eq!(spent_in_month(&expenses, "c::food", &month), 10.0);
    }

    #[test]
    fn test_alerts_skip_safe_budgets() {
        let categories = vec![Category {
            id: "c::food".to_string(),
            user_id: "user::a".to_string(),
            name: "Food".to_string(),
            icon: "🍽️".to_string(),
            color: "#FF6B6B".to_string(),
            is_default: true,
        }];
        let index = CategoryIndex::new(&categories);
        let budgets = vec![
            budget("b1", "c::food", "2024-01", 100.0),
            budget("b2", "c::gone", "2024-01", 10.0),
            budget("b3", "c::none", "2024-01", 100.0),
        ];
        let expenses = vec![expense("c::food", 85.0, "2024-01-03"), expense("c::gone", 12.0, "2024-01-04")];

        let alerts = budget_alerts(&budgets, &expenses, &index);

        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].budget_id, "b1");
        assert_eq!(alerts[0].alert_type, AlertType::Caution);
        assert_eq!(alerts[0].label.name, "Food");
        assert_eq!(alerts[1].alert_type, AlertType::Exceeded);
        assert_eq!(alerts[1].label.name, Category::FALLBACK_NAME);
        assert!((alerts[1].percentage - 120.0).abs() < 1e-9);
    }
}
