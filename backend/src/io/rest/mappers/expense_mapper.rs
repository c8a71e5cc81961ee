use crate::domain::aggregation::{CategoryShare, DashboardSummary, ReportGroup, ReportSummary};
use crate::domain::commands::expenses::{AddExpenseCommand, ExpenseListQuery, ExpenseWithCategory, ReportQuery};
use crate::domain::models::{Expense, ExpensePatch};
use crate::io::rest::mappers::category_mapper::CategoryMapper;
use shared::{
    BreakdownEntry, CategoryTotal, CreateExpenseRequest, DailyTotal, DashboardStats, Expense as ExpenseDto,
    ExpenseListRequest, ExpenseReport, ExpenseWithCategory as ExpenseWithCategoryDto, ReportRequest,
    UpdateExpenseRequest,
};

pub struct ExpenseMapper;

impl ExpenseMapper {
    pub fn to_dto(domain: Expense) -> ExpenseDto {
        ExpenseDto {
            id: domain.id,
            name: domain.name,
            amount: domain.amount,
            category_id: domain.category_id,
            date: domain.date,
            payment_method: domain.payment_method,
            description: domain.description,
            tags: domain.tags,
            receipt_ref: domain.receipt_ref,
        }
    }

    pub fn to_dto_list(domain_expenses: Vec<Expense>) -> Vec<ExpenseDto> {
        domain_expenses.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_with_category_dto(domain: ExpenseWithCategory) -> ExpenseWithCategoryDto {
        ExpenseWithCategoryDto {
            expense: Self::to_dto(domain.expense),
            category: domain.category.map(CategoryMapper::to_dto),
        }
    }

    pub fn to_list_query(request: ExpenseListRequest) -> ExpenseListQuery {
        ExpenseListQuery {
            start_date: request.start_date,
            end_date: request.end_date,
            category_id: request.category_id,
        }
    }

    pub fn to_add_command(request: CreateExpenseRequest) -> AddExpenseCommand {
        AddExpenseCommand {
            name: request.name,
            amount: request.amount,
            category_id: request.category_id,
            date: request.date,
            payment_method: request.payment_method,
            description: request.description,
            tags: request.tags,
            receipt_ref: request.receipt_ref,
        }
    }

    pub fn to_patch(request: UpdateExpenseRequest) -> ExpensePatch {
        ExpensePatch {
            name: request.name,
            amount: request.amount,
            category_id: request.category_id,
            date: request.date,
            payment_method: request.payment_method,
            description: request.description,
            tags: request.tags,
            receipt_ref: request.receipt_ref,
        }
    }

    pub fn to_report_query(request: ReportRequest) -> ReportQuery {
        ReportQuery {
            start_date: request.start_date,
            end_date: request.end_date,
            category_id: request.category_id,
        }
    }

    fn to_category_total(share: CategoryShare) -> CategoryTotal {
        CategoryTotal {
            category_id: share.category_id,
            name: share.label.name,
            icon: share.label.icon,
            color: share.label.color,
            total: share.total,
            percentage: share.percentage,
        }
    }

    pub fn to_dashboard_stats(summary: DashboardSummary) -> DashboardStats {
        DashboardStats {
            month: summary.month.to_string(),
            total_month: summary.total_month,
            total_prev_month: summary.total_prev_month,
            daily_average: summary.daily_average,
            expense_count: summary.expense_count,
            category_breakdown: summary
                .category_breakdown
                .into_iter()
                .map(Self::to_category_total)
                .collect(),
            recent_expenses: Self::to_dto_list(summary.recent_expenses),
        }
    }

    fn to_breakdown(groups: Vec<ReportGroup>) -> Vec<BreakdownEntry> {
        groups
            .into_iter()
            .map(|group| BreakdownEntry {
                name: group.key,
                amount: group.amount,
                percentage: group.percentage,
            })
            .collect()
    }

    pub fn to_expense_report(summary: ReportSummary) -> ExpenseReport {
        ExpenseReport {
            start_date: summary.start_date,
            end_date: summary.end_date,
            total: summary.total,
            count: summary.count,
            average: summary.average,
            category_breakdown: Self::to_breakdown(summary.by_category),
            payment_method_breakdown: Self::to_breakdown(summary.by_payment_method),
            daily_breakdown: summary
                .by_day
                .into_iter()
                .map(|group| DailyTotal {
                    date: group.key,
                    amount: group.amount,
                })
                .collect(),
        }
    }
}
