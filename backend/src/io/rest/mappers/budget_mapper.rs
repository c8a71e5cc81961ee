use crate::domain::budget_evaluator::{BudgetAlertEntry, EvaluatedBudget};
use crate::domain::commands::budgets::SetBudgetCommand;
use crate::domain::models::Budget;
use crate::io::rest::mappers::category_mapper::CategoryMapper;
use shared::{Budget as BudgetDto, BudgetAlert, BudgetWithStatus, SetBudgetRequest};

pub struct BudgetMapper;

impl BudgetMapper {
    pub fn to_dto(domain: Budget) -> BudgetDto {
        BudgetDto {
            id: domain.id,
            category_id: domain.category_id,
            month_year: domain.month_year,
            limit: domain.limit,
        }
    }

    pub fn to_dto_list(domain_budgets: Vec<Budget>) -> Vec<BudgetDto> {
        domain_budgets.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_set_command(request: SetBudgetRequest) -> SetBudgetCommand {
        SetBudgetCommand {
            category_id: request.category_id,
            month_year: request.month_year,
            limit: request.limit,
        }
    }

    /// Convert an evaluated budget; `percentage` on the wire is the clamped value
    pub fn to_with_status(domain: EvaluatedBudget) -> BudgetWithStatus {
        BudgetWithStatus {
            budget: Self::to_dto(domain.budget),
            category: domain.category.map(CategoryMapper::to_dto),
            spent: domain.evaluation.spent,
            remaining: domain.evaluation.remaining,
            percentage: domain.evaluation.display_percentage,
            raw_percentage: domain.evaluation.percentage,
            status: domain.evaluation.status,
        }
    }

    pub fn to_alert(domain: BudgetAlertEntry) -> BudgetAlert {
        BudgetAlert {
            budget_id: domain.budget_id,
            category_name: domain.label.name,
            category_icon: domain.label.icon,
            spent: domain.spent,
            limit: domain.limit,
            percentage: domain.percentage,
            alert_type: domain.alert_type,
        }
    }
}
