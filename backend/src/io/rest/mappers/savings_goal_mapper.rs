use crate::domain::commands::savings_goals::{AddSavingsGoalCommand, SavingsGoalProgress};
use crate::domain::models::{SavingsGoal, SavingsGoalPatch};
use shared::{
    CreateSavingsGoalRequest, SavingsGoal as SavingsGoalDto, SavingsGoalWithProgress, UpdateSavingsGoalRequest,
};

pub struct SavingsGoalMapper;

impl SavingsGoalMapper {
    pub fn to_dto(domain: SavingsGoal) -> SavingsGoalDto {
        SavingsGoalDto {
            id: domain.id,
            name: domain.name,
            target_amount: domain.target_amount,
            current_amount: domain.current_amount,
            target_date: domain.target_date,
            description: domain.description,
        }
    }

    pub fn to_dto_list(domain_goals: Vec<SavingsGoal>) -> Vec<SavingsGoalDto> {
        domain_goals.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_with_progress(domain: SavingsGoalProgress) -> SavingsGoalWithProgress {
        SavingsGoalWithProgress {
            goal: Self::to_dto(domain.goal),
            percentage: domain.percentage,
            remaining: domain.remaining,
            days_remaining: domain.days_remaining,
            status: domain.status,
        }
    }

    pub fn to_add_command(request: CreateSavingsGoalRequest) -> AddSavingsGoalCommand {
        AddSavingsGoalCommand {
            name: request.name,
            target_amount: request.target_amount,
            target_date: request.target_date,
            description: request.description,
        }
    }

    pub fn to_patch(request: UpdateSavingsGoalRequest) -> SavingsGoalPatch {
        SavingsGoalPatch {
            name: request.name,
            target_amount: request.target_amount,
            target_date: request.target_date,
            description: request.description,
        }
    }
}
