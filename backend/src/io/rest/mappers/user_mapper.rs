use crate::domain::aggregation::LifetimeStats;
use crate::domain::commands::users::{RegisterUserCommand, RegistrationResult, UpdateProfileCommand, UserDataSnapshot};
use crate::io::rest::mappers::{
    budget_mapper::BudgetMapper, category_mapper::CategoryMapper, expense_mapper::ExpenseMapper,
    payment_method_mapper::PaymentMethodMapper, savings_goal_mapper::SavingsGoalMapper,
};
use shared::{
    MonthlyTrend, RegisterUserRequest, RegisterUserResponse, TopCategory, UpdateProfileRequest, UserDataExport,
    UserInfo, UserStats,
};

pub struct UserMapper;

impl UserMapper {
    pub fn to_register_command(request: RegisterUserRequest) -> RegisterUserCommand {
        RegisterUserCommand {
            name: request.name,
            email: request.email,
            phone: request.phone,
        }
    }

    pub fn to_register_response(result: RegistrationResult) -> RegisterUserResponse {
        RegisterUserResponse {
            user_id: result.user_id,
            category_ids: result.category_ids,
            payment_method_ids: result.payment_method_ids,
        }
    }

    pub fn to_update_profile_command(request: UpdateProfileRequest) -> UpdateProfileCommand {
        UpdateProfileCommand {
            name: request.name,
            phone: request.phone,
            preferences: request.preferences,
        }
    }

    pub fn to_user_stats(stats: LifetimeStats) -> UserStats {
        UserStats {
            total_expenses: stats.total_expenses,
            total_amount: stats.total_amount,
            categories_used: stats.categories_used,
            days_active: stats.days_active,
            monthly_trends: stats
                .monthly_trends
                .into_iter()
                .map(|(month, amount)| MonthlyTrend { month, amount })
                .collect(),
            max_monthly_amount: stats.max_monthly_amount,
            top_categories: stats
                .top_categories
                .into_iter()
                .map(|entry| TopCategory {
                    category_id: entry.category_id,
                    name: entry.label.name,
                    icon: entry.label.icon,
                    total: entry.total,
                    count: entry.count,
                })
                .collect(),
        }
    }

    pub fn to_export(snapshot: UserDataSnapshot) -> UserDataExport {
        UserDataExport {
            export_date: snapshot.export_date,
            user: UserInfo {
                name: snapshot.user.name,
                email: snapshot.user.email,
                phone: snapshot.user.phone,
                preferences: snapshot.preferences,
            },
            expenses: ExpenseMapper::to_dto_list(snapshot.expenses),
            categories: CategoryMapper::to_dto_list(snapshot.categories),
            budgets: BudgetMapper::to_dto_list(snapshot.budgets),
            savings_goals: SavingsGoalMapper::to_dto_list(snapshot.savings_goals),
            payment_methods: PaymentMethodMapper::to_dto_list(snapshot.payment_methods),
        }
    }
}
