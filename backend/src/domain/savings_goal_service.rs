//! Savings goal service.
//!
//! Goals track a target amount and date. Progress is a signed delta applied to
//! the saved amount, floored at zero. Listing derives a percentage, the amount
//! still missing, the days left and a status:
//!
//! `completed` › `overdue` › `urgent` (30 days or fewer) › `active`

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

use crate::domain::aggregation::percentage_of;
use crate::domain::calendar::{parse_day, Clock};
use crate::domain::commands::savings_goals::{
    AddSavingsGoalCommand, SavingsGoalProgress, UpdateSavingsGoalCommand, UpdateSavingsProgressCommand,
};
use crate::domain::errors::{DomainResult, RecordKind};
use crate::domain::identity::Identity;
use crate::domain::models::SavingsGoal;
use crate::domain::ownership::ensure_owned;
use crate::domain::validation::{require_finite, require_positive, require_text};
use crate::storage::{Connection, SavingsGoalStorage};
use shared::SavingsGoalStatus;

/// Goals due within this many days are urgent
pub const URGENT_WITHIN_DAYS: i64 = 30;

/// Derive progress for `goal` as of `today`
pub fn goal_progress(goal: SavingsGoal, today: NaiveDate) -> SavingsGoalProgress {
    let raw_percentage = percentage_of(goal.current_amount, goal.target_amount);
    let days_remaining = NaiveDate::parse_from_str(&goal.target_date, "%Y-%m-%d")
        .map(|target| (target - today).num_days())
        .unwrap_or(0);

    let status = if raw_percentage >= 100.0 {
        SavingsGoalStatus::Completed
    } else if days_remaining < 0 {
        SavingsGoalStatus::Overdue
    } else if days_remaining <= URGENT_WITHIN_DAYS {
        SavingsGoalStatus::Urgent
    } else {
        SavingsGoalStatus::Active
    };

    SavingsGoalProgress {
        percentage: raw_percentage.min(100.0),
        remaining: goal.target_amount - goal.current_amount,
        days_remaining,
        status,
        goal,
    }
}

#[derive(Clone)]
pub struct SavingsGoalService<C: Connection> {
    savings_goal_repository: C::SavingsGoalRepository,
    clock: Arc<dyn Clock>,
}

impl<C: Connection> SavingsGoalService<C> {
    pub fn new(connection: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            savings_goal_repository: connection.create_savings_goal_repository(),
            clock,
        }
    }

    async fn get_owned_goal(&self, identity: &Identity, goal_id: &str) -> DomainResult<SavingsGoal> {
        let goal = self.savings_goal_repository.get_savings_goal(goal_id).await?;
        ensure_owned(goal, identity, RecordKind::SavingsGoal)
    }

    pub async fn get_user_savings_goals(&self, identity: &Identity) -> DomainResult<Vec<SavingsGoalProgress>> {
        info!("Listing savings goals for {}", identity.user_id());

        let today = self.clock.today();
        let goals = self
            .savings_goal_repository
            .list_savings_goals(identity.user_id())
            .await?;

        Ok(goals.into_iter().map(|goal| goal_progress(goal, today)).collect())
    }

    pub async fn add_savings_goal(&self, identity: &Identity, command: AddSavingsGoalCommand) -> DomainResult<String> {
        info!("Adding savings goal for {}: {:?}", identity.user_id(), command);

        parse_day(&command.target_date)?;
        let goal = SavingsGoal {
            id: SavingsGoal::generate_id(),
            user_id: identity.user_id().to_string(),
            name: require_text("Goal name", &command.name)?,
            target_amount: require_positive("Target amount", command.target_amount)?,
            current_amount: 0.0,
            target_date: command.target_date,
            description: command.description,
        };
        self.savings_goal_repository.store_savings_goal(&goal).await?;

        Ok(goal.id)
    }

    /// Apply a signed delta to the saved amount
    pub async fn update_savings_progress(
        &self,
        identity: &Identity,
        command: UpdateSavingsProgressCommand,
    ) -> DomainResult<()> {
        info!(
            "Adjusting savings goal {} by {} for {}",
            command.goal_id,
            command.amount,
            identity.user_id()
        );

        let delta = require_finite("Progress amount", command.amount)?;
        let mut goal = self.get_owned_goal(identity, &command.goal_id).await?;
        goal.adjust_progress(delta);
        self.savings_goal_repository.update_savings_goal(&goal).await?;

        Ok(())
    }

    pub async fn update_savings_goal(
        &self,
        identity: &Identity,
        command: UpdateSavingsGoalCommand,
    ) -> DomainResult<()> {
        info!("Updating savings goal {} for {}", command.goal_id, identity.user_id());

        let mut goal = self.get_owned_goal(identity, &command.goal_id).await?;
        let mut patch = command.patch;
        if let Some(name) = patch.name.take() {
            patch.name = Some(require_text("Goal name", &name)?);
        }
        if let Some(target_amount) = patch.target_amount {
            require_positive("Target amount", target_amount)?;
        }
        if let Some(target_date) = &patch.target_date {
            parse_day(target_date)?;
        }

        goal.apply(patch);
        self.savings_goal_repository.update_savings_goal(&goal).await?;

        Ok(())
    }

    pub async fn delete_savings_goal(&self, identity: &Identity, goal_id: &str) -> DomainResult<()> {
        info!("Deleting savings goal {} for {}", goal_id, identity.user_id());

        let goal = self.get_owned_goal(identity, goal_id).await?;
        self.savings_goal_repository.delete_savings_goal(&goal.id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar::FixedClock;
    use crate::domain::errors::DomainError;
    use crate::domain::models::SavingsGoalPatch;
    use crate::storage::DbConnection;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn goal(current_amount: f64, target_amount: f64, target_date: &str) -> SavingsGoal {
        SavingsGoal {
            id: "savings_goal::1".to_string(),
            user_id: "user::alice".to_string(),
            name: "Trip".to_string(),
            target_amount,
            current_amount,
            target_date: target_date.to_string(),
            description: None,
        }
    }

    async fn create_test_service() -> SavingsGoalService<DbConnection> {
        let connection = Arc::new(DbConnection::init_test().await.unwrap());
        let clock = Arc::new(FixedClock::on(day("2024-01-01")));
        SavingsGoalService::new(connection, clock)
    }

    #[test]
    fn test_goal_progress_statuses() {
        let today = day("2024-01-01");

        let completed = goal_progress(goal(1200.0, 1000.0, "2023-06-01"), today);
        assert_eq!(completed.status, SavingsGoalStatus::Completed);
        assert_eq!(completed.percentage, 100.0);
        assert_eq!(completed.remaining, -200.0);

        let overdue = goal_progress(goal(100.0, 1000.0, "2023-12-31"), today);
        assert_eq!(overdue.status, SavingsGoalStatus::Overdue);
        assert_eq!(overdue.days_remaining, -1);

        let urgent = goal_progress(goal(100.0, 1000.0, "2024-01-31"), today);
        assert_eq!(urgent.status, SavingsGoalStatus::Urgent);
        assert_eq!(urgent.days_remaining, 30);

        let active = goal_progress(goal(250.0, 1000.0, "2024-02-01"), today);
        assert_eq!(active.status, SavingsGoalStatus::Active);
        assert_eq!(active.percentage, 25.0);
        assert_eq!(active.remaining, 750.0);
    }

    #[test]
    fn test_goal_progress_with_zero_target() {
        let progress = goal_progress(goal(0.0, 0.0, "2030-01-01"), day("2024-01-01"));
        assert_eq!(progress.percentage, 0.0);
        assert_eq!(progress.status, SavingsGoalStatus::Active);
    }

    #[tokio::test]
    async fn test_add_goal_starts_at_zero() {
        let service = create_test_service().await;
        let alice = Identity::new("user::alice");

        let id = service
            .add_savings_goal(
                &alice,
                AddSavingsGoalCommand {
                    name: "Car".to_string(),
                    target_amount: 20000.0,
                    target_date: "2026-01-01".to_string(),
                    description: None,
                },
            )
            .await
            .unwrap();

        let goals = service.get_user_savings_goals(&alice).await.unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].goal.id, id);
        assert_eq!(goals[0].goal.current_amount, 0.0);
        assert_eq!(goals[0].status, SavingsGoalStatus::Active);
    }

    #[tokio::test]
    async fn test_progress_never_goes_below_zero() {
        let service = create_test_service().await;
        let alice = Identity::new("user::alice");
        let id = service
            .add_savings_goal(
                &alice,
                AddSavingsGoalCommand {
                    name: "Car".to_string(),
                    target_amount: 1000.0,
                    target_date: "2026-01-01".to_string(),
                    description: None,
                },
            )
            .await
            .unwrap();

        for amount in [300.0, -100.0, -500.0] {
            service
                .update_savings_progress(
                    &alice,
                    UpdateSavingsProgressCommand {
                        goal_id: id.clone(),
                        amount,
                    },
                )
                .await
                .unwrap();
        }

        let goals = service.get_user_savings_goals(&alice).await.unwrap();
        assert_eq!(goals[0].goal.current_amount, 0.0);
    }

    #[tokio::test]
    async fn test_foreign_goal_is_not_found() {
        let service = create_test_service().await;
        let alice = Identity::new("user::alice");
        let bob = Identity::new("user::bob");
        let id = service
            .add_savings_goal(
                &alice,
                AddSavingsGoalCommand {
                    name: "Car".to_string(),
                    target_amount: 1000.0,
                    target_date: "2026-01-01".to_string(),
                    description: None,
                },
            )
            .await
            .unwrap();

        let progress = service
            .update_savings_progress(
                &bob,
                UpdateSavingsProgressCommand {
                    goal_id: id.clone(),
                    amount: 50.0,
                },
            )
            .await;
        assert!(matches!(progress, Err(DomainError::NotFound(RecordKind::SavingsGoal))));

        let update = service
            .update_savings_goal(
                &bob,
                UpdateSavingsGoalCommand {
                    goal_id: id.clone(),
                    patch: SavingsGoalPatch::default(),
                },
            )
            .await;
        assert!(matches!(update, Err(DomainError::NotFound(RecordKind::SavingsGoal))));

        assert!(service.delete_savings_goal(&bob, &id).await.is_err());
        service.delete_savings_goal(&alice, &id).await.unwrap();
        assert!(service.get_user_savings_goals(&alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_goal_validates_patch() {
        let service = create_test_service().await;
        let alice = Identity::new("user::alice");
        let id = service
            .add_savings_goal(
                &alice,
                AddSavingsGoalCommand {
                    name: "Car".to_string(),
                    target_amount: 1000.0,
                    target_date: "2026-01-01".to_string(),
                    description: None,
                },
            )
            .await
            .unwrap();

        let bad = service
            .update_savings_goal(
                &alice,
                UpdateSavingsGoalCommand {
                    goal_id: id.clone(),
                    patch: SavingsGoalPatch {
                        target_amount: Some(-5.0),
                        ..Default::default()
                    },
                },
            )
            .await;
        assert!(matches!(bad, Err(DomainError::Validation(_))));

        service
            .update_savings_goal(
                &alice,
                UpdateSavingsGoalCommand {
                    goal_id: id,
                    patch: SavingsGoalPatch {
                        description: Some("family car".to_string()),
                        ..Default::default()
                    },
                },
            )
            .await
            .unwrap();
        let goals = service.get_user_savings_goals(&alice).await.unwrap();
        assert_eq!(goals[0].goal.description.as_deref(), Some("family car"));
        assert_eq!(goals[0].goal.target_amount, 1000.0);
    }
}
