//! User service: identity resolution, profile and preferences, lifetime stats.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::aggregation::{self, LifetimeStats};
use crate::domain::commands::users::UpdateProfileCommand;
use crate::domain::errors::{DomainError, DomainResult, RecordKind};
use crate::domain::identity::Identity;
use crate::domain::models::{User, UserProfile};
use crate::domain::validation::require_text;
use crate::storage::{CategoryStorage, Connection, ExpenseStorage, ProfileStorage, UserStorage};
use shared::UserPreferences;

#[derive(Clone)]
pub struct UserService<C: Connection> {
    user_repository: C::UserRepository,
    profile_repository: C::ProfileRepository,
    expense_repository: C::ExpenseRepository,
    category_repository: C::CategoryRepository,
    default_preferences: UserPreferences,
}

impl<C: Connection> UserService<C> {
    pub fn new(connection: Arc<C>, default_preferences: UserPreferences) -> Self {
        Self {
            user_repository: connection.create_user_repository(),
            profile_repository: connection.create_profile_repository(),
            expense_repository: connection.create_expense_repository(),
            category_repository: connection.create_category_repository(),
            default_preferences,
        }
    }

    /// Resolve a caller id into an [`Identity`].
    ///
    /// Fails with `Unauthenticated` when no id is given or it names no user.
    pub async fn authenticate(&self, user_id: Option<&str>) -> DomainResult<Identity> {
        let user_id = match user_id.map(str::trim) {
            Some(id) if !id.is_empty() => id,
            _ => return Err(DomainError::Unauthenticated),
        };

        match self.user_repository.get_user(user_id).await? {
            Some(user) => Ok(Identity::new(user.id)),
            None => {
                warn!("Rejecting unknown caller id {}", user_id);
                Err(DomainError::Unauthenticated)
            }
        }
    }

    pub async fn get_user(&self, identity: &Identity) -> DomainResult<User> {
        self.user_repository
            .get_user(identity.user_id())
            .await?
            .ok_or(DomainError::NotFound(RecordKind::User))
    }

    /// Patch name and phone on the user record and store preferences on the profile
    pub async fn update_profile(&self, identity: &Identity, command: UpdateProfileCommand) -> DomainResult<()> {
        info!("Updating profile for {}", identity.user_id());

        if command.name.is_some() || command.phone.is_some() {
            let mut user = self.get_user(identity).await?;
            if let Some(name) = &command.name {
                user.name = require_text("Name", name)?;
            }
            if let Some(phone) = command.phone {
                user.phone = Some(phone);
            }
            self.user_repository.update_user(&user).await?;
        }

        if let Some(preferences) = command.preferences {
            debug!("Storing preferences for {}", identity.user_id());
            self.profile_repository
                .upsert_profile(&UserProfile {
                    user_id: identity.user_id().to_string(),
                    preferences,
                })
                .await?;
        }

        Ok(())
    }

    /// Stored preferences, or the configured defaults when no profile exists
    pub async fn get_user_preferences(&self, identity: &Identity) -> DomainResult<UserPreferences> {
        let profile = self.profile_repository.get_profile(identity.user_id()).await?;
        Ok(profile
            .map(|p| p.preferences)
            .unwrap_or_else(|| self.default_preferences.clone()))
    }

    pub async fn get_user_stats(&self, identity: &Identity) -> DomainResult<LifetimeStats> {
        info!("Lifetime stats for {}", identity.user_id());

        let expenses = self.expense_repository.list_expenses(identity.user_id()).await?;
        let categories = self.category_repository.list_categories(identity.user_id()).await?;
        debug!("Aggregating {} expenses", expenses.len());

        Ok(aggregation::lifetime_stats(&expenses, &categories))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Expense;
    use crate::storage::DbConnection;
    use shared::{NotificationPreferences, PrivacyPreferences};

    fn defaults() -> UserPreferences {
        UserPreferences {
            currency: "BRL".to_string(),
            language: "pt-BR".to_string(),
            timezone: "America/Sao_Paulo".to_string(),
            notifications: NotificationPreferences {
                budget_alerts: true,
                weekly_reports: true,
                monthly_reports: true,
                goal_reminders: true,
            },
            privacy: PrivacyPreferences {
                share_data: false,
                analytics: true,
                marketing: false,
            },
        }
    }

    async fn create_test_service() -> (UserService<DbConnection>, Arc<DbConnection>) {
        let connection = Arc::new(DbConnection::init_test().await.unwrap());
        connection
            .create_user_repository()
            .store_user(&User {
                id: "user::alice".to_string(),
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                phone: None,
                created_at: "2024-01-01T00:00:00+00:00".to_string(),
            })
            .await
            .unwrap();
        (UserService::new(connection.clone(), defaults()), connection)
    }

    #[tokio::test]
    async fn test_authenticate() {
        let (service, _) = create_test_service().await;

        let identity = service.authenticate(Some("user::alice")).await.unwrap();
        assert_eq!(identity.user_id(), "user::alice");

        assert!(matches!(service.authenticate(None).await, Err(DomainError::Unauthenticated)));
        assert!(matches!(service.authenticate(Some("  ")).await, Err(DomainError::Unauthenticated)));
        assert!(matches!(
            service.authenticate(Some("user::ghost")).await,
            Err(DomainError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn test_preferences_default_until_profile_written() {
        let (service, connection) = create_test_service().await;
        let alice = Identity::new("user::alice");

        assert_eq!(service.get_user_preferences(&alice).await.unwrap(), defaults());
        assert!(connection
            .create_profile_repository()
            .get_profile("user::alice")
            .await
            .unwrap()
            .is_none());

        let mut custom = defaults();
        custom.currency = "EUR".to_string();
        custom.privacy.marketing = true;
        service
            .update_profile(
                &alice,
                UpdateProfileCommand {
                    preferences: Some(custom.clone()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(service.get_user_preferences(&alice).await.unwrap(), custom);
    }

    #[tokio::test]
    async fn test_update_profile_patches_user_record() {
        let (service, _) = create_test_service().await;
        let alice = Identity::new("user::alice");

        service
            .update_profile(
                &alice,
                UpdateProfileCommand {
                    phone: Some("+55 11 98888-7777".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let user = service.get_user(&alice).await.unwrap();
        assert_eq!(user.name, "Alice");
        assert_eq!(user.phone.as_deref(), Some("+55 11 98888-7777"));

        let empty_name = service
            .update_profile(
                &alice,
                UpdateProfileCommand {
                    name: Some("".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(empty_name, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_user_stats_only_count_own_expenses() {
        let (service, connection) = create_test_service().await;
        let repo = connection.create_expense_repository();
        for (id, user_id, amount) in [("expense::1", "user::alice", 10.0), ("expense::2", "user::bob", 99.0)] {
            repo.store_expense(&Expense {
                id: id.to_string(),
                user_id: user_id.to_string(),
                name: "Coffee".to_string(),
                amount,
                category_id: "category::x".to_string(),
                date: "2024-01-02".to_string(),
                payment_method: "Cash".to_string(),
                description: None,
                tags: vec![],
                receipt_ref: None,
            })
            .await
            .unwrap();
        }

        let stats = service.get_user_stats(&Identity::new("user::alice")).await.unwrap();
        assert_eq!(stats.total_expenses, 1);
        assert_eq!(stats.total_amount, 10.0);
        assert_eq!(stats.top_categories[0].label.name, "Uncategorized");
    }
}
