//! Payment methods for a single owner.
//!
//! Expenses reference payment methods by name, not by id, so nothing here
//! touches expense rows.

use std::sync::Arc;
use tracing::info;

use crate::domain::commands::payment_methods::AddPaymentMethodCommand;
use crate::domain::errors::DomainResult;
use crate::domain::identity::Identity;
use crate::domain::models::PaymentMethod;
use crate::domain::validation::require_text;
use crate::storage::{Connection, PaymentMethodStorage};

#[derive(Clone)]
pub struct PaymentMethodService<C: Connection> {
    payment_method_repository: C::PaymentMethodRepository,
}

impl<C: Connection> PaymentMethodService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            payment_method_repository: connection.create_payment_method_repository(),
        }
    }

    pub async fn get_user_payment_methods(&self, identity: &Identity) -> DomainResult<Vec<PaymentMethod>> {
        info!("Listing payment methods for {}", identity.user_id());
        Ok(self
            .payment_method_repository
            .list_payment_methods(identity.user_id())
            .await?)
    }

    pub async fn add_payment_method(
        &self,
        identity: &Identity,
        command: AddPaymentMethodCommand,
    ) -> DomainResult<String> {
        info!("Adding payment method for {}: {:?}", identity.user_id(), command);

        let payment_method = PaymentMethod {
            id: PaymentMethod::generate_id(),
            user_id: identity.user_id().to_string(),
            name: require_text("Payment method name", &command.name)?,
            icon: command.icon,
            is_default: false,
        };
        self.payment_method_repository
            .store_payment_method(&payment_method)
            .await?;

        Ok(payment_method.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use crate::storage::DbConnection;

    async fn create_test_service() -> PaymentMethodService<DbConnection> {
        let connection = Arc::new(DbConnection::init_test().await.unwrap());
        PaymentMethodService::new(connection)
    }

    #[tokio::test]
    async fn test_payment_methods_are_scoped_to_owner() {
        let service = create_test_service().await;
        let alice = Identity::new("user::alice");
        let bob = Identity::new("user::bob");

        let command = AddPaymentMethodCommand {
            name: "Meal voucher".to_string(),
            icon: "🎫".to_string(),
        };
        let id = service.add_payment_method(&alice, command).await.unwrap();

        let mine = service.get_user_payment_methods(&alice).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, id);
        assert!(!mine[0].is_default);
        assert!(service.get_user_payment_methods(&bob).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_payment_method_requires_name() {
        let service = create_test_service().await;
        let command = AddPaymentMethodCommand {
            name: "".to_string(),
            icon: "🎫".to_string(),
        };
        let err = service
            .add_payment_method(&Identity::new("user::alice"), command)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
