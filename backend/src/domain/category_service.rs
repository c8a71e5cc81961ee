//! Category management for a single owner.
//!
//! Categories are listed in insertion order. Seeded default categories are
//! never deletable, and a custom category cannot be deleted while any of its
//! owner's expenses still reference it.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::categories::{AddCategoryCommand, UpdateCategoryCommand};
use crate::domain::errors::{DomainError, DomainResult, RecordKind};
use crate::domain::identity::Identity;
use crate::domain::models::Category;
use crate::domain::ownership::ensure_owned;
use crate::domain::validation::require_text;
use crate::storage::{CategoryStorage, Connection, ExpenseStorage};

#[derive(Clone)]
pub struct CategoryService<C: Connection> {
    category_repository: C::CategoryRepository,
    expense_repository: C::ExpenseRepository,
}

impl<C: Connection> CategoryService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            category_repository: connection.create_category_repository(),
            expense_repository: connection.create_expense_repository(),
        }
    }

    pub async fn get_user_categories(&self, identity: &Identity) -> DomainResult<Vec<Category>> {
        info!("Listing categories for {}", identity.user_id());
        Ok(self.category_repository.list_categories(identity.user_id()).await?)
    }

    /// Load a category, failing with NotFound unless the caller owns it
    pub async fn get_owned_category(&self, identity: &Identity, category_id: &str) -> DomainResult<Category> {
        let category = self.category_repository.get_category(category_id).await?;
        ensure_owned(category, identity, RecordKind::Category)
    }

    pub async fn add_category(&self, identity: &Identity, command: AddCategoryCommand) -> DomainResult<String> {
        info!("Adding category for {}: {:?}", identity.user_id(), command);

        let category = Category {
            id: Category::generate_id(),
            user_id: identity.user_id().to_string(),
            name: require_text("Category name", &command.name)?,
            icon: command.icon,
            color: command.color,
            is_default: false,
        };
        self.category_repository.store_category(&category).await?;

        Ok(category.id)
    }

    pub async fn update_category(&self, identity: &Identity, command: UpdateCategoryCommand) -> DomainResult<()> {
        info!("Updating category {} for {}", command.category_id, identity.user_id());

        let mut category = self.get_owned_category(identity, &command.category_id).await?;
        let mut patch = command.patch;
        if let Some(name) = patch.name.take() {
            patch.name = Some(require_text("Category name", &name)?);
        }
        category.apply(patch);
        self.category_repository.update_category(&category).await?;

        Ok(())
    }

    pub async fn delete_category(&self, identity: &Identity, category_id: &str) -> DomainResult<()> {
        info!("Deleting category {} for {}", category_id, identity.user_id());

        let category = self.get_owned_category(identity, category_id).await?;
        if category.is_default {
            warn!("Refusing to delete default category {}", category.id);
            return Err(DomainError::Conflict(format!(
                "Category '{}' is a default category and cannot be deleted",
                category.name
            )));
        }

        let referencing = self
            .expense_repository
            .list_expenses_by_category(identity.user_id(), &category.id)
            .await?;
        if !referencing.is_empty() {
            warn!(
                "Refusing to delete category {}: {} expenses still reference it",
                category.id,
                referencing.len()
            );
            return Err(DomainError::Conflict(format!(
                "Category '{}' is used by {} expense(s) and cannot be deleted",
                category.name,
                referencing.len()
            )));
        }

        self.category_repository.delete_category(&category.id).await?;
        Ok(())
    }
}
