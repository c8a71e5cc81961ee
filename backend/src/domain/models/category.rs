//! Domain model for an expense category.
use serde::{Deserialize, Serialize};

use crate::domain::ownership::Owned;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub is_default: bool,
}

impl Category {
    pub const FALLBACK_NAME: &'static str = "Uncategorized";
    pub const FALLBACK_ICON: &'static str = "📦";
    pub const FALLBACK_COLOR: &'static str = "#A0A0A0";

    pub fn generate_id() -> String {
        super::generate_id("category")
    }

    /// Apply a partial update, leaving absent fields untouched
    pub fn apply(&mut self, patch: CategoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }
}

impl Owned for Category {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}
