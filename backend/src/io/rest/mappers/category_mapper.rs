use crate::domain::models::{Category, CategoryPatch};
use shared::{Category as CategoryDto, UpdateCategoryRequest};

pub struct CategoryMapper;

impl CategoryMapper {
    /// Convert a stored category to its DTO
    pub fn to_dto(domain: Category) -> CategoryDto {
        CategoryDto {
            id: domain.id,
            name: domain.name,
            icon: domain.icon,
            color: domain.color,
            is_default: domain.is_default,
        }
    }

    pub fn to_dto_list(domain_categories: Vec<Category>) -> Vec<CategoryDto> {
        domain_categories.into_iter().map(Self::to_dto).collect()
    }

    /// Convert an update request to a domain patch
    pub fn to_patch(request: UpdateCategoryRequest) -> CategoryPatch {
        CategoryPatch {
            name: request.name,
            icon: request.icon,
            color: request.color,
        }
    }
}
