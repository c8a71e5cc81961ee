use crate::domain::models::PaymentMethod;
use shared::PaymentMethod as PaymentMethodDto;

pub struct PaymentMethodMapper;

impl PaymentMethodMapper {
    pub fn to_dto(domain: PaymentMethod) -> PaymentMethodDto {
        PaymentMethodDto {
            id: domain.id,
            name: domain.name,
            icon: domain.icon,
            is_default: domain.is_default,
        }
    }

    pub fn to_dto_list(domain_methods: Vec<PaymentMethod>) -> Vec<PaymentMethodDto> {
        domain_methods.into_iter().map(Self::to_dto).collect()
    }
}
