use std::sync::Arc;
use singleton_macro::service;
use crate::{
    domain::{
        dto::commerce::OrderResponse,
        entities::commerce::Order,
        models::auth::AuthenticatedUser,
    },
    errors::{AppError, AppResult},
    repositories::{commerce::OrderRepository, common::parse_object_id},
};

/// 주문 조회 서비스. 고객은 자기 주문만, 관리자는 전체를 봅니다.
#[service(name = "order")]
pub struct OrderService {
    order_repo: Arc<OrderRepository>,
}

impl OrderService {
    pub async fn list(&self, principal: &AuthenticatedUser) -> AppResult<Vec<OrderResponse>> {
        let orders = if principal.is_admin() {
            self.order_repo.find_all().await?
        } else {
            self.order_repo.find_by_customer(&principal.customer_id()?).await?
        };

        if orders.is_empty() {
            return Err(AppError::NotFound("주문이 없습니다".to_string()));
        }
        Ok(orders.into_iter().map(OrderResponse::from).collect())
    }

    /// 다른 고객의 주문은 존재 여부를 드러내지 않고 404로 응답합니다.
    pub async fn get(&self, principal: &AuthenticatedUser, id: &str) -> AppResult<OrderResponse> {
        let id = parse_object_id(id)?;

        self.order_repo
            .find_by_id(&id)
            .await?
            .filter(|order| visible_to(order, principal))
            .map(OrderResponse::from)
            .ok_or_else(|| AppError::NotFound("주문을 찾을 수 없습니다".to_string()))
    }
}

fn visible_to(order: &Order, principal: &AuthenticatedUser) -> bool {
    principal.is_admin() || order.customer_id.to_hex() == principal.account_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;
    use crate::domain::entities::{accounts::AccountKind, commerce::PaymentMethod};

    fn order_for(customer_id: ObjectId) -> Order {
        Order::place(customer_id, ObjectId::new(), Vec::new(), "INR".into(), PaymentMethod::CashOnDelivery)
    }

    #[test]
    fn test_customers_see_only_their_orders() {
        let owner = ObjectId::new();
        let order = order_for(owner);

        let me = AuthenticatedUser::new(AccountKind::Customer, owner, ObjectId::new());
        let other = AuthenticatedUser::new(AccountKind::Customer, ObjectId::new(), ObjectId::new());
        let admin = AuthenticatedUser::new(AccountKind::Admin, ObjectId::new(), ObjectId::new());

        assert!(visible_to(&order, &me));
        assert!(!visible_to(&order, &other));
        assert!(visible_to(&order, &admin));
    }
}
