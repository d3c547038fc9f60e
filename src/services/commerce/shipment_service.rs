use std::sync::Arc;
use singleton_macro::service;
use crate::{
    domain::{
        dto::commerce::{ShipmentResponse, UpdateShipmentStatusRequest},
        entities::commerce::{Shipment, ShipmentStatus},
        models::auth::AuthenticatedUser,
    },
    errors::{AppError, AppResult},
    repositories::{commerce::ShipmentRepository, common::parse_object_id},
};

#[service(name = "shipment")]
pub struct ShipmentService {
    shipment_repo: Arc<ShipmentRepository>,
}

impl ShipmentService {
    pub async fn list(&self) -> AppResult<Vec<ShipmentResponse>> {
        let shipments = self.shipment_repo.find_all().await?;

        if shipments.is_empty() {
            return Err(not_found());
        }
        Ok(shipments.into_iter().map(ShipmentResponse::from).collect())
    }

    /// 관리자 또는 주문한 고객만 조회할 수 있습니다.
    pub async fn get(&self, principal: &AuthenticatedUser, id: &str) -> AppResult<ShipmentResponse> {
        let id = parse_object_id(id)?;

        self.shipment_repo
            .find_by_id(&id)
            .await?
            .filter(|shipment| principal.is_admin() || shipment.customer_id.to_hex() == principal.account_id)
            .map(ShipmentResponse::from)
            .ok_or_else(not_found)
    }

    /// 배송 상태 변경 (관리자)
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 되돌리는 변경, 종료 상태에서의 변경, 동시에 다른 변경이 먼저 반영됨
    pub async fn update_status(&self, id: &str, request: UpdateShipmentStatusRequest) -> AppResult<ShipmentResponse> {
        let id = parse_object_id(id)?;

        let shipment = self.shipment_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(not_found)?;

        check_transition(&shipment, request.status)?;

        let updated = self.shipment_repo
            .transition(&id, shipment.status, request.status)
            .await?
            .ok_or_else(|| AppError::ConflictError("배송 상태가 이미 변경되었습니다".to_string()))?;

        log::info!("🚚 배송 상태 변경: {} {} → {}", id, shipment.status, request.status);
        Ok(ShipmentResponse::from(updated))
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let id = parse_object_id(id)?;

        if !self.shipment_repo.soft_delete(&id).await? {
            return Err(not_found());
        }
        Ok(())
    }
}

fn not_found() -> AppError {
    AppError::NotFound("배송 정보를 찾을 수 없습니다".to_string())
}

fn check_transition(shipment: &Shipment, next: ShipmentStatus) -> AppResult<()> {
    if shipment.status.can_transition_to(next) {
        Ok(())
    } else {
        Err(AppError::ConflictError(format!(
            "배송 상태를 {}에서 {}(으)로 바꿀 수 없습니다",
            shipment.status, next
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_check_transition() {
        let mut shipment = Shipment::new(ObjectId::new(), ObjectId::new(), ObjectId::new());

        assert!(check_transition(&shipment, ShipmentStatus::Shipped).is_ok());
        assert!(check_transition(&shipment, ShipmentStatus::Pending).is_err());

        shipment.status = ShipmentStatus::Delivered;
        assert!(matches!(
            check_transition(&shipment, ShipmentStatus::Cancelled),
            Err(AppError::ConflictError(_))
        ));
    }
}
