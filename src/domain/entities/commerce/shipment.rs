use std::fmt;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 배송 진행 상태
///
/// ```text
/// pending → packed → shipped → out_for_delivery → delivered
///    └────────┴─────────┴──────────────┴──→ cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    Pending,
    Packed,
    Shipped,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl ShipmentStatus {
    fn rank(&self) -> Option<u8> {
        match self {
            ShipmentStatus::Pending => Some(0),
            ShipmentStatus::Packed => Some(1),
            ShipmentStatus::Shipped => Some(2),
            ShipmentStatus::OutForDelivery => Some(3),
            ShipmentStatus::Delivered => Some(4),
            ShipmentStatus::Cancelled => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ShipmentStatus::Delivered | ShipmentStatus::Cancelled)
    }

    /// 앞으로만 진행할 수 있고, 종료 상태가 아니면 언제든 취소할 수 있습니다.
    pub fn can_transition_to(&self, next: ShipmentStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match (self.rank(), next.rank()) {
            (_, None) => true,
            (Some(current), Some(target)) => target > current,
            (None, Some(_)) => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentStatus::Pending => "pending",
            ShipmentStatus::Packed => "packed",
            ShipmentStatus::Shipped => "shipped",
            ShipmentStatus::OutForDelivery => "out_for_delivery",
            ShipmentStatus::Delivered => "delivered",
            ShipmentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 주문별 배송 상태 레코드
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shipment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub order_id: ObjectId,

    pub address_id: ObjectId,

    pub customer_id: ObjectId,

    pub status: ShipmentStatus,

    #[serde(default)]
    pub is_deleted: bool,

    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Shipment {
    pub fn new(order_id: ObjectId, address_id: ObjectId, customer_id: ObjectId) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            order_id,
            address_id,
            customer_id,
            status: ShipmentStatus::Pending,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ShipmentStatus::*;

    #[test]
    fn test_forward_transitions_allowed() {
        assert!(Pending.can_transition_to(Packed));
        assert!(Packed.can_transition_to(Shipped));
        assert!(Shipped.can_transition_to(OutForDelivery));
        assert!(OutForDelivery.can_transition_to(Delivered));
        assert!(Pending.can_transition_to(Shipped));
    }

    #[test]
    fn test_backward_and_repeated_transitions_rejected() {
        assert!(!Shipped.can_transition_to(Packed));
        assert!(!Packed.can_transition_to(Packed));
        assert!(!OutForDelivery.can_transition_to(Pending));
    }

    #[test]
    fn test_cancel_from_non_terminal_only() {
        for status in [Pending, Packed, Shipped, OutForDelivery] {
            assert!(status.can_transition_to(Cancelled), "{status} → cancelled");
        }
        assert!(!Delivered.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_string(&OutForDelivery).unwrap(), "\"out_for_delivery\"");
        let parsed: ShipmentStatus = serde_json::from_str("\"delivered\"").unwrap();
        assert_eq!(parsed, Delivered);
    }
}
