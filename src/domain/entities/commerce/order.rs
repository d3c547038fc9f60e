use mongodb::bson::{oid::ObjectId, DateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use super::line_totals;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CashOnDelivery,
    Online,
}

impl PaymentMethod {
    pub fn from_cod_flag(cash_on_delivery: bool) -> Self {
        if cash_on_delivery {
            PaymentMethod::CashOnDelivery
        } else {
            PaymentMethod::Online
        }
    }

    /// 주문 생성 직후의 결제 상태
    ///
    /// 온라인 결제는 외부 결제 연동 없이 `awaiting_payment`로 기록됩니다.
    pub fn initial_status(&self) -> PaymentStatus {
        match self {
            PaymentMethod::CashOnDelivery => PaymentStatus::Pending,
            PaymentMethod::Online => PaymentStatus::AwaitingPayment,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    AwaitingPayment,
}

/// 주문 시점의 가격과 상품 정보를 고정한 주문 항목
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_variant_id: ObjectId,
    pub product_id: ObjectId,
    pub product_name: String,
    pub size: String,
    pub color: String,
    pub unit_price: Decimal,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub customer_id: ObjectId,

    pub payment_id: ObjectId,

    pub items: Vec<OrderItem>,

    pub total_items: i64,

    pub total_price: Decimal,

    pub currency: String,

    pub payment_method: PaymentMethod,

    pub payment_status: PaymentStatus,

    pub order_date: DateTime,

    #[serde(default)]
    pub is_deleted: bool,

    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Order {
    pub fn place(
        customer_id: ObjectId,
        payment_id: ObjectId,
        items: Vec<OrderItem>,
        currency: String,
        payment_method: PaymentMethod,
    ) -> Self {
        let now = DateTime::now();
        let (total_items, total_price) = order_totals(&items);

        Self {
            id: None,
            customer_id,
            payment_id,
            items,
            total_items,
            total_price,
            currency,
            payment_method,
            payment_status: payment_method.initial_status(),
            order_date: now,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}

pub fn order_totals(items: &[OrderItem]) -> (i64, Decimal) {
    line_totals(items.iter().map(|item| (item.unit_price, item.quantity)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn item(price: &str, quantity: i64) -> OrderItem {
        OrderItem {
            product_variant_id: ObjectId::new(),
            product_id: ObjectId::new(),
            product_name: "Linen Shirt".into(),
            size: "M".into(),
            color: "white".into(),
            unit_price: Decimal::from_str(price).unwrap(),
            quantity,
        }
    }

    #[test]
    fn test_cod_order_is_pending() {
        let method = PaymentMethod::from_cod_flag(true);
        let order = Order::place(ObjectId::new(), ObjectId::new(), vec![item("10", 1)], "INR".into(), method);

        assert_eq!(order.payment_method, PaymentMethod::CashOnDelivery);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn test_online_order_awaits_payment() {
        let method = PaymentMethod::from_cod_flag(false);
        let order = Order::place(ObjectId::new(), ObjectId::new(), vec![item("10", 1)], "USD".into(), method);

        assert_eq!(order.payment_status, PaymentStatus::AwaitingPayment);
    }

    #[test]
    fn test_order_totals() {
        let order = Order::place(
            ObjectId::new(),
            ObjectId::new(),
            vec![item("199.99", 2), item("0.02", 1)],
            "INR".into(),
            PaymentMethod::Online,
        );

        assert_eq!(order.total_items, 3);
        assert_eq!(order.total_price, Decimal::from_str("400.00").unwrap());
    }

    #[test]
    fn test_payment_method_wire_names() {
        assert_eq!(serde_json::to_string(&PaymentMethod::CashOnDelivery).unwrap(), "\"cash_on_delivery\"");
        assert_eq!(serde_json::to_string(&PaymentStatus::AwaitingPayment).unwrap(), "\"awaiting_payment\"");
    }
}
