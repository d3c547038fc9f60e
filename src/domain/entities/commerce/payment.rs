use mongodb::bson::{oid::ObjectId, DateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use super::PaymentMethod;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub customer_id: ObjectId,

    pub cod: bool,

    pub method: PaymentMethod,

    pub currency: String,

    pub amount: Decimal,

    #[serde(default)]
    pub is_deleted: bool,

    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Payment {
    pub fn new(customer_id: ObjectId, method: PaymentMethod, currency: String, amount: Decimal) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            customer_id,
            cod: method == PaymentMethod::CashOnDelivery,
            method,
            currency,
            amount,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}
