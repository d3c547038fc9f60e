use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 고객 배송지
///
/// 전화번호와 우편번호는 앞자리 0을 보존하도록 숫자 문자열로 저장합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub customer_id: ObjectId,

    pub street: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub pincode: String,

    #[serde(default)]
    pub is_deleted: bool,

    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Address {
    pub fn new(
        customer_id: ObjectId,
        street: String,
        city: String,
        state: String,
        phone: String,
        pincode: String,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            customer_id,
            street,
            city,
            state,
            phone,
            pincode,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}
