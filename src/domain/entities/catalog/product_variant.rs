use mongodb::bson::{oid::ObjectId, DateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 상품의 판매 단위 (사이즈/색상 조합)
///
/// `stock`은 정수로 저장되어 결제 시 `$inc`로 원자적으로 차감됩니다.
/// `price`는 정밀도 손실이 없도록 10진 문자열로 저장됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub product_id: ObjectId,

    pub size: String,

    pub color: String,

    pub stock: i64,

    pub price: Decimal,

    #[serde(default)]
    pub is_deleted: bool,

    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl ProductVariant {
    pub fn new(product_id: ObjectId, size: String, color: String, stock: i64, price: Decimal) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            product_id,
            size,
            color,
            stock,
            price,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_stock_for(&self, quantity: i64) -> bool {
        quantity > 0 && self.stock >= quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_stock_check() {
        let variant = ProductVariant::new(
            ObjectId::new(),
            "M".into(),
            "black".into(),
            3,
            Decimal::from_str("499.00").unwrap(),
        );

        assert!(variant.has_stock_for(3));
        assert!(!variant.has_stock_for(4));
        assert!(!variant.has_stock_for(0));
    }
}
