use mongodb::bson::{oid::ObjectId, DateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use super::line_totals;
use crate::domain::entities::catalog::ProductVariant;
use crate::errors::AppError;

/// 장바구니 한 줄 (상품 옵션 단위)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_variant_id: ObjectId,
    pub product_id: ObjectId,
    pub size: String,
    pub color: String,
    pub unit_price: Decimal,
    pub quantity: i64,
}

impl CartItem {
    fn from_variant(variant_id: ObjectId, variant: &ProductVariant, quantity: i64) -> Self {
        Self {
            product_variant_id: variant_id,
            product_id: variant.product_id,
            size: variant.size.clone(),
            color: variant.color.clone(),
            unit_price: variant.price,
            quantity,
        }
    }

    fn refresh_from(&mut self, variant: &ProductVariant) {
        self.product_id = variant.product_id;
        self.size = variant.size.clone();
        self.color = variant.color.clone();
        self.unit_price = variant.price;
    }

    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CartError {
    #[error("재고가 부족합니다 (남은 수량: {available})")]
    OutOfStock { available: i64 },

    #[error("장바구니에 해당 상품이 없습니다")]
    LineNotFound,

    #[error("수량은 1 이상이어야 합니다")]
    InvalidQuantity,
}

impl From<CartError> for AppError {
    fn from(e: CartError) -> Self {
        match e {
            CartError::OutOfStock { .. } => AppError::ConflictError(e.to_string()),
            CartError::LineNotFound => AppError::NotFound(e.to_string()),
            CartError::InvalidQuantity => AppError::ValidationError(e.to_string()),
        }
    }
}

/// 고객별 활성 장바구니
///
/// 재고는 담을 때 확인만 하고 결제 시점에 차감합니다.
/// 모든 변경 후 `total_items`, `total_price`를 다시 계산합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub customer_id: ObjectId,

    #[serde(default)]
    pub items: Vec<CartItem>,

    pub total_items: i64,

    pub total_price: Decimal,

    #[serde(default)]
    pub is_reminded: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_date: Option<DateTime>,

    #[serde(default)]
    pub is_deleted: bool,

    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Cart {
    pub fn new(customer_id: ObjectId) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            customer_id,
            items: Vec::new(),
            total_items: 0,
            total_price: Decimal::ZERO,
            is_reminded: false,
            reminder_date: None,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn line_mut(&mut self, variant_id: &ObjectId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| &item.product_variant_id == variant_id)
    }

    /// 상품 옵션을 담습니다. 이미 있으면 수량을 더합니다.
    ///
    /// 장바구니에 이미 담긴 수량을 포함한 합계가 재고를 넘으면 거절합니다.
    pub fn add_item(&mut self, variant_id: ObjectId, variant: &ProductVariant, quantity: i64) -> Result<(), CartError> {
        if quantity < 1 {
            return Err(CartError::InvalidQuantity);
        }

        let already = self
            .items
            .iter()
            .find(|item| item.product_variant_id == variant_id)
            .map_or(0, |item| item.quantity);

        let wanted = already + quantity;
        if !variant.has_stock_for(wanted) {
            return Err(CartError::OutOfStock { available: variant.stock.max(0) });
        }

        match self.line_mut(&variant_id) {
            Some(line) => {
                line.quantity = wanted;
                line.refresh_from(variant);
            }
            None => self.items.push(CartItem::from_variant(variant_id, variant, quantity)),
        }

        self.recompute_totals();
        Ok(())
    }

    /// 이미 담긴 줄의 수량을 지정한 값으로 바꿉니다.
    pub fn set_quantity(&mut self, variant_id: ObjectId, variant: &ProductVariant, quantity: i64) -> Result<(), CartError> {
        if quantity < 1 {
            return Err(CartError::InvalidQuantity);
        }
        if !variant.has_stock_for(quantity) {
            return Err(CartError::OutOfStock { available: variant.stock.max(0) });
        }

        let line = self.line_mut(&variant_id).ok_or(CartError::LineNotFound)?;
        line.quantity = quantity;
        line.refresh_from(variant);

        self.recompute_totals();
        Ok(())
    }

    pub fn remove_item(&mut self, variant_id: &ObjectId) -> Result<(), CartError> {
        let before = self.items.len();
        self.items.retain(|item| &item.product_variant_id != variant_id);

        if self.items.len() == before {
            return Err(CartError::LineNotFound);
        }

        self.recompute_totals();
        Ok(())
    }

    pub fn recompute_totals(&mut self) {
        let (total_items, total_price) =
            line_totals(self.items.iter().map(|item| (item.unit_price, item.quantity)));

        self.total_items = total_items;
        self.total_price = total_price;
        self.updated_at = DateTime::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn variant(stock: i64, price: &str) -> ProductVariant {
        ProductVariant::new(ObjectId::new(), "L".into(), "navy".into(), stock, Decimal::from_str(price).unwrap())
    }

    #[test]
    fn test_add_creates_line_and_totals() {
        let mut cart = Cart::new(ObjectId::new());
        let shirt = variant(10, "499.50");
        let shirt_id = ObjectId::new();

        cart.add_item(shirt_id, &shirt, 2).unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total_items, 2);
        assert_eq!(cart.total_price, Decimal::from_str("999.00").unwrap());
    }

    #[test]
    fn test_adding_same_variant_increases_quantity() {
        let mut cart = Cart::new(ObjectId::new());
        let shirt = variant(10, "100");
        let shirt_id = ObjectId::new();

        cart.add_item(shirt_id, &shirt, 2).unwrap();
        cart.add_item(shirt_id, &shirt, 3).unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 5);
        assert_eq!(cart.total_items, 5);
        assert_eq!(cart.total_price, Decimal::from(500));
    }

    #[test]
    fn test_add_counts_quantity_already_in_cart_against_stock() {
        let mut cart = Cart::new(ObjectId::new());
        let cap = variant(3, "250");
        let cap_id = ObjectId::new();

        cart.add_item(cap_id, &cap, 2).unwrap();
        let err = cart.add_item(cap_id, &cap, 2).unwrap_err();

        assert_eq!(err, CartError::OutOfStock { available: 3 });
        assert_eq!(cart.total_items, 2);
    }

    #[test]
    fn test_totals_across_lines() {
        let mut cart = Cart::new(ObjectId::new());
        cart.add_item(ObjectId::new(), &variant(5, "10.25"), 2).unwrap();
        cart.add_item(ObjectId::new(), &variant(5, "3.50"), 3).unwrap();

        assert_eq!(cart.total_items, 5);
        assert_eq!(cart.total_price, Decimal::from_str("31.00").unwrap());
    }

    #[test]
    fn test_set_quantity_requires_existing_line() {
        let mut cart = Cart::new(ObjectId::new());
        let sock = variant(10, "50");

        assert_eq!(cart.set_quantity(ObjectId::new(), &sock, 1), Err(CartError::LineNotFound));

        let sock_id = ObjectId::new();
        cart.add_item(sock_id, &sock, 4).unwrap();
        cart.set_quantity(sock_id, &sock, 1).unwrap();

        assert_eq!(cart.total_items, 1);
        assert_eq!(cart.total_price, Decimal::from(50));
        assert_eq!(cart.set_quantity(sock_id, &sock, 11), Err(CartError::OutOfStock { available: 10 }));
    }

    #[test]
    fn test_remove_item_recomputes_and_reports_missing() {
        let mut cart = Cart::new(ObjectId::new());
        let sock_id = ObjectId::new();
        cart.add_item(sock_id, &variant(10, "50"), 2).unwrap();

        cart.remove_item(&sock_id).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items, 0);
        assert_eq!(cart.total_price, Decimal::ZERO);

        assert_eq!(cart.remove_item(&sock_id), Err(CartError::LineNotFound));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut cart = Cart::new(ObjectId::new());
        assert_eq!(
            cart.add_item(ObjectId::new(), &variant(10, "1"), 0),
            Err(CartError::InvalidQuantity)
        );
    }

    #[test]
    fn test_cart_error_maps_to_http_errors() {
        assert!(matches!(AppError::from(CartError::OutOfStock { available: 0 }), AppError::ConflictError(_)));
        assert!(matches!(AppError::from(CartError::LineNotFound), AppError::NotFound(_)));
        assert!(matches!(AppError::from(CartError::InvalidQuantity), AppError::ValidationError(_)));
    }
}
