//! 장바구니, 결제, 주문, 배송지, 배송 상태 엔티티

pub mod cart;
pub mod order;
pub mod payment;
pub mod address;
pub mod shipment;

use rust_decimal::Decimal;

pub use cart::{Cart, CartError, CartItem};
pub use order::{Order, OrderItem, PaymentMethod, PaymentStatus};
pub use payment::Payment;
pub use address::Address;
pub use shipment::{Shipment, ShipmentStatus};

/// `(단가, 수량)` 목록의 총 수량과 총액
pub fn line_totals<I>(lines: I) -> (i64, Decimal)
where
    I: IntoIterator<Item = (Decimal, i64)>,
{
    lines
        .into_iter()
        .fold((0, Decimal::ZERO), |(items, price), (unit_price, quantity)| {
            (items + quantity, price + unit_price * Decimal::from(quantity))
        })
}
