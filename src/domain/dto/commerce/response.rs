use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use crate::domain::entities::commerce::{
    Address, Cart, CartItem, Order, OrderItem, Payment, PaymentMethod, PaymentStatus, Shipment,
    ShipmentStatus,
};
use crate::utils::time::to_chrono;

fn hex(id: Option<mongodb::bson::oid::ObjectId>) -> String {
    id.map(|id| id.to_hex()).unwrap_or_default()
}

#[derive(Debug, Clone, Serialize)]
pub struct CartItemResponse {
    pub product_variant_id: String,
    pub product_id: String,
    pub size: String,
    pub color: String,
    pub unit_price: Decimal,
    pub quantity: i64,
    pub line_total: Decimal,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            line_total: item.line_total(),
            product_variant_id: item.product_variant_id.to_hex(),
            product_id: item.product_id.to_hex(),
            size: item.size,
            color: item.color,
            unit_price: item.unit_price,
            quantity: item.quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CartResponse {
    pub id: String,
    pub customer_id: String,
    pub items: Vec<CartItemResponse>,
    pub total_items: i64,
    pub total_price: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            id: hex(cart.id),
            customer_id: cart.customer_id.to_hex(),
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            total_items: cart.total_items,
            total_price: cart.total_price,
            updated_at: to_chrono(cart.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderItemResponse {
    pub product_variant_id: String,
    pub product_id: String,
    pub product_name: String,
    pub size: String,
    pub color: String,
    pub unit_price: Decimal,
    pub quantity: i64,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            product_variant_id: item.product_variant_id.to_hex(),
            product_id: item.product_id.to_hex(),
            product_name: item.product_name,
            size: item.size,
            color: item.color,
            unit_price: item.unit_price,
            quantity: item.quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub customer_id: String,
    pub payment_id: String,
    pub items: Vec<OrderItemResponse>,
    pub total_items: i64,
    pub total_price: Decimal,
    pub currency: String,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub order_date: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: hex(order.id),
            customer_id: order.customer_id.to_hex(),
            payment_id: order.payment_id.to_hex(),
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
            total_items: order.total_items,
            total_price: order.total_price,
            currency: order.currency,
            payment_method: order.payment_method,
            payment_status: order.payment_status,
            order_date: to_chrono(order.order_date),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentResponse {
    pub id: String,
    pub cod: bool,
    pub method: PaymentMethod,
    pub currency: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: hex(payment.id),
            cod: payment.cod,
            method: payment.method,
            currency: payment.currency,
            amount: payment.amount,
            created_at: to_chrono(payment.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ShipmentResponse {
    pub id: String,
    pub order_id: String,
    pub address_id: String,
    pub customer_id: String,
    pub status: ShipmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Shipment> for ShipmentResponse {
    fn from(shipment: Shipment) -> Self {
        Self {
            id: hex(shipment.id),
            order_id: shipment.order_id.to_hex(),
            address_id: shipment.address_id.to_hex(),
            customer_id: shipment.customer_id.to_hex(),
            status: shipment.status,
            created_at: to_chrono(shipment.created_at),
            updated_at: to_chrono(shipment.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AddressResponse {
    pub id: String,
    pub customer_id: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub pincode: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: hex(address.id),
            customer_id: address.customer_id.to_hex(),
            street: address.street,
            city: address.city,
            state: address.state,
            phone: address.phone,
            pincode: address.pincode,
            created_at: to_chrono(address.created_at),
            updated_at: to_chrono(address.updated_at),
        }
    }
}

/// 결제(주문 생성) 결과
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub order: OrderResponse,
    pub payment: PaymentResponse,
    pub shipment: ShipmentResponse,
}
