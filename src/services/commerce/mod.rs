//! 장바구니, 결제, 주문, 배송지, 배송 상태 서비스

pub mod cart_service;
pub mod checkout_service;
pub mod order_service;
pub mod address_service;
pub mod shipment_service;

pub use cart_service::CartService;
pub use checkout_service::CheckoutService;
pub use order_service::OrderService;
pub use address_service::AddressService;
pub use shipment_service::ShipmentService;
