//! 장바구니, 결제, 주문, 배송지, 배송 상태 리포지토리

pub mod cart_repo;
pub mod payment_repo;
pub mod order_repo;
pub mod address_repo;
pub mod shipment_repo;

pub use cart_repo::CartRepository;
pub use payment_repo::PaymentRepository;
pub use order_repo::OrderRepository;
pub use address_repo::{AddressRepository, AddressScope};
pub use shipment_repo::ShipmentRepository;
