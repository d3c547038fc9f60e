//! # 결제(주문 생성) 서비스
//!
//! 장바구니 전체 결제와 단일 상품 바로 구매를 처리합니다.
//!
//! ```text
//! 고객 확인 ─▶ 배송지 확인 ─▶ 장바구니 확보(원자적 삭제 표시)
//!          ─▶ 현재 가격으로 주문 항목 구성
//!          ─▶ 재고 차감 (줄마다 원자적, 실패 시 앞선 차감 복구 후 409)
//!          ─▶ Payment ─▶ Order ─▶ Shipment(pending)
//! ```
//!
//! 어느 단계든 실패하면 차감한 재고, 결제/주문 레코드, 장바구니를 되돌립니다.
//! 같은 장바구니로 동시에 들어온 결제는 하나만 장바구니를 확보합니다.

use std::sync::Arc;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;
use crate::{
    config::CommerceConfig,
    domain::{
        dto::commerce::{BuyNowRequest, CheckoutRequest, CheckoutResponse, OrderResponse, PaymentResponse, ShipmentResponse},
        entities::commerce::{order::order_totals, Address, Order, OrderItem, Payment, PaymentMethod, Shipment},
        models::auth::AuthenticatedUser,
    },
    errors::{AppError, AppResult},
    repositories::{
        accounts::{AccountStore, CustomerRepository},
        catalog::{ProductRepository, ProductVariantRepository, StockLedger},
        commerce::{AddressRepository, CartRepository, OrderRepository, PaymentRepository, ShipmentRepository},
        common::parse_object_id,
    },
};

/// 주문할 한 줄: (상품 옵션 ID, 수량)
type Line = (ObjectId, i64);

/// 주문 기록 단계의 쓰기와 그 보상 작업
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert_payment(&self, payment: Payment) -> AppResult<Payment>;

    async fn insert_order(&self, order: Order) -> AppResult<Order>;

    async fn insert_shipment(&self, shipment: Shipment) -> AppResult<Shipment>;

    async fn void_payment(&self, payment_id: &ObjectId) -> AppResult<bool>;

    async fn void_order(&self, order_id: &ObjectId) -> AppResult<bool>;
}

/// 재고 차감 전까지 확정된 주문 내용
struct OrderDraft {
    customer_id: ObjectId,
    address_id: ObjectId,
    items: Vec<OrderItem>,
    method: PaymentMethod,
    currency: String,
}

impl OrderDraft {
    fn lines(&self) -> Vec<Line> {
        self.items
            .iter()
            .map(|item| (item.product_variant_id, item.quantity))
            .collect()
    }
}

#[service(name = "checkout")]
pub struct CheckoutService {
    customer_repo: Arc<CustomerRepository>,

    address_repo: Arc<AddressRepository>,

    cart_repo: Arc<CartRepository>,

    product_repo: Arc<ProductRepository>,

    variant_repo: Arc<ProductVariantRepository>,

    payment_repo: Arc<PaymentRepository>,

    order_repo: Arc<OrderRepository>,

    shipment_repo: Arc<ShipmentRepository>,
}

impl CheckoutService {
    /// 장바구니 전체 결제
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 고객, 배송지, 장바구니(또는 빈 장바구니), 상품 옵션 없음
    /// * `AppError::ConflictError` - 재고 부족
    pub async fn checkout(&self, principal: &AuthenticatedUser, request: CheckoutRequest) -> AppResult<CheckoutResponse> {
        let customer_id = principal.customer_id()?;
        let address = self.prepare(&customer_id).await?;

        let cart = self.cart_repo
            .claim_for_checkout(&customer_id)
            .await?
            .ok_or_else(|| AppError::NotFound("장바구니가 비어 있습니다".to_string()))?;
        let cart_id = cart
            .id
            .ok_or_else(|| AppError::InternalError("장바구니 ID가 없습니다".to_string()))?;

        let lines: Vec<Line> = cart
            .items
            .iter()
            .map(|item| (item.product_variant_id, item.quantity))
            .collect();

        match self.place(customer_id, &address, &lines, request.cash_on_delivery, request.currency).await {
            Ok(response) => Ok(response),
            Err(e) => {
                self.release_cart(&cart_id).await;
                Err(e)
            }
        }
    }

    /// 장바구니 없이 상품 옵션 하나를 바로 구매
    pub async fn buy_now(&self, principal: &AuthenticatedUser, request: BuyNowRequest) -> AppResult<CheckoutResponse> {
        let customer_id = principal.customer_id()?;
        let variant_id = parse_object_id(&request.product_variant_id)?;
        let address = self.prepare(&customer_id).await?;

        self.place(
            customer_id,
            &address,
            &[(variant_id, request.quantity)],
            request.cash_on_delivery,
            request.currency,
        )
        .await
    }

    /// 고객과 배송지 확인
    async fn prepare(&self, customer_id: &ObjectId) -> AppResult<Address> {
        self.customer_repo
            .find_active_by_id(customer_id)
            .await?
            .ok_or_else(|| AppError::NotFound("고객을 찾을 수 없습니다".to_string()))?;

        self.address_repo
            .find_latest_for_customer(customer_id)
            .await?
            .ok_or_else(|| AppError::NotFound("배송지를 찾을 수 없습니다".to_string()))
    }

    async fn place(
        &self,
        customer_id: ObjectId,
        address: &Address,
        lines: &[Line],
        cash_on_delivery: bool,
        currency: Option<String>,
    ) -> AppResult<CheckoutResponse> {
        let address_id = address
            .id
            .ok_or_else(|| AppError::InternalError("배송지 ID가 없습니다".to_string()))?;

        let draft = OrderDraft {
            customer_id,
            address_id,
            items: self.order_items(lines).await?,
            method: PaymentMethod::from_cod_flag(cash_on_delivery),
            currency: resolve_currency(currency, &CommerceConfig::default_currency()),
        };

        let response = commit(self.variant_repo.as_ref(), self, draft).await?;

        log::info!(
            "🧾 주문 생성: 고객 {} 주문 {} 합계 {} {}",
            customer_id, response.order.id, response.order.total_price, response.order.currency
        );
        Ok(response)
    }

    /// 현재 상품 옵션/상품 정보로 주문 항목을 만듭니다.
    async fn order_items(&self, lines: &[Line]) -> AppResult<Vec<OrderItem>> {
        let mut items = Vec::with_capacity(lines.len());

        for &(variant_id, quantity) in lines {
            let variant = self.variant_repo
                .find_by_id(&variant_id)
                .await?
                .ok_or_else(|| AppError::NotFound("상품 옵션을 찾을 수 없습니다".to_string()))?;

            if !variant.has_stock_for(quantity) {
                return Err(out_of_stock(&variant_id));
            }

            let product = self.product_repo
                .find_by_id(&variant.product_id)
                .await?
                .ok_or_else(|| AppError::NotFound("상품을 찾을 수 없습니다".to_string()))?;

            items.push(OrderItem {
                product_variant_id: variant_id,
                product_id: variant.product_id,
                product_name: product.name,
                size: variant.size,
                color: variant.color,
                unit_price: variant.price,
                quantity,
            });
        }

        Ok(items)
    }

    async fn release_cart(&self, cart_id: &ObjectId) {
        match self.cart_repo.release(cart_id).await {
            Ok(true) => log::info!("↩️ 결제 실패로 장바구니 복구: {}", cart_id),
            Ok(false) => log::warn!("복구할 장바구니가 없습니다: {}", cart_id),
            Err(e) => log::error!("❌ 장바구니 복구 실패 {}: {}", cart_id, e),
        }
    }
}

#[async_trait]
impl OrderStore for CheckoutService {
    async fn insert_payment(&self, payment: Payment) -> AppResult<Payment> {
        self.payment_repo.insert(payment).await
    }

    async fn insert_order(&self, order: Order) -> AppResult<Order> {
        self.order_repo.insert(order).await
    }

    async fn insert_shipment(&self, shipment: Shipment) -> AppResult<Shipment> {
        self.shipment_repo.insert(shipment).await
    }

    async fn void_payment(&self, payment_id: &ObjectId) -> AppResult<bool> {
        self.payment_repo.soft_delete(payment_id).await
    }

    async fn void_order(&self, order_id: &ObjectId) -> AppResult<bool> {
        self.order_repo.soft_delete(order_id).await
    }
}

/// 재고를 차감하고 주문을 기록합니다. 기록에 실패하면 차감한 재고를 되돌립니다.
async fn commit(ledger: &dyn StockLedger, store: &dyn OrderStore, draft: OrderDraft) -> AppResult<CheckoutResponse> {
    let lines = draft.lines();

    reserve_stock(ledger, &lines).await?;

    match record(store, draft).await {
        Ok(response) => Ok(response),
        Err(e) => {
            log::error!("❌ 주문 저장 실패, 재고 복구: {}", e);
            restore_stock(ledger, &lines).await;
            Err(e)
        }
    }
}

/// 줄마다 재고를 차감합니다. 중간에 실패하면 앞서 차감한 줄을 복구합니다.
async fn reserve_stock(ledger: &dyn StockLedger, lines: &[Line]) -> AppResult<()> {
    for (index, &(variant_id, quantity)) in lines.iter().enumerate() {
        let decremented = match ledger.decrement(&variant_id, quantity).await {
            Ok(decremented) => decremented,
            Err(e) => {
                restore_stock(ledger, &lines[..index]).await;
                return Err(e);
            }
        };

        if !decremented {
            log::warn!("재고 부족으로 결제 거절: 옵션 {} x{}", variant_id, quantity);
            restore_stock(ledger, &lines[..index]).await;
            return Err(out_of_stock(&variant_id));
        }
    }
    Ok(())
}

async fn restore_stock(ledger: &dyn StockLedger, lines: &[Line]) {
    for &(variant_id, quantity) in lines {
        if let Err(e) = ledger.restore(&variant_id, quantity).await {
            log::error!("❌ 재고 복구 실패: 옵션 {} x{}: {}", variant_id, quantity, e);
        }
    }
}

/// Payment → Order → Shipment 순서로 기록합니다. 뒤 단계가 실패하면 앞의 레코드를 무효화합니다.
async fn record(store: &dyn OrderStore, draft: OrderDraft) -> AppResult<CheckoutResponse> {
    let OrderDraft { customer_id, address_id, items, method, currency } = draft;
    let (_, amount) = order_totals(&items);

    let payment = store
        .insert_payment(Payment::new(customer_id, method, currency.clone(), amount))
        .await?;
    let payment_id = payment
        .id
        .ok_or_else(|| AppError::InternalError("결제 ID가 없습니다".to_string()))?;

    let order = match store
        .insert_order(Order::place(customer_id, payment_id, items, currency, method))
        .await
    {
        Ok(order) => order,
        Err(e) => {
            void_payment(store, &payment_id).await;
            return Err(e);
        }
    };

    let Some(order_id) = order.id else {
        void_payment(store, &payment_id).await;
        return Err(AppError::InternalError("주문 ID가 없습니다".to_string()));
    };

    let shipment = match store
        .insert_shipment(Shipment::new(order_id, address_id, customer_id))
        .await
    {
        Ok(shipment) => shipment,
        Err(e) => {
            if let Err(void_err) = store.void_order(&order_id).await {
                log::error!("❌ 주문 무효화 실패 {}: {}", order_id, void_err);
            }
            void_payment(store, &payment_id).await;
            return Err(e);
        }
    };

    Ok(CheckoutResponse {
        order: OrderResponse::from(order),
        payment: PaymentResponse::from(payment),
        shipment: ShipmentResponse::from(shipment),
    })
}

async fn void_payment(store: &dyn OrderStore, payment_id: &ObjectId) {
    if let Err(e) = store.void_payment(payment_id).await {
        log::error!("❌ 결제 레코드 무효화 실패 {}: {}", payment_id, e);
    }
}

fn out_of_stock(variant_id: &ObjectId) -> AppError {
    AppError::ConflictError(format!("재고가 부족합니다: {}", variant_id))
}

/// 요청 통화, 없으면 기본 통화
fn resolve_currency(requested: Option<String>, default_currency: &str) -> String {
    requested
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| default_currency.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use rust_decimal::Decimal;

    /// 메모리 재고. `broken`에 든 옵션은 DB 오류를 냅니다.
    struct MemoryStock {
        stock: Mutex<HashMap<ObjectId, i64>>,
        broken: Option<ObjectId>,
    }

    impl MemoryStock {
        fn new(levels: &[(ObjectId, i64)]) -> Self {
            Self {
                stock: Mutex::new(levels.iter().copied().collect()),
                broken: None,
            }
        }

        fn level(&self, id: &ObjectId) -> i64 {
            self.stock.lock().unwrap()[id]
        }
    }

    #[async_trait]
    impl StockLedger for MemoryStock {
        async fn decrement(&self, variant_id: &ObjectId, quantity: i64) -> AppResult<bool> {
            if self.broken == Some(*variant_id) {
                return Err(AppError::DatabaseError("connection reset".to_string()));
            }
            let mut stock = self.stock.lock().unwrap();
            let level = stock.entry(*variant_id).or_insert(0);
            if *level < quantity {
                return Ok(false);
            }
            *level -= quantity;
            Ok(true)
        }

        async fn restore(&self, variant_id: &ObjectId, quantity: i64) -> AppResult<()> {
            *self.stock.lock().unwrap().entry(*variant_id).or_insert(0) += quantity;
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemoryOrders {
        fail_order: bool,
        fail_shipment: bool,
        voided_payments: Mutex<Vec<ObjectId>>,
        voided_orders: Mutex<Vec<ObjectId>>,
    }

    #[async_trait]
    impl OrderStore for MemoryOrders {
        async fn insert_payment(&self, mut payment: Payment) -> AppResult<Payment> {
            payment.id = Some(ObjectId::new());
            Ok(payment)
        }

        async fn insert_order(&self, mut order: Order) -> AppResult<Order> {
            if self.fail_order {
                return Err(AppError::DatabaseError("orders unavailable".to_string()));
            }
            order.id = Some(ObjectId::new());
            Ok(order)
        }

        async fn insert_shipment(&self, mut shipment: Shipment) -> AppResult<Shipment> {
            if self.fail_shipment {
                return Err(AppError::DatabaseError("shipments unavailable".to_string()));
            }
            shipment.id = Some(ObjectId::new());
            Ok(shipment)
        }

        async fn void_payment(&self, payment_id: &ObjectId) -> AppResult<bool> {
            self.voided_payments.lock().unwrap().push(*payment_id);
            Ok(true)
        }

        async fn void_order(&self, order_id: &ObjectId) -> AppResult<bool> {
            self.voided_orders.lock().unwrap().push(*order_id);
            Ok(true)
        }
    }

    fn item(variant_id: ObjectId, quantity: i64) -> OrderItem {
        OrderItem {
            product_variant_id: variant_id,
            product_id: ObjectId::new(),
            product_name: "Runner".to_string(),
            size: "M".to_string(),
            color: "black".to_string(),
            unit_price: Decimal::new(1999, 2),
            quantity,
        }
    }

    fn draft(items: Vec<OrderItem>) -> OrderDraft {
        OrderDraft {
            customer_id: ObjectId::new(),
            address_id: ObjectId::new(),
            items,
            method: PaymentMethod::CashOnDelivery,
            currency: "INR".to_string(),
        }
    }

    #[test]
    fn test_resolve_currency_defaults() {
        assert_eq!(resolve_currency(None, "INR"), "INR");
        assert_eq!(resolve_currency(Some("usd".into()), "INR"), "USD");
        assert_eq!(resolve_currency(Some(" ".into()), "INR"), "INR");
    }

    #[test]
    fn test_out_of_stock_is_conflict() {
        assert!(matches!(out_of_stock(&ObjectId::new()), AppError::ConflictError(_)));
    }

    #[actix_web::test]
    async fn test_reserve_stock_restores_earlier_lines_when_one_runs_out() {
        let (a, b, c) = (ObjectId::new(), ObjectId::new(), ObjectId::new());
        let ledger = MemoryStock::new(&[(a, 5), (b, 3), (c, 1)]);

        let result = reserve_stock(&ledger, &[(a, 2), (b, 3), (c, 2)]).await;

        assert!(matches!(result, Err(AppError::ConflictError(_))));
        assert_eq!(ledger.level(&a), 5);
        assert_eq!(ledger.level(&b), 3);
        assert_eq!(ledger.level(&c), 1);
    }

    #[actix_web::test]
    async fn test_reserve_stock_restores_earlier_lines_on_store_error() {
        let (a, b) = (ObjectId::new(), ObjectId::new());
        let mut ledger = MemoryStock::new(&[(a, 4), (b, 4)]);
        ledger.broken = Some(b);

        let result = reserve_stock(&ledger, &[(a, 1), (b, 1)]).await;

        assert!(matches!(result, Err(AppError::DatabaseError(_))));
        assert_eq!(ledger.level(&a), 4);
    }

    #[actix_web::test]
    async fn test_commit_decrements_stock_and_records_everything() {
        let a = ObjectId::new();
        let ledger = MemoryStock::new(&[(a, 5)]);
        let store = MemoryOrders::default();

        let response = commit(&ledger, &store, draft(vec![item(a, 2)])).await.unwrap();

        assert_eq!(ledger.level(&a), 3);
        assert!(!response.order.id.is_empty());
        assert!(!response.shipment.id.is_empty());
        assert!(store.voided_payments.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_failed_order_voids_payment_and_restores_stock() {
        let a = ObjectId::new();
        let ledger = MemoryStock::new(&[(a, 5)]);
        let store = MemoryOrders { fail_order: true, ..Default::default() };

        let result = commit(&ledger, &store, draft(vec![item(a, 2)])).await;

        assert!(matches!(result, Err(AppError::DatabaseError(_))));
        assert_eq!(ledger.level(&a), 5);
        assert_eq!(store.voided_payments.lock().unwrap().len(), 1);
        assert!(store.voided_orders.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_failed_shipment_voids_order_and_payment() {
        let (a, b) = (ObjectId::new(), ObjectId::new());
        let ledger = MemoryStock::new(&[(a, 5), (b, 2)]);
        let store = MemoryOrders { fail_shipment: true, ..Default::default() };

        let result = commit(&ledger, &store, draft(vec![item(a, 1), item(b, 2)])).await;

        assert!(result.is_err());
        assert_eq!(ledger.level(&a), 5);
        assert_eq!(ledger.level(&b), 2);
        assert_eq!(store.voided_orders.lock().unwrap().len(), 1);
        assert_eq!(store.voided_payments.lock().unwrap().len(), 1);
    }
}
