use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;
use crate::{
    domain::{
        dto::commerce::{AddCartItemRequest, CartResponse, UpdateCartItemRequest},
        entities::{catalog::ProductVariant, commerce::Cart},
        models::auth::AuthenticatedUser,
    },
    errors::{AppError, AppResult},
    repositories::{commerce::CartRepository, common::parse_object_id},
    services::catalog::ProductVariantService,
};

/// 고객 장바구니 서비스
///
/// 고객마다 활성 장바구니는 하나이며 첫 상품을 담을 때 만들어집니다.
#[service(name = "cart")]
pub struct CartService {
    cart_repo: Arc<CartRepository>,

    variant_service: Arc<ProductVariantService>,
}

impl CartService {
    /// 상품 옵션을 담습니다. 같은 옵션이면 수량이 늘어납니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 상품 옵션이 없거나 삭제됨
    /// * `AppError::ConflictError` - 재고 부족
    pub async fn add(&self, principal: &AuthenticatedUser, request: AddCartItemRequest) -> AppResult<CartResponse> {
        let customer_id = principal.customer_id()?;
        let variant_id = parse_object_id(&request.product_variant_id)?;
        let variant = self.variant_service.find_active(&variant_id).await?;

        let existing = self.cart_repo.find_active_by_customer(&customer_id).await?;
        let is_new = existing.is_none();
        let mut cart = existing.unwrap_or_else(|| Cart::new(customer_id));

        cart.add_item(variant_id, &variant, request.quantity)?;

        let cart = if is_new {
            match self.cart_repo.insert(cart).await {
                Ok(cart) => cart,
                // 같은 고객의 다른 요청이 먼저 장바구니를 만든 경우
                Err(AppError::ConflictError(_)) => {
                    self.add_to_existing(&customer_id, variant_id, &variant, request.quantity).await?
                }
                Err(e) => return Err(e),
            }
        } else {
            self.cart_repo.save(&cart).await?;
            cart
        };

        log::info!("🛒 장바구니 담기: 고객 {} 옵션 {} x{}", customer_id, variant_id, request.quantity);
        Ok(CartResponse::from(cart))
    }

    pub async fn update(&self, principal: &AuthenticatedUser, variant_id: &str, request: UpdateCartItemRequest) -> AppResult<CartResponse> {
        let mut cart = self.active_cart(principal).await?;
        let variant_id = parse_object_id(variant_id)?;
        let variant = self.variant_service.find_active(&variant_id).await?;

        cart.set_quantity(variant_id, &variant, request.quantity)?;
        self.cart_repo.save(&cart).await?;

        Ok(CartResponse::from(cart))
    }

    pub async fn remove(&self, principal: &AuthenticatedUser, variant_id: &str) -> AppResult<CartResponse> {
        let mut cart = self.active_cart(principal).await?;
        let variant_id = parse_object_id(variant_id)?;

        cart.remove_item(&variant_id)?;
        self.cart_repo.save(&cart).await?;

        Ok(CartResponse::from(cart))
    }

    pub async fn get(&self, principal: &AuthenticatedUser) -> AppResult<CartResponse> {
        self.active_cart(principal).await.map(CartResponse::from)
    }

    /// 활성 장바구니 수 (관리자)
    pub async fn count(&self) -> AppResult<u64> {
        self.cart_repo.count_active().await
    }

    async fn add_to_existing(
        &self,
        customer_id: &ObjectId,
        variant_id: ObjectId,
        variant: &ProductVariant,
        quantity: i64,
    ) -> AppResult<Cart> {
        let mut cart = self.cart_repo
            .find_active_by_customer(customer_id)
            .await?
            .ok_or_else(|| AppError::ConflictError("장바구니를 만들지 못했습니다. 다시 시도해 주세요".to_string()))?;

        cart.add_item(variant_id, variant, quantity)?;
        self.cart_repo.save(&cart).await?;
        Ok(cart)
    }

    async fn active_cart(&self, principal: &AuthenticatedUser) -> AppResult<Cart> {
        let customer_id = principal.customer_id()?;
        self.find_for_customer(&customer_id)
            .await?
            .ok_or_else(|| AppError::NotFound("장바구니가 없습니다".to_string()))
    }

    pub(crate) async fn find_for_customer(&self, customer_id: &ObjectId) -> AppResult<Option<Cart>> {
        self.cart_repo.find_active_by_customer(customer_id).await
    }
}
