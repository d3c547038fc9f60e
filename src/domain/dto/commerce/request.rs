use serde::Deserialize;
use validator::Validate;
use crate::domain::entities::commerce::ShipmentStatus;
use crate::utils::string_utils::{
    deserialize_optional_string, deserialize_trimmed, validate_currency, validate_digits,
    validate_object_id,
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddCartItemRequest {
    #[validate(custom(function = "validate_object_id"))]
    pub product_variant_id: String,

    #[serde(default = "one")]
    #[validate(range(min = 1, max = 1000, message = "수량은 1-1000 사이여야 합니다"))]
    pub quantity: i64,
}

fn one() -> i64 {
    1
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCartItemRequest {
    #[validate(range(min = 1, max = 1000, message = "수량은 1-1000 사이여야 합니다"))]
    pub quantity: i64,
}

/// 장바구니 결제 요청
///
/// `currency`가 없으면 기본 통화를 사용합니다. 소문자 입력은 대문자로 바꿉니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub cash_on_delivery: bool,

    #[serde(default, deserialize_with = "deserialize_currency")]
    #[validate(custom(function = "validate_currency"))]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BuyNowRequest {
    #[validate(custom(function = "validate_object_id"))]
    pub product_variant_id: String,

    #[serde(default = "one")]
    #[validate(range(min = 1, max = 1000, message = "수량은 1-1000 사이여야 합니다"))]
    pub quantity: i64,

    #[serde(default)]
    pub cash_on_delivery: bool,

    #[serde(default, deserialize_with = "deserialize_currency")]
    #[validate(custom(function = "validate_currency"))]
    pub currency: Option<String>,
}

fn deserialize_currency<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(deserialize_optional_string(deserializer)?.map(|c| c.to_uppercase()))
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAddressRequest {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 200, message = "주소는 1-200자 사이여야 합니다"))]
    pub street: String,

    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 100, message = "도시는 1-100자 사이여야 합니다"))]
    pub city: String,

    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 100, message = "주(州)는 1-100자 사이여야 합니다"))]
    pub state: String,

    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 10, max = 15, message = "전화번호는 10-15자리여야 합니다"))]
    #[validate(custom(function = "validate_digits"))]
    pub phone: String,

    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 4, max = 10, message = "우편번호는 4-10자리여야 합니다"))]
    #[validate(custom(function = "validate_digits"))]
    pub pincode: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAddressRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 1, max = 200, message = "주소는 1-200자 사이여야 합니다"))]
    pub street: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 1, max = 100, message = "도시는 1-100자 사이여야 합니다"))]
    pub city: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 1, max = 100, message = "주(州)는 1-100자 사이여야 합니다"))]
    pub state: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 10, max = 15, message = "전화번호는 10-15자리여야 합니다"))]
    #[validate(custom(function = "validate_digits"))]
    pub phone: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 4, max = 10, message = "우편번호는 4-10자리여야 합니다"))]
    #[validate(custom(function = "validate_digits"))]
    pub pincode: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateShipmentStatusRequest {
    pub status: ShipmentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_currency_is_uppercased() {
        let req: CheckoutRequest = serde_json::from_str(r#"{"cash_on_delivery": true, "currency": " usd "}"#).unwrap();

        assert_eq!(req.currency.as_deref(), Some("USD"));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_checkout_defaults() {
        let req: CheckoutRequest = serde_json::from_str("{}").unwrap();

        assert!(!req.cash_on_delivery);
        assert!(req.currency.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_invalid_currency_rejected() {
        let req: CheckoutRequest = serde_json::from_str(r#"{"currency": "rupees"}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_add_cart_item_defaults_to_one() {
        let req: AddCartItemRequest =
            serde_json::from_str(r#"{"product_variant_id": "507f1f77bcf86cd799439011"}"#).unwrap();

        assert_eq!(req.quantity, 1);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_address_phone_and_pincode_are_digit_strings() {
        let ok: CreateAddressRequest = serde_json::from_str(
            r#"{"street": "12 MG Road", "city": "Pune", "state": "MH", "phone": "09876543210", "pincode": "411001"}"#,
        )
        .unwrap();
        assert!(ok.validate().is_ok());
        assert_eq!(ok.phone, "09876543210");

        let bad = CreateAddressRequest { phone: "98765-43210".into(), ..ok.clone() };
        assert!(bad.validate().is_err());

        let short_pin = CreateAddressRequest { pincode: "411".into(), ..ok };
        assert!(short_pin.validate().is_err());
    }

    #[test]
    fn test_shipment_status_request_parses_snake_case() {
        let req: UpdateShipmentStatusRequest = serde_json::from_str(r#"{"status": "out_for_delivery"}"#).unwrap();
        assert_eq!(req.status, ShipmentStatus::OutForDelivery);
    }
}
