use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError};
use crate::utils::string_utils::{
    deserialize_optional_string, deserialize_trimmed, validate_object_id,
};

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::new("negative_price")
            .with_message("가격은 0 이상이어야 합니다".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 100, message = "카테고리 이름은 1-100자 사이여야 합니다"))]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 1, max = 100, message = "카테고리 이름은 1-100자 사이여야 합니다"))]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(custom(function = "validate_object_id"))]
    pub category_id: String,

    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 200, message = "상품 이름은 1-200자 사이여야 합니다"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 5000, message = "상품 설명은 5000자를 넘을 수 없습니다"))]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(custom(function = "validate_object_id"))]
    pub category_id: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 1, max = 200, message = "상품 이름은 1-200자 사이여야 합니다"))]
    pub name: Option<String>,

    #[validate(length(max = 5000, message = "상품 설명은 5000자를 넘을 수 없습니다"))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductVariantRequest {
    #[validate(custom(function = "validate_object_id"))]
    pub product_id: String,

    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 20, message = "사이즈는 1-20자 사이여야 합니다"))]
    pub size: String,

    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 40, message = "색상은 1-40자 사이여야 합니다"))]
    pub color: String,

    #[validate(range(min = 0, message = "재고는 0 이상이어야 합니다"))]
    pub stock: i64,

    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProductVariantRequest {
    #[validate(custom(function = "validate_object_id"))]
    pub product_id: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 1, max = 20, message = "사이즈는 1-20자 사이여야 합니다"))]
    pub size: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 1, max = 40, message = "색상은 1-40자 사이여야 합니다"))]
    pub color: Option<String>,

    #[validate(range(min = 0, message = "재고는 0 이상이어야 합니다"))]
    pub stock: Option<i64>,

    #[validate(custom(function = "validate_price"))]
    pub price: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_accepts_decimal_price_from_json() {
        let req: CreateProductVariantRequest = serde_json::from_str(
            r#"{"product_id": "507f1f77bcf86cd799439011", "size": " XL ", "color": "red", "stock": 5, "price": "799.90"}"#,
        )
        .unwrap();

        assert_eq!(req.size, "XL");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_variant_rejects_negative_values() {
        let req: CreateProductVariantRequest = serde_json::from_str(
            r#"{"product_id": "507f1f77bcf86cd799439011", "size": "M", "color": "red", "stock": -1, "price": "-2"}"#,
        )
        .unwrap();

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("stock"));
        assert!(fields.contains_key("price"));
    }

    #[test]
    fn test_product_requires_valid_category_id() {
        let req = CreateProductRequest {
            category_id: "nope".into(),
            name: "Hoodie".into(),
            description: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_partial_update_allows_missing_fields() {
        let req: UpdateProductVariantRequest = serde_json::from_str(r#"{"stock": 12}"#).unwrap();

        assert!(req.validate().is_ok());
        assert_eq!(req.stock, Some(12));
        assert!(req.price.is_none());
    }
}
