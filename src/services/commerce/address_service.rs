use std::sync::Arc;
use mongodb::bson::{doc, Document};
use singleton_macro::service;
use crate::{
    domain::{
        dto::commerce::{AddressResponse, CreateAddressRequest, UpdateAddressRequest},
        entities::commerce::Address,
        models::auth::AuthenticatedUser,
    },
    errors::{AppError, AppResult},
    repositories::{
        commerce::{AddressRepository, AddressScope},
        common::parse_object_id,
    },
};

/// 배송지 서비스
///
/// 고객은 자기 배송지만 다루고, 관리자는 전체 목록과 개수만 조회할 수 있습니다.
#[service(name = "address")]
pub struct AddressService {
    address_repo: Arc<AddressRepository>,
}

impl AddressService {
    pub async fn create(&self, principal: &AuthenticatedUser, request: CreateAddressRequest) -> AppResult<AddressResponse> {
        let customer_id = principal.customer_id()?;

        let address = self.address_repo
            .insert(Address::new(
                customer_id,
                request.street,
                request.city,
                request.state,
                request.phone,
                request.pincode,
            ))
            .await?;

        log::info!("🏠 배송지 추가: 고객 {}", customer_id);
        Ok(AddressResponse::from(address))
    }

    pub async fn count(&self, principal: &AuthenticatedUser) -> AppResult<u64> {
        self.address_repo.count(list_scope(principal)?).await
    }

    pub async fn list(&self, principal: &AuthenticatedUser) -> AppResult<Vec<AddressResponse>> {
        let addresses = self.address_repo.find_all(list_scope(principal)?).await?;

        if addresses.is_empty() {
            return Err(not_found());
        }
        Ok(addresses.into_iter().map(AddressResponse::from).collect())
    }

    pub async fn get(&self, principal: &AuthenticatedUser, id: &str) -> AppResult<AddressResponse> {
        let id = parse_object_id(id)?;

        self.address_repo
            .find_by_id(&id, AddressScope::Customer(principal.customer_id()?))
            .await?
            .map(AddressResponse::from)
            .ok_or_else(not_found)
    }

    pub async fn update(&self, principal: &AuthenticatedUser, id: &str, request: UpdateAddressRequest) -> AppResult<AddressResponse> {
        let id = parse_object_id(id)?;
        let scope = AddressScope::Customer(principal.customer_id()?);
        let set = update_document(request)?;

        self.address_repo
            .update(&id, scope, set)
            .await?
            .map(AddressResponse::from)
            .ok_or_else(not_found)
    }

    pub async fn delete(&self, principal: &AuthenticatedUser, id: &str) -> AppResult<()> {
        let id = parse_object_id(id)?;
        let scope = AddressScope::Customer(principal.customer_id()?);

        if !self.address_repo.soft_delete(&id, scope).await? {
            return Err(not_found());
        }
        Ok(())
    }
}

fn not_found() -> AppError {
    AppError::NotFound("배송지를 찾을 수 없습니다".to_string())
}

fn list_scope(principal: &AuthenticatedUser) -> AppResult<AddressScope> {
    if principal.is_admin() {
        Ok(AddressScope::All)
    } else {
        Ok(AddressScope::Customer(principal.customer_id()?))
    }
}

fn update_document(request: UpdateAddressRequest) -> AppResult<Document> {
    let mut set = doc! {};
    let fields = [
        ("street", request.street),
        ("city", request.city),
        ("state", request.state),
        ("phone", request.phone),
        ("pincode", request.pincode),
    ];

    for (key, value) in fields {
        if let Some(value) = value {
            set.insert(key, value);
        }
    }

    if set.is_empty() {
        return Err(AppError::ValidationError("수정할 항목이 없습니다".to_string()));
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;
    use crate::domain::entities::accounts::AccountKind;

    #[test]
    fn test_admin_lists_all_addresses() {
        let admin = AuthenticatedUser::new(AccountKind::Admin, ObjectId::new(), ObjectId::new());
        assert!(matches!(list_scope(&admin), Ok(AddressScope::All)));

        let customer_id = ObjectId::new();
        let customer = AuthenticatedUser::new(AccountKind::Customer, customer_id, ObjectId::new());
        assert!(matches!(list_scope(&customer), Ok(AddressScope::Customer(id)) if id == customer_id));
    }

    #[test]
    fn test_update_document_keeps_only_present_fields() {
        let request = UpdateAddressRequest {
            city: Some("Pune".into()),
            pincode: Some("411001".into()),
            ..Default::default()
        };

        let set = update_document(request).unwrap();

        assert_eq!(set, doc! { "city": "Pune", "pincode": "411001" });
        assert!(update_document(UpdateAddressRequest::default()).is_err());
    }
}
