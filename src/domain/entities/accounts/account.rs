use std::fmt;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 계정 종류
///
/// 관리자와 고객은 서로 다른 컬렉션에 저장되며, 자격 증명과 세션은
/// 이 값으로 어느 컬렉션의 계정인지 구분합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Admin,
    Customer,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Admin => "admin",
            AccountKind::Customer => "customer",
        }
    }

    /// 인증 주체에 부여되는 역할 이름
    pub fn role(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 관리자 또는 고객 계정
///
/// `admins`와 `customers` 컬렉션이 같은 스키마를 공유합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub name: String,

    /// 소문자로 정규화된 이메일 (컬렉션 내 유일)
    pub email: String,

    #[serde(default)]
    pub is_deleted: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime>,

    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Account {
    pub fn new(name: String, email: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name,
            email,
            is_deleted: false,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AccountKind::Admin).unwrap(), "\"admin\"");

        let kind: AccountKind = serde_json::from_str("\"customer\"").unwrap();
        assert_eq!(kind, AccountKind::Customer);
        assert_eq!(kind.role(), "customer");
    }

    #[test]
    fn test_new_account_is_active() {
        let account = Account::new("Asha".into(), "asha@example.com".into());

        assert!(account.is_active());
        assert!(account.id.is_none());
        assert!(account.last_login_at.is_none());
    }
}
