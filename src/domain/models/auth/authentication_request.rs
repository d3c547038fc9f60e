/// 라우트 스코프별 인증 요구 수준
#[derive(Debug, Clone, PartialEq)]
pub enum AuthMode {
    /// 유효한 Bearer 토큰이 없으면 401
    Required,
    /// 토큰이 있으면 검증하고, 없으면 익명으로 통과
    Optional,
}

#[derive(Debug, Clone)]
pub enum RequiredRole {
    Single(String),
    Any(Vec<String>),
}

impl RequiredRole {
    pub fn admin() -> Self {
        RequiredRole::Single("admin".to_string())
    }

    pub fn customer() -> Self {
        RequiredRole::Single("customer".to_string())
    }

    pub fn is_satisfied(&self, user_roles: &[String]) -> bool {
        match self {
            RequiredRole::Single(required_role) => user_roles.contains(required_role),
            RequiredRole::Any(required_roles) => {
                required_roles.iter().any(|role| user_roles.contains(role))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_role_matching() {
        let admin_roles = vec!["admin".to_string()];
        let customer_roles = vec!["customer".to_string()];

        assert!(RequiredRole::admin().is_satisfied(&admin_roles));
        assert!(!RequiredRole::admin().is_satisfied(&customer_roles));

        let either = RequiredRole::Any(vec!["admin".into(), "customer".into()]);
        assert!(either.is_satisfied(&customer_roles));
        assert!(!either.is_satisfied(&[]));
    }
}
