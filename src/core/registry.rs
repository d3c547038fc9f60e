//! # Service Registry
//!
//! `#[service]` / `#[repository]` 매크로가 `inventory`에 제출한 생성자들을 모아
//! 타입 기반으로 싱글톤 인스턴스를 해석하는 의존성 주입 컨테이너입니다.
//!
//! ## 해석 규칙
//!
//! 타입 이름의 접미사(`Service` / `Repository`)를 떼고 소문자·언더스코어 제거로
//! 정규화한 키와, 등록 이름(`product_variant_repository` 등)을 같은 방식으로
//! 정규화한 키를 비교합니다.
//!
//! | 타입 | 정규화 키 | 매칭되는 등록 이름 |
//! |------|-----------|--------------------|
//! | `ProductVariantRepository` | `productvariant` | `product_variant_repository` |
//! | `CheckoutService` | `checkout` | `checkout_service` |
//!
//! 매크로로 만들 수 없는 인프라 객체(`Database`, `RedisClient`)는
//! 애플리케이션 시작 시 [`ServiceLocator::set`]으로 직접 등록합니다.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use crate::utils::display_terminal::{
    print_boxed_title, print_cache_initialized, print_final_summary, print_step_complete,
    print_step_start, print_sub_task,
};

#[async_trait]
pub trait Service: Send + Sync {
    fn name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

#[async_trait]
pub trait Repository: Send + Sync {
    fn name(&self) -> &str;

    fn collection_name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

pub struct ServiceRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

/// 컴포넌트 종류별 접미사
#[derive(Debug, Clone, Copy, PartialEq)]
enum ComponentKind {
    Service,
    Repository,
}

impl ComponentKind {
    fn type_suffix(self) -> &'static str {
        match self {
            ComponentKind::Service => "Service",
            ComponentKind::Repository => "Repository",
        }
    }

    fn registration_suffix(self) -> &'static str {
        match self {
            ComponentKind::Service => "_service",
            ComponentKind::Repository => "_repository",
        }
    }
}

static SERVICE_NAME_CACHE: Lazy<HashMap<String, &'static ServiceRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<ServiceRegistration>()
        .map(|r| (registration_key(r.name, ComponentKind::Service), r))
        .collect();

    print_cache_initialized("Service", cache.len());
    cache
});

static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, &'static RepositoryRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<RepositoryRegistration>()
        .map(|r| (registration_key(r.name, ComponentKind::Repository), r))
        .collect();

    print_cache_initialized("Repository", cache.len());
    cache
});

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// 등록 이름 → 조회 키 (`product_variant_repository` → `productvariant`)
fn registration_key(name: &str, kind: ComponentKind) -> String {
    normalize(name.strip_suffix(kind.registration_suffix()).unwrap_or(name))
}

/// 타입 경로 → (컴포넌트 종류, 조회 키)
fn type_key(type_name: &str) -> Option<(ComponentKind, String)> {
    let short = type_name.rsplit("::").next().unwrap_or(type_name);

    [ComponentKind::Repository, ComponentKind::Service]
        .into_iter()
        .find_map(|kind| {
            short
                .strip_suffix(kind.type_suffix())
                .map(|entity| (kind, normalize(entity)))
        })
}

pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    initializing: RwLock<HashSet<TypeId>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    fn cached<T: 'static + Send + Sync>(&self) -> Option<Arc<T>> {
        let instances = self.instances.read().unwrap_or_else(|e| e.into_inner());
        instances
            .get(&TypeId::of::<T>())
            .and_then(|instance| instance.clone().downcast::<T>().ok())
    }

    /// 타입 `T`의 싱글톤을 반환합니다.
    ///
    /// 캐시에 없으면 등록된 생성자로 만들고 캐시에 보관합니다.
    ///
    /// # Panics
    ///
    /// * 등록되지 않은 타입을 요청한 경우
    /// * 생성 도중 같은 타입을 다시 요청하는 순환 의존성이 있는 경우
    ///
    /// 두 경우 모두 배선 오류이므로 애플리케이션 시작 시점에 드러납니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        if let Some(instance) = LOCATOR.cached::<T>() {
            return instance;
        }

        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        {
            let mut initializing = LOCATOR.initializing.write().unwrap_or_else(|e| e.into_inner());
            if !initializing.insert(type_id) {
                log::error!("❌ 순환 의존성 감지: {}", type_name);
                panic!("Circular dependency detected: {} is already being initialized", type_name);
            }
        }

        // 생성자는 자신의 의존성을 다시 get()으로 해석하므로 락 밖에서 호출합니다
        let created = Self::construct::<T>(type_name);

        LOCATOR
            .initializing
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&type_id);

        match created {
            Some(instance) => {
                let mut instances = LOCATOR.instances.write().unwrap_or_else(|e| e.into_inner());
                let entry = instances
                    .entry(type_id)
                    .or_insert_with(|| instance as Arc<dyn Any + Send + Sync>);
                entry
                    .clone()
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("Type mismatch in ServiceLocator for {}", type_name))
            }
            None => panic!(
                "Service not found: {}. Make sure it's registered with #[service] or #[repository] macro, or manually registered with ServiceLocator::set()",
                type_name
            ),
        }
    }

    fn construct<T: 'static + Send + Sync>(type_name: &str) -> Option<Arc<T>> {
        let (kind, key) = type_key(type_name)?;

        let constructor = match kind {
            ComponentKind::Repository => REPOSITORY_NAME_CACHE.get(&key).map(|r| r.constructor),
            ComponentKind::Service => SERVICE_NAME_CACHE.get(&key).map(|r| r.constructor),
        }?;

        match constructor().downcast::<Arc<T>>() {
            Ok(instance) => Some(*instance),
            Err(_) => {
                log::error!("등록된 생성자의 반환 타입이 {}와 일치하지 않습니다", type_name);
                None
            }
        }
    }

    /// 외부에서 생성한 인스턴스를 등록합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_name = std::any::type_name::<T>();
        let short = type_name.rsplit("::").next().unwrap_or(type_name);

        log::info!("📦 Registering: {}", short);

        let mut instances = LOCATOR.instances.write().unwrap_or_else(|e| e.into_inner());
        instances.insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 모든 리포지토리와 서비스를 미리 생성합니다.
    ///
    /// 첫 요청 시점이 아니라 시작 시점에 배선 오류가 드러나도록 합니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        print_boxed_title("🔄 INITIALIZING SERVICE REGISTRY");

        let repositories: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        if !repositories.is_empty() {
            print_step_start(1, "Creating Repository instances");
            for registration in &repositories {
                print_sub_task(registration.name, "Creating...");
                let _instance = (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }
            print_step_complete(1, "Repository instances created", repositories.len());
        }

        let services: Vec<_> = inventory::iter::<ServiceRegistration>().collect();
        if !services.is_empty() {
            print_step_start(2, "Creating Service instances");
            for registration in &services {
                print_sub_task(registration.name, "Creating...");
                let _instance = (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }
            print_step_complete(2, "Service instances created", services.len());
        }

        print_final_summary(repositories.len(), services.len());

        Ok(())
    }
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_key_strips_suffix_and_underscores() {
        assert_eq!(
            registration_key("product_variant_repository", ComponentKind::Repository),
            "productvariant"
        );
        assert_eq!(registration_key("checkout_service", ComponentKind::Service), "checkout");
        assert_eq!(registration_key("mail", ComponentKind::Service), "mail");
    }

    #[test]
    fn test_type_key_matches_registration_key() {
        let (kind, key) =
            type_key("shop_backend::repositories::catalog::ProductVariantRepository").unwrap();
        assert_eq!(kind, ComponentKind::Repository);
        assert_eq!(key, registration_key("product_variant_repository", kind));

        let (kind, key) = type_key("shop_backend::services::auth::AuthService").unwrap();
        assert_eq!(kind, ComponentKind::Service);
        assert_eq!(key, "auth");
    }

    #[test]
    fn test_type_key_rejects_plain_types() {
        assert!(type_key("shop_backend::db::Database").is_none());
    }

    struct Marker(u8);

    #[test]
    fn test_set_then_get_returns_same_instance() {
        ServiceLocator::set(Arc::new(Marker(7)));
        let first = ServiceLocator::get::<Marker>();
        let second = ServiceLocator::get::<Marker>();

        assert_eq!(first.0, 7);
        assert!(Arc::ptr_eq(&first, &second));
    }
}
