//! # Service Registry
//!
//! 호스트 계층의 싱글톤 컴포넌트 수명주기를 관리합니다.
//!
//! `#[service]` / `#[repository]` 매크로가 붙은 구조체는 `inventory`를 통해 컴파일 타임에
//! 수집되고, 처음 요청될 때 [`ServiceLocator`]가 인스턴스를 만들어 캐시합니다.
//! `Database`, `RedisClient` 같은 인프라 컴포넌트는 `main.rs`에서 [`ServiceLocator::set`]으로
//! 직접 등록합니다.
//!
//! ```text
//! main.rs
//!   ├─ ServiceLocator::set(Database)         ← 인프라
//!   ├─ ServiceLocator::set(RedisClient)
//!   └─ ServiceLocator::initialize_all()
//!         ├─ UserRepository      (#[repository])
//!         ├─ AppTokenService     (#[service])  ← Provider A 어댑터
//!         ├─ WebSessionService   (#[service])  ← Provider B 어댑터
//!         ├─ IdentityService     (#[service])  ← 리졸버 조립
//!         └─ UserService         (#[service])
//! ```
//!
//! 레지스트리는 컴포넌트를 "조립"만 합니다. 신원 확인 로직
//! ([`IdentityResolver`](crate::services::identity::IdentityResolver))은 전역 상태를 전혀 참조하지 않고
//! 생성자로 저장소와 어댑터를 주입받기 때문에, 테스트에서는 레지스트리 없이 테스트 더블을 넣어 사용합니다.
//!
//! ## 이름 매칭 규칙
//!
//! 타입 이름 `AppTokenService` → 접미사 제거 후 소문자 `apptoken`,
//! 등록 이름 `app_token_service` → 접미사와 밑줄 제거 후 `apptoken`. 두 값이 같으면 매칭됩니다.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use once_cell::sync::Lazy;

/// 비즈니스 로직 서비스를 위한 공통 인터페이스
///
/// 모든 `#[service]` 매크로가 적용된 구조체가 이 trait을 자동 구현합니다.
#[async_trait]
pub trait Service: Send + Sync {
    /// 서비스의 고유 이름을 반환합니다.
    fn name(&self) -> &str;

    /// 서비스 초기화 로직을 수행합니다.
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 데이터 액세스 리포지토리를 위한 공통 인터페이스
///
/// 모든 `#[repository]` 매크로가 적용된 구조체가 이 trait을 자동 구현합니다.
#[async_trait]
pub trait Repository: Send + Sync {
    /// 리포지토리의 고유 이름을 반환합니다.
    fn name(&self) -> &str;

    /// 연결된 MongoDB 컬렉션의 이름을 반환합니다.
    fn collection_name(&self) -> &str;

    /// 리포지토리 초기화 로직을 수행합니다.
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 서비스 등록 정보 (`#[service]` 매크로가 생성)
pub struct ServiceRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// 리포지토리 등록 정보 (`#[repository]` 매크로가 생성)
pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

/// 정규화된 서비스 이름 → 등록정보
static SERVICE_NAME_CACHE: Lazy<HashMap<String, &'static ServiceRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<ServiceRegistration>()
        .map(|registration| (normalize_registration_name(registration.name), registration))
        .collect();

    log::debug!("service registry cache: {} entries", cache.len());
    cache
});

/// 정규화된 리포지토리 이름 → 등록정보
static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, &'static RepositoryRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<RepositoryRegistration>()
        .map(|registration| (normalize_registration_name(registration.name), registration))
        .collect();

    log::debug!("repository registry cache: {} entries", cache.len());
    cache
});

/// 등록 이름에서 `_service` / `_repository` 접미사와 밑줄을 제거합니다.
fn normalize_registration_name(name: &str) -> String {
    let trimmed = name
        .strip_suffix("_service")
        .or_else(|| name.strip_suffix("_repository"))
        .unwrap_or(name);

    trimmed.replace('_', "").to_lowercase()
}

/// 타입 이름(`AppTokenService`)에서 조회 키(`apptoken`)를 만듭니다.
fn lookup_key(clean_type_name: &str, suffix: &str) -> String {
    clean_type_name
        .strip_suffix(suffix)
        .unwrap_or(clean_type_name)
        .to_lowercase()
}

/// 싱글톤 의존성 주입 컨테이너
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

    /// 타입 `T`의 싱글톤 인스턴스를 반환합니다.
    ///
    /// 아직 생성되지 않았다면 등록 정보의 생성자를 호출합니다.
    ///
    /// # Panics
    ///
    /// * 순환 의존성이 감지된 경우
    /// * 매크로로 등록되지 않았고 `set()`으로도 등록되지 않은 타입인 경우
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        {
            let instances = LOCATOR.instances.read().unwrap();
            if let Some(instance) = instances.get(&type_id) {
                return instance.clone()
                    .downcast::<T>()
                    .expect("Type mismatch in ServiceLocator");
            }
        }

        {
            let initializing = LOCATOR.initializing.read().unwrap();
            if initializing.contains(&type_id) {
                log::error!("Circular dependency detected for type: {}", type_name);
                panic!("Circular dependency detected: {} is already being initialized", type_name);
            }
        }
        LOCATOR.initializing.write().unwrap().insert(type_id);

        let result = std::panic::catch_unwind(|| {
            let clean_type_name = Self::extract_clean_type_name(type_name);

            // 생성자가 다른 컴포넌트를 get()으로 요청할 수 있으므로 쓰기 락 밖에서 생성합니다.
            let boxed_instance = if clean_type_name.ends_with("Repository") {
                let key = lookup_key(&clean_type_name, "Repository");
                let registration = REPOSITORY_NAME_CACHE
                    .get(&key)
                    .unwrap_or_else(|| panic!("No repository found for entity: {}", key));
                (registration.constructor)()
            } else if clean_type_name.ends_with("Service") {
                let key = lookup_key(&clean_type_name, "Service");
                let registration = SERVICE_NAME_CACHE
                    .get(&key)
                    .unwrap_or_else(|| panic!("No service found for entity: {}", key));
                (registration.constructor)()
            } else {
                panic!("Service not found: {}. Register it with #[service] / #[repository] or ServiceLocator::set()", type_name);
            };

            let instance = match boxed_instance.downcast::<Arc<T>>() {
                Ok(arc_instance) => (*arc_instance).clone(),
                Err(_) => panic!("Type mismatch for component: {}", type_name),
            };

            let mut instances = LOCATOR.instances.write().unwrap();
            let stored = instances
                .entry(type_id)
                .or_insert_with(|| instance.clone() as Arc<dyn Any + Send + Sync>)
                .clone();

            stored.downcast::<T>().expect("Type mismatch in ServiceLocator")
        });

        LOCATOR.initializing.write().unwrap().remove(&type_id);

        match result {
            Ok(instance) => instance,
            Err(e) => {
                log::error!("Failed to create instance for {}: {:?}", type_name, e);
                panic!("Failed to create instance for {}", type_name);
            }
        }
    }

    fn extract_clean_type_name(type_name: &str) -> String {
        match type_name.rfind("::") {
            Some(pos) => type_name[pos + 2..].to_string(),
            None => type_name.to_string(),
        }
    }

    /// 인프라 컴포넌트를 직접 등록합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_id = TypeId::of::<T>();
        let clean_name = Self::extract_clean_type_name(std::any::type_name::<T>());

        log::info!("📦 Registering: {}", clean_name);

        let mut instances = LOCATOR.instances.write().unwrap();
        instances.insert(type_id, instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 모든 리포지토리와 서비스를 미리 생성합니다.
    ///
    /// 리포지토리를 먼저 만든 뒤 서비스를 만듭니다. 누락된 인프라가 있으면
    /// 첫 요청이 아니라 기동 시점에 패닉이 발생합니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        log::info!("🔄 INITIALIZING SERVICE REGISTRY");

        let mut repo_count = 0;
        for registration in inventory::iter::<RepositoryRegistration>() {
            log::debug!("   ├─ {}: creating", registration.name);
            let _instance = (registration.constructor)();
            repo_count += 1;
        }

        let mut service_count = 0;
        for registration in inventory::iter::<ServiceRegistration>() {
            log::debug!("   ├─ {}: creating", registration.name);
            let _instance = (registration.constructor)();
            service_count += 1;
        }

        log::info!(
            "🎉 SERVICE REGISTRY INITIALIZED: {} repositories, {} services",
            repo_count,
            service_count
        );

        Ok(())
    }
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);
