//! # 사용자 리포지토리 구현
//!
//! MongoDB `users`, `seller_profiles` 컬렉션 위에 [`UserStore`]를 구현합니다.
//! 내부 ID와 프로바이더 ID 조회는 Redis로 캐싱합니다.
//!
//! ## 캐싱 전략
//!
//! - **TTL**: 10분 (600초)
//! - **키 패턴**: `user_repository:{id}`, `user_repository:app:{app_user_id}`,
//!   `user_repository:web:{web_user_id}`
//! - 미연결 조건이 붙는 이메일/사용자명 조회는 연결 상태에 따라 결과가 바뀌므로 캐싱하지 않습니다.
//! - 갱신 후에는 해당 사용자의 세 키를 모두 삭제합니다.
//!
//! ## 유니크 제약
//!
//! `app_user_id`, `web_user_id`에는 문자열 값이 있을 때만 적용되는 부분 유니크 인덱스가 걸립니다.
//! 위반(코드 11000)은 [`RepositoryError::DuplicateIdentity`]로 변환됩니다.

use std::sync::Arc;
use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::users::{SellerProfile, User},
    domain::models::identity::UserPatch,
};
use singleton_macro::repository;
use crate::errors::errors::RepositoryError;
use super::user_store::UserStore;

const CACHE_TTL_SECONDS: u64 = 600;
const DUPLICATE_KEY_CODE: i32 = 11000;
const PROFILE_COLLECTION: &str = "seller_profiles";

const APP_ID_INDEX: &str = "app_user_id_unique";
const WEB_ID_INDEX: &str = "web_user_id_unique";

#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl UserRepository {
    fn profiles(&self) -> Collection<SellerProfile> {
        self.db.get_database().collection::<SellerProfile>(PROFILE_COLLECTION)
    }

    fn provider_cache_key(&self, prefix: &str, external_id: &str) -> String {
        self.cache_key(&format!("{}:{}", prefix, external_id))
    }

    /// 캐시 우선 단건 조회. 캐시 오류는 조회 실패로 취급하지 않습니다.
    async fn find_cached(&self, cache_key: &str, filter: Document) -> Result<Option<User>, RepositoryError> {
        if let Ok(Some(cached)) = self.redis.get::<User>(cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection::<User>()
            .find_one(filter)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if let Some(ref user) = user {
            if let Err(e) = self.redis.set_with_expiry(cache_key, user, CACHE_TTL_SECONDS).await {
                log::debug!("사용자 캐시 저장 실패 ({}): {}", cache_key, e);
            }
        }

        Ok(user)
    }

    async fn find_uncached(&self, filter: Document) -> Result<Option<User>, RepositoryError> {
        self.collection::<User>()
            .find_one(filter)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))
    }

    async fn invalidate_user(&self, user: &User) {
        let mut keys = Vec::with_capacity(3);
        if let Some(id) = user.id_string() {
            keys.push(self.cache_key(&id));
        }
        if let Some(ref app_id) = user.app_user_id {
            keys.push(self.provider_cache_key("app", app_id));
        }
        if let Some(ref web_id) = user.web_user_id {
            keys.push(self.provider_cache_key("web", web_id));
        }

        if let Err(e) = self.redis.del_multiple(&keys).await {
            log::warn!("사용자 캐시 무효화 실패: {}", e);
        }
    }

    /// 프로바이더 ID 부분 유니크 인덱스와 프로필 `user_id` 유니크 인덱스를 생성합니다.
    ///
    /// 애플리케이션 시작 시 한 번 호출합니다.
    pub async fn create_indexes(&self) -> Result<(), RepositoryError> {
        let provider_index = |field: &str, name: &str| {
            IndexModel::builder()
                .keys(doc! { field: 1 })
                .options(IndexOptions::builder()
                    .unique(true)
                    .partial_filter_expression(doc! { field: { "$type": "string" } })
                    .name(name.to_string())
                    .build())
                .build()
        };

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .name("email_lookup".to_string())
                .build())
            .build();

        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder()
                .name("username_lookup".to_string())
                .build())
            .build();

        self.collection::<User>()
            .create_indexes([
                provider_index("app_user_id", APP_ID_INDEX),
                provider_index("web_user_id", WEB_ID_INDEX),
                email_index,
                username_index,
            ])
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let profile_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("user_id_unique".to_string())
                .build())
            .build();

        self.profiles()
            .create_index(profile_index)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        log::info!("사용자 컬렉션 인덱스 준비 완료");
        Ok(())
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, RepositoryError> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        self.find_cached(&self.cache_key(id), doc! { "_id": object_id }).await
    }

    async fn find_by_app_user_id(&self, app_user_id: &str) -> Result<Option<User>, RepositoryError> {
        let cache_key = self.provider_cache_key("app", app_user_id);
        self.find_cached(&cache_key, doc! { "app_user_id": app_user_id }).await
    }

    async fn find_by_web_user_id(&self, web_user_id: &str) -> Result<Option<User>, RepositoryError> {
        let cache_key = self.provider_cache_key("web", web_user_id);
        self.find_cached(&cache_key, doc! { "web_user_id": web_user_id }).await
    }

    async fn find_by_email_unlinked_app(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        self.find_uncached(doc! { "email": email, "app_user_id": null }).await
    }

    async fn find_by_username_unlinked_app(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        self.find_uncached(doc! { "username": username, "app_user_id": null }).await
    }

    async fn find_by_email_unlinked_web(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        self.find_uncached(doc! {
            "email": email,
            "web_user_id": null,
            "app_user_id": { "$ne": null },
        }).await
    }

    async fn find_by_email_and_username_unlinked_web(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        self.find_uncached(doc! {
            "email": email,
            "username": { "$ne": null },
            "web_user_id": null,
            "app_user_id": { "$ne": null },
        }).await
    }

    async fn create(&self, mut user: User) -> Result<User, RepositoryError> {
        let result = self.collection::<User>()
            .insert_one(&user)
            .await
            .map_err(|e| map_write_error(e, &user.app_user_id, &user.web_user_id))?;

        let object_id = result.inserted_id.as_object_id()
            .ok_or_else(|| RepositoryError::Database("inserted_id is not an ObjectId".to_string()))?;
        user.id = Some(object_id);

        log::debug!("사용자 생성: {}", object_id.to_hex());
        Ok(user)
    }

    async fn update(&self, id: &str, patch: UserPatch) -> Result<User, RepositoryError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| RepositoryError::NotFound(id.to_string()))?;

        let filter = link_guard_filter(object_id, &patch);
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self.collection::<User>()
            .find_one_and_update(filter, doc! { "$set": patch_document(&patch) })
            .with_options(options)
            .await
            .map_err(|e| map_write_error(e, &patch.app_user_id, &patch.web_user_id))?;

        match updated {
            Some(user) => {
                self.invalidate_user(&user).await;
                Ok(user)
            }
            None => {
                // 문서는 있는데 가드에 걸렸다면 다른 요청이 먼저 연결한 것
                let exists = self.find_uncached(doc! { "_id": object_id }).await?.is_some();
                if exists && patch.attaches_provider() {
                    let (field, value) = match (&patch.app_user_id, &patch.web_user_id) {
                        (Some(app_id), _) => ("app_user_id", app_id.clone()),
                        (None, Some(web_id)) => ("web_user_id", web_id.clone()),
                        (None, None) => ("_id", id.to_string()),
                    };
                    Err(RepositoryError::DuplicateIdentity { field: field.to_string(), value })
                } else {
                    Err(RepositoryError::NotFound(id.to_string()))
                }
            }
        }
    }

    async fn create_default_profile(&self, user_id: &str) -> Result<SellerProfile, RepositoryError> {
        let object_id = ObjectId::parse_str(user_id)
            .map_err(|_| RepositoryError::NotFound(user_id.to_string()))?;

        let mut profile = SellerProfile::new_default(object_id);

        match self.profiles().insert_one(&profile).await {
            Ok(result) => {
                profile.id = result.inserted_id.as_object_id();
                Ok(profile)
            }
            Err(e) if duplicate_key_message(&e).is_some() => {
                log::debug!("기본 프로필이 이미 존재합니다: {}", user_id);
                self.find_profile(user_id)
                    .await?
                    .ok_or_else(|| RepositoryError::Database(e.to_string()))
            }
            Err(e) => Err(RepositoryError::Database(e.to_string())),
        }
    }

    async fn find_profile(&self, user_id: &str) -> Result<Option<SellerProfile>, RepositoryError> {
        let Ok(object_id) = ObjectId::parse_str(user_id) else {
            return Ok(None);
        };

        self.profiles()
            .find_one(doc! { "user_id": object_id })
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))
    }
}

/// 프로바이더 ID를 붙이는 갱신이면 해당 필드가 아직 비어 있을 때만 매칭되도록 합니다.
fn link_guard_filter(object_id: ObjectId, patch: &UserPatch) -> Document {
    let mut filter = doc! { "_id": object_id };
    if patch.app_user_id.is_some() {
        filter.insert("app_user_id", mongodb::bson::Bson::Null);
    }
    if patch.web_user_id.is_some() {
        filter.insert("web_user_id", mongodb::bson::Bson::Null);
    }
    filter
}

/// `$set` 문서. 값이 있는 필드와 `updated_at`만 담습니다.
fn patch_document(patch: &UserPatch) -> Document {
    let mut set = Document::new();
    let fields = [
        ("app_user_id", &patch.app_user_id),
        ("web_user_id", &patch.web_user_id),
        ("email", &patch.email),
        ("username", &patch.username),
        ("display_name", &patch.display_name),
        ("avatar_url", &patch.avatar_url),
    ];

    for (name, value) in fields {
        if let Some(value) = value {
            set.insert(name, value.clone());
        }
    }
    set.insert("updated_at", DateTime::now());
    set
}

fn duplicate_key_message(error: &MongoError) -> Option<&str> {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == DUPLICATE_KEY_CODE => Some(&we.message),
        ErrorKind::Command(ce) if ce.code == DUPLICATE_KEY_CODE => Some(&ce.message),
        _ => None,
    }
}

fn map_write_error(error: MongoError, app_id: &Option<String>, web_id: &Option<String>) -> RepositoryError {
    match duplicate_key_message(&error) {
        Some(message) => classify_duplicate(message, app_id.as_deref(), web_id.as_deref()),
        None => RepositoryError::Database(error.to_string()),
    }
}

/// 중복 키 메시지에 담긴 인덱스 이름으로 어느 프로바이더 ID가 충돌했는지 판별합니다.
fn classify_duplicate(message: &str, app_id: Option<&str>, web_id: Option<&str>) -> RepositoryError {
    let (field, value) = if message.contains(WEB_ID_INDEX) {
        ("web_user_id", web_id)
    } else if message.contains(APP_ID_INDEX) {
        ("app_user_id", app_id)
    } else if let Some(app_id) = app_id {
        ("app_user_id", Some(app_id))
    } else {
        ("web_user_id", web_id)
    };

    RepositoryError::DuplicateIdentity {
        field: field.to_string(),
        value: value.unwrap_or_default().to_string(),
    }
}
