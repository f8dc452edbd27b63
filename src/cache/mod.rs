//! 对象缓存层
//!
//! 插件式缓存后端：moka（进程内）与 redis（跨进程）。
//! 后端在编译期经 `declare_object_cache_plugin!` 注册，
//! 启动时按配置选择，失败时回退到 moka。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

/// 缓存查询结果
#[derive(Debug)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    /// 后端异常等视为值不可用，调用方按未命中处理
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

/// 带序列化的便捷读写
pub struct TypedCache;

impl TypedCache {
    pub async fn get<T: DeserializeOwned>(cache: &dyn ObjectCache, key: &str) -> Option<T> {
        match cache.get_raw(key).await {
            CacheResult::Found(raw) => serde_json::from_str(&raw).ok(),
            _ => None,
        }
    }

    pub async fn insert<T: Serialize>(cache: &dyn ObjectCache, key: String, value: &T, ttl: u64) {
        if let Ok(raw) = serde_json::to_string(value) {
            cache.insert_raw(key, raw, ttl).await;
        }
    }
}

/// 注册缓存后端插件
///
/// 在模块加载期把构造函数写进全局注册表，
/// 启动逻辑按配置的名字取用。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ty) => {
        #[ctor::ctor]
        fn register_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        <$ty>::new()
                            .map(|cache| Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                            .map_err($crate::errors::SchoolLmsError::cache_connection)
                    })
                }),
            );
        }
    };
}
