use async_trait::async_trait;

use super::CacheResult;

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;

    /// ttl 为 0 时使用配置中的默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64);

    async fn remove(&self, key: &str);

    async fn invalidate_all(&self);

    async fn contains(&self, key: &str) -> bool {
        matches!(self.get_raw(key).await, CacheResult::Found(_))
    }
}
