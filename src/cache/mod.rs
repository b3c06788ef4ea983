//! 对象缓存
//!
//! 后端以插件形式注册（moka 内存缓存、redis），启动时按配置选择。
//! 主要用于认证用户信息缓存与令牌吊销列表。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::ObjectCache;

/// 缓存读取结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    /// 后端异常，无法确定是否存在
    ExistsButNoValue,
}

impl<T> CacheResult<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            CacheResult::Found(value) => Some(value),
            _ => None,
        }
    }
}

/// 声明缓存插件，在程序加载时注册到插件表
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ty) => {
        #[ctor::ctor]
        unsafe fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        <$ty>::new()
                            .map(|cache| Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                            .map_err($crate::errors::SchoolError::cache_connection)
                    })
                }),
            );
        }
    };
}
