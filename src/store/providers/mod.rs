//! Remote cache provider implementations.

pub mod memory;
pub mod redis;

pub use memory::MemoryCacheService;
pub use self::redis::RedisCacheService;
