pub mod memory;
pub mod redis_cache;
pub mod store;
