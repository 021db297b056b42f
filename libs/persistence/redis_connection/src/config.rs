use std::time::Duration;

pub trait DbConnectConfig: serde::de::DeserializeOwned {
    fn password(&self) -> Option<&str> { None }
    fn host(&self) -> &str;
    fn port(&self) -> u16;
    fn db(&self) -> u8;

    /// Pool wait, create and recycle timeouts.
    fn timeouts(&self) -> deadpool_redis::Timeouts {
        RedisTimeouts::default().into()
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct RedisDbConfig {
    #[serde(default = "host_default")]
    pub host: String,
    #[serde(default = "port_default")]
    pub port: u16,
    #[serde(default = "db_default")]
    pub db: u8,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub timeouts: RedisTimeouts,
}

/// Pool timeouts in milliseconds; `0` waits forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct RedisTimeouts {
    #[serde(default = "wait_timeout_default")]
    pub wait_ms: u64,
    #[serde(default = "create_timeout_default")]
    pub create_ms: u64,
    #[serde(default = "recycle_timeout_default")]
    pub recycle_ms: u64,
}

impl Default for RedisTimeouts {
    fn default() -> Self {
        Self {
            wait_ms: wait_timeout_default(),
            create_ms: create_timeout_default(),
            recycle_ms: recycle_timeout_default(),
        }
    }
}

impl From<RedisTimeouts> for deadpool_redis::Timeouts {
    fn from(t: RedisTimeouts) -> Self {
        let millis = |ms: u64| (ms > 0).then(|| Duration::from_millis(ms));
        Self {
            wait: millis(t.wait_ms),
            create: millis(t.create_ms),
            recycle: millis(t.recycle_ms),
        }
    }
}

impl DbConnectConfig for RedisDbConfig {
    fn password(&self) -> Option<&str> { self.password.as_deref() }

    fn host(&self) -> &str { &self.host }

    fn port(&self) -> u16 { self.port }

    fn db(&self) -> u8 { self.db }

    fn timeouts(&self) -> deadpool_redis::Timeouts { self.timeouts.into() }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct MemoryConfig {
    #[serde(default = "default_memory_capacity")]
    pub capacity: u64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_memory_capacity(),
        }
    }
}

/// Expiration settings in whole seconds; `0` disables that expiration.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CachePolicyConfig {
    #[serde(default = "default_sliding_secs")]
    pub sliding_expiration_secs: u64,
    #[serde(default = "default_absolute_secs")]
    pub absolute_expiration_secs: u64,
}

impl Default for CachePolicyConfig {
    fn default() -> Self {
        Self {
            sliding_expiration_secs: default_sliding_secs(),
            absolute_expiration_secs: default_absolute_secs(),
        }
    }
}

impl CachePolicyConfig {
    pub fn policy(&self) -> CachePolicy {
        let secs = |s: u64| (s > 0).then(|| Duration::from_secs(s));
        CachePolicy {
            sliding: secs(self.sliding_expiration_secs),
            absolute: secs(self.absolute_expiration_secs),
        }
    }
}

/// Per-entry expiration.
///
/// `sliding` is extended on every read; `absolute` is measured from the write
/// and is never extended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CachePolicy {
    pub sliding: Option<Duration>,
    pub absolute: Option<Duration>,
}

impl CachePolicy {
    pub fn new(sliding: Option<Duration>, absolute: Option<Duration>) -> Self {
        Self { sliding, absolute }
    }

    pub fn never_expire() -> Self { Self::default() }

    /// Lifetime granted at write time.
    pub fn initial_ttl(&self) -> Option<Duration> {
        match (self.sliding, self.absolute) {
            (Some(s), Some(a)) => Some(s.min(a)),
            (Some(s), None) => Some(s),
            (None, Some(a)) => Some(a),
            (None, None) => None,
        }
    }
}

fn host_default() -> String { "127.0.0.1".into() }
fn port_default() -> u16 { 6379 }
fn db_default() -> u8 { 0 }
fn wait_timeout_default() -> u64 { 2000 }
fn create_timeout_default() -> u64 { 5000 }
fn recycle_timeout_default() -> u64 { 100 }
fn default_memory_capacity() -> u64 { 10_000 }
fn default_sliding_secs() -> u64 { 300 }
fn default_absolute_secs() -> u64 { 3600 }
