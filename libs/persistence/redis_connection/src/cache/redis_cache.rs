use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::instrument;

use super::store::{CacheResult, CacheStore};
use crate::config::CachePolicy;

const ABSOLUTE_FIELD: &str = "absexp";
const SLIDING_FIELD: &str = "sldexp";
const DATA_FIELD: &str = "data";
const NOT_PRESENT: i64 = -1;

/// Redis cache store.
///
/// Each entry is a hash holding the payload (`data`), the absolute deadline
/// as unix milliseconds (`absexp`) and the sliding window in milliseconds
/// (`sldexp`). Reads push the key TTL forward by the sliding window, capped
/// by the absolute deadline.
#[derive(Clone)]
pub struct RedisCache {
    pool: deadpool_redis::Pool,
}

impl RedisCache {
    pub fn new(pool: deadpool_redis::Pool) -> Self { Self { pool } }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

fn millis(d: Duration) -> i64 { d.as_millis() as i64 }

/// TTL to apply after a read, in milliseconds.
///
/// `None` means the TTL is left untouched (no sliding window). `Some(0)` or
/// less means the absolute deadline has passed.
pub(crate) fn refreshed_ttl(absexp: i64, sldexp: i64, now_ms: i64) -> Option<i64> {
    if sldexp == NOT_PRESENT {
        return None;
    }
    if absexp == NOT_PRESENT {
        return Some(sldexp);
    }
    Some(sldexp.min(absexp - now_ms))
}

#[async_trait]
impl CacheStore for RedisCache {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> CacheResult<Option<Bytes>> {
        let mut conn = self.pool.get().await?;
        let (absexp, sldexp, data): (Option<i64>, Option<i64>, Option<Vec<u8>>) =
            redis::cmd("HMGET")
                .arg(key)
                .arg(ABSOLUTE_FIELD)
                .arg(SLIDING_FIELD)
                .arg(DATA_FIELD)
                .query_async(&mut conn)
                .await?;

        let Some(data) = data
        else {
            return Ok(None);
        };

        let absexp = absexp.unwrap_or(NOT_PRESENT);
        let sldexp = sldexp.unwrap_or(NOT_PRESENT);
        let now = now_millis();

        if absexp != NOT_PRESENT && absexp <= now {
            return Ok(None);
        }

        if let Some(ttl) = refreshed_ttl(absexp, sldexp, now) {
            let _: () = redis::cmd("PEXPIRE")
                .arg(key)
                .arg(ttl)
                .query_async(&mut conn)
                .await?;
        }

        Ok(Some(Bytes::from(data)))
    }

    #[instrument(skip(self, value))]
    async fn set(
        &self, key: &str, value: Bytes, policy: &CachePolicy,
    ) -> CacheResult<()> {
        let now = now_millis();
        let absexp = policy
            .absolute
            .map(|a| now + millis(a))
            .unwrap_or(NOT_PRESENT);
        let sldexp = policy.sliding.map(millis).unwrap_or(NOT_PRESENT);

        let mut pipe = redis::pipe();
        pipe.atomic()
            .del(key)
            .ignore()
            .hset_multiple(
                key,
                &[(ABSOLUTE_FIELD, absexp), (SLIDING_FIELD, sldexp)],
            )
            .ignore()
            .hset(key, DATA_FIELD, value.to_vec())
            .ignore();
        if let Some(ttl) = policy.initial_ttl() {
            pipe.pexpire(key, millis(ttl)).ignore();
        }

        let mut conn = self.pool.get().await?;
        let _: () = pipe.query_async(&mut conn).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> CacheResult<()> {
        let mut conn = self.pool.get().await?;
        let _: () = redis::cmd("DEL").arg(key).query_async(&mut conn).await?;
        Ok(())
    }
}
