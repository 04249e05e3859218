use crate::redis::Store;
use redis::{ErrorKind, RedisError, RedisResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// In-memory store. A missing answer fails like a reset connection.
#[derive(Default)]
pub(crate) struct FakeStore {
    info: Option<String>,
    keys: Option<usize>,
    info_delay: Duration,
    keys_delay: Duration,
    info_calls: AtomicUsize,
    keys_calls: AtomicUsize,
    dbsize_calls: AtomicUsize,
}

impl FakeStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_info(mut self, info: &str) -> Self {
        self.info = Some(info.to_string());
        self
    }

    pub(crate) fn with_keys(mut self, count: usize) -> Self {
        self.keys = Some(count);
        self
    }

    pub(crate) fn with_info_delay(mut self, delay: Duration) -> Self {
        self.info_delay = delay;
        self
    }

    pub(crate) fn with_keys_delay(mut self, delay: Duration) -> Self {
        self.keys_delay = delay;
        self
    }

    pub(crate) fn info_calls(&self) -> usize {
        self.info_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn keys_calls(&self) -> usize {
        self.keys_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn dbsize_calls(&self) -> usize {
        self.dbsize_calls.load(Ordering::SeqCst)
    }

    fn connection_reset() -> RedisError {
        RedisError::from((ErrorKind::IoError, "connection reset by peer"))
    }
}

impl Store for FakeStore {
    async fn info(&self) -> RedisResult<String> {
        self.info_calls.fetch_add(1, Ordering::SeqCst);
        if !self.info_delay.is_zero() {
            tokio::time::sleep(self.info_delay).await;
        }
        self.info.clone().ok_or_else(Self::connection_reset)
    }

    async fn keys(&self, _pattern: &str) -> RedisResult<Vec<Vec<u8>>> {
        self.keys_calls.fetch_add(1, Ordering::SeqCst);
        if !self.keys_delay.is_zero() {
            tokio::time::sleep(self.keys_delay).await;
        }
        self.keys
            .map(|n| (0..n).map(|i| format!("key:{}", i).into_bytes()).collect())
            .ok_or_else(Self::connection_reset)
    }

    async fn dbsize(&self) -> RedisResult<u64> {
        self.dbsize_calls.fetch_add(1, Ordering::SeqCst);
        if !self.keys_delay.is_zero() {
            tokio::time::sleep(self.keys_delay).await;
        }
        self.keys.map(|n| n as u64).ok_or_else(Self::connection_reset)
    }
}
