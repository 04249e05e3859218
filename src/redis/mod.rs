use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisResult};
use std::future::Future;
use tokio::sync::OnceCell;
use tracing::debug;

/// The store queries the collector depends on.
///
/// Implementations must be safe to share between concurrent scrapes.
pub trait Store: Send + Sync {
    /// Raw `INFO` text.
    fn info(&self) -> impl Future<Output = RedisResult<String>> + Send;

    /// Every key matching `pattern`.
    fn keys(&self, pattern: &str) -> impl Future<Output = RedisResult<Vec<Vec<u8>>>> + Send;

    /// Server-reported number of keys in the selected database.
    fn dbsize(&self) -> impl Future<Output = RedisResult<u64>> + Send;
}

/// Redis client wrapper used by the exporter
///
/// The URL is parsed eagerly; the connection is established on first use and
/// then shared by all scrapes.
pub struct RedisStore {
    client: Client,
    manager: OnceCell<ConnectionManager>,
}

impl RedisStore {
    /// Parse `url` without connecting.
    pub fn open(url: &str) -> RedisResult<Self> {
        let client = Client::open(url)?;

        Ok(Self {
            client,
            manager: OnceCell::new(),
        })
    }

    async fn connection(&self) -> RedisResult<ConnectionManager> {
        let manager = self
            .manager
            .get_or_try_init(|| async {
                // One attempt; a refused connection fails this scrape and is
                // tried again on the next one.
                let manager =
                    ConnectionManager::new_with_backoff(self.client.clone(), 2, 100, 0).await?;
                debug!("connected to redis");
                Ok::<_, redis::RedisError>(manager)
            })
            .await?;

        // ConnectionManager is a cheap, multiplexed handle.
        Ok(manager.clone())
    }
}

impl Store for RedisStore {
    async fn info(&self) -> RedisResult<String> {
        let mut conn = self.connection().await?;
        redis::cmd("INFO").query_async(&mut conn).await
    }

    async fn keys(&self, pattern: &str) -> RedisResult<Vec<Vec<u8>>> {
        let mut conn = self.connection().await?;
        conn.keys(pattern).await
    }

    async fn dbsize(&self) -> RedisResult<u64> {
        let mut conn = self.connection().await?;
        redis::cmd("DBSIZE").query_async(&mut conn).await
    }
}
