use super::descriptor::MetricDescriptor;
use super::error::CollectError;
use super::info::{parse_build_version_info, BuildVersionInfo};
use crate::config::KeyCountMethod;
use crate::redis::Store;
use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use std::future::Future;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};
use tracing::{info, warn};

const SUBSYSTEM: &str = "redis";

pub const DEFAULT_SCRAPE_TIMEOUT: Duration = Duration::from_secs(1);

/// Number of keys in the selected database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCount {
    pub count: u64,
}

/// One value produced by a scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sample {
    BuildVersionInfo(BuildVersionInfo),
    Keys(KeyCount),
}

/// Samples produced by a single collection, build info first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scrape {
    samples: Vec<Sample>,
}

impl Scrape {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn build_version_info(&self) -> Option<&BuildVersionInfo> {
        self.samples.iter().find_map(|s| match s {
            Sample::BuildVersionInfo(info) => Some(info),
            _ => None,
        })
    }

    pub fn key_count(&self) -> Option<u64> {
        self.samples.iter().find_map(|s| match s {
            Sample::Keys(keys) => Some(keys.count),
            _ => None,
        })
    }
}

impl IntoIterator for Scrape {
    type Item = Sample;
    type IntoIter = std::vec::IntoIter<Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.into_iter()
    }
}

/// Queries a store for its version, role and key count on every scrape.
pub struct RedisCollector<S> {
    store: S,
    build_version_info: MetricDescriptor,
    keys: MetricDescriptor,
    timeout: Duration,
    key_count: KeyCountMethod,
}

impl<S: Store> RedisCollector<S> {
    pub fn new(store: S, namespace: &str) -> prometheus::Result<Self> {
        Ok(Self {
            store,
            build_version_info: MetricDescriptor::new(
                namespace,
                SUBSYSTEM,
                "build_version_info",
                "Info of the current version of Redis running",
                &["version", "role"],
            )?,
            keys: MetricDescriptor::new(
                namespace,
                SUBSYSTEM,
                "keys",
                "Gauge of the total count of keys at a given time",
                &[],
            )?,
            timeout: DEFAULT_SCRAPE_TIMEOUT,
            key_count: KeyCountMethod::Keys,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_key_count_method(mut self, method: KeyCountMethod) -> Self {
        self.key_count = method;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Descriptors of every series this collector can emit.
    pub fn describe(&self) -> Vec<&Desc> {
        vec![self.build_version_info.desc(), self.keys.desc()]
    }

    /// Static schema suitable for registering with a `prometheus::Registry`.
    pub fn schema(&self) -> Schema {
        Schema {
            descs: self.describe().into_iter().cloned().collect(),
        }
    }

    /// Run both sub-fetches under one shared deadline.
    ///
    /// A failed fetch is logged and its series left out; it never prevents
    /// the other fetch from running.
    pub async fn collect(&self) -> Scrape {
        let deadline = Instant::now() + self.timeout;
        let mut samples = Vec::with_capacity(2);

        match self.fetch_build_version_info(deadline).await {
            Ok(info) => {
                info!(version = %info.version, role = %info.role, "fetched build version info");
                samples.push(Sample::BuildVersionInfo(info));
            }
            Err(e) => warn!(error = %e, "error fetching build version info"),
        }

        match self.fetch_key_count(deadline).await {
            Ok(keys) => {
                info!(keys = keys.count, "fetched key count");
                samples.push(Sample::Keys(keys));
            }
            Err(e) => warn!(error = %e, "error fetching key count"),
        }

        Scrape { samples }
    }

    /// Metric families for the samples of `scrape`.
    pub fn metric_families(&self, scrape: &Scrape) -> Vec<MetricFamily> {
        let mut families = Vec::with_capacity(scrape.len());

        for sample in scrape.iter() {
            let result = match sample {
                Sample::BuildVersionInfo(info) => self
                    .build_version_info
                    .gauge(&[info.version.as_str(), info.role.as_str()], 1.0),
                Sample::Keys(keys) => self.keys.gauge(&[], keys.count as f64),
            };

            match result {
                Ok(f) => families.extend(f),
                Err(e) => warn!(error = %e, "error building metric family"),
            }
        }

        families
    }

    async fn fetch_build_version_info(
        &self,
        deadline: Instant,
    ) -> Result<BuildVersionInfo, CollectError> {
        let info = self
            .bounded("info", deadline, self.store.info())
            .await?
            .map_err(CollectError::Info)?;

        Ok(parse_build_version_info(&info)?)
    }

    async fn fetch_key_count(&self, deadline: Instant) -> Result<KeyCount, CollectError> {
        let count = match self.key_count {
            KeyCountMethod::Keys => self
                .bounded("keys", deadline, self.store.keys("*"))
                .await?
                .map(|keys| keys.len() as u64),
            KeyCountMethod::Dbsize => self.bounded("dbsize", deadline, self.store.dbsize()).await?,
        }
        .map_err(CollectError::Keys)?;

        Ok(KeyCount { count })
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        deadline: Instant,
        request: impl Future<Output = T>,
    ) -> Result<T, CollectError> {
        timeout_at(deadline, request)
            .await
            .map_err(|_| CollectError::Timeout {
                operation,
                timeout: self.timeout,
            })
    }
}

/// Descriptor-only collector: lets a registry validate the schema of the
/// exporter's series before any scrape has run.
pub struct Schema {
    descs: Vec<Desc>,
}

impl Collector for Schema {
    fn desc(&self) -> Vec<&Desc> {
        self.descs.iter().collect()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        Vec::new()
    }
}
