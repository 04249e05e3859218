use super::collector::RedisCollector;
use crate::redis::Store;
use anyhow::Result;
use prometheus::{Encoder, Registry, TextEncoder};

/// Registry plus collector: everything needed to answer a scrape.
pub struct Exporter<S> {
    registry: Registry,
    collector: RedisCollector<S>,
}

impl<S: Store> Exporter<S> {
    /// Registers the process collector (Linux only) and the collector's
    /// schema. Conflicting or invalid series names fail here, before any
    /// socket is bound.
    pub fn new(collector: RedisCollector<S>) -> Result<Self> {
        let registry = Registry::new();

        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        registry.register(Box::new(collector.schema()))?;

        Ok(Self {
            registry,
            collector,
        })
    }

    pub fn collector(&self) -> &RedisCollector<S> {
        &self.collector
    }

    /// Collect from the store and encode everything in the text format.
    pub async fn render(&self) -> Result<String> {
        let scrape = self.collector.collect().await;

        let mut metric_families = self.registry.gather();
        metric_families.extend(self.collector.metric_families(&scrape));
        metric_families.sort_by(|a, b| a.get_name().cmp(b.get_name()));

        let encoder = TextEncoder::new();
        let mut buffer = vec![];
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
