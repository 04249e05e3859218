pub mod collector;
pub mod descriptor;
pub mod error;
pub mod exporter;
pub mod info;

#[cfg(test)]
pub(crate) mod testing;

pub use collector::{KeyCount, RedisCollector, Sample, Schema, Scrape};
pub use descriptor::MetricDescriptor;
pub use error::CollectError;
pub use exporter::Exporter;
pub use info::{parse_build_version_info, BuildVersionInfo, InfoParseError};
