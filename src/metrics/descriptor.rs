use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{GaugeVec, Opts};
use std::collections::HashMap;

/// Static schema of one exported gauge series.
///
/// Built once at startup; every scrape creates fresh gauges from it so no
/// values survive from one scrape to the next.
#[derive(Debug, Clone)]
pub struct MetricDescriptor {
    desc: Desc,
}

impl MetricDescriptor {
    /// Fails when the resulting name or label names are not valid Prometheus
    /// identifiers, e.g. a namespace containing `-`.
    pub fn new(
        namespace: &str,
        subsystem: &str,
        name: &str,
        help: &str,
        label_names: &[&str],
    ) -> prometheus::Result<Self> {
        let fq_name = Opts::new(name, help)
            .namespace(namespace)
            .subsystem(subsystem)
            .fq_name();

        let desc = Desc::new(
            fq_name,
            help.to_string(),
            label_names.iter().map(|l| l.to_string()).collect(),
            HashMap::new(),
        )?;

        Ok(Self { desc })
    }

    pub fn name(&self) -> &str {
        &self.desc.fq_name
    }

    pub fn help(&self) -> &str {
        &self.desc.help
    }

    pub fn label_names(&self) -> &[String] {
        &self.desc.variable_labels
    }

    pub fn desc(&self) -> &Desc {
        &self.desc
    }

    /// One gauge sample as a metric family.
    pub fn gauge(
        &self,
        label_values: &[&str],
        value: f64,
    ) -> prometheus::Result<Vec<MetricFamily>> {
        let label_names: Vec<&str> = self.label_names().iter().map(String::as_str).collect();
        let gauge = GaugeVec::new(Opts::new(self.name(), self.help()), &label_names)?;
        gauge.get_metric_with_label_values(label_values)?.set(value);
        Ok(gauge.collect())
    }
}
