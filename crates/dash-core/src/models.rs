use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Well-known metric names emitted by the simulation.
///
/// The summary format is open-ended (any `Metric` string is stored verbatim),
/// but these are the names the presentation layer and summary statistics
/// actually interpret.
pub mod metric {
    pub const START_TIME: &str = "StartTime";
    pub const FINISH_TIME: &str = "FinishTime";
    pub const EXECUTION_TIME: &str = "ExecutionTime";
    pub const STATUS: &str = "Status";
    pub const CPU_UTILIZATION: &str = "CPUUtilization";
    pub const ENERGY_CONSUMED: &str = "EnergyConsumed";
    pub const VMS_COUNT: &str = "VMsCount";
    pub const HOST: &str = "Host";
}

/// `Host` metric value marking a VM that was never allocated.
pub const UNALLOCATED_HOST: &str = "-1";

/// The three entity kinds present in a simulation summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    /// A simulated unit of work submitted to the system.
    Cloudlet,
    /// A simulated physical machine.
    Host,
    /// A simulated virtual machine.
    Vm,
}

impl EntityType {
    /// Parse the `Type` column of a summary row.
    ///
    /// Returns `None` for any unrecognized value; unknown types are not an
    /// error, they are simply ignored by the aggregator (forward-compatible
    /// with future row types).
    pub fn from_type_field(value: &str) -> Option<Self> {
        match value {
            "Cloudlet" => Some(Self::Cloudlet),
            "Host" => Some(Self::Host),
            "VM" => Some(Self::Vm),
            _ => None,
        }
    }

    /// The `Type` column spelling for this entity kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cloudlet => "Cloudlet",
            Self::Host => "Host",
            Self::Vm => "VM",
        }
    }
}

/// One entity assembled from all summary rows sharing its `(Type, ID)` pair.
///
/// Metric values stay raw strings; numeric coercion happens only at the
/// consumption boundary through [`EntityRecord::metric_f64`] and
/// [`EntityRecord::metric_i64`], which return an explicit `None` for missing
/// or unparsable values instead of propagating a NaN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Entity identifier, unique within its collection.
    pub id: u32,
    /// Metric name → raw value string. A metric absent from all rows for
    /// this entity is simply absent here; no default is synthesized.
    #[serde(default)]
    pub metrics: HashMap<String, String>,
}

impl EntityRecord {
    /// Create an empty record for `id`.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            metrics: HashMap::new(),
        }
    }

    /// Set `name` to `value`, overwriting any previous value (last write wins).
    pub fn set_metric(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.metrics.insert(name.into(), value.into());
    }

    /// Raw string value of `name`, or `None` when the metric was never seen.
    pub fn metric(&self, name: &str) -> Option<&str> {
        self.metrics.get(name).map(String::as_str)
    }

    /// `name` parsed as a float; `None` when missing or unparsable.
    pub fn metric_f64(&self, name: &str) -> Option<f64> {
        self.metric(name)?.trim().parse().ok()
    }

    /// `name` parsed as an integer; `None` when missing or unparsable.
    pub fn metric_i64(&self, name: &str) -> Option<i64> {
        self.metric(name)?.trim().parse().ok()
    }
}

/// The three disjoint entity collections built from one summary file.
///
/// Each collection is sorted ascending by `id` with ids unique within it.
/// A fresh load rebuilds the whole set; there is no incremental merge
/// across refreshes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityCollections {
    pub cloudlets: Vec<EntityRecord>,
    pub hosts: Vec<EntityRecord>,
    pub vms: Vec<EntityRecord>,
}

impl EntityCollections {
    /// `true` when all three collections are empty.
    pub fn is_empty(&self) -> bool {
        self.cloudlets.is_empty() && self.hosts.is_empty() && self.vms.is_empty()
    }

    /// Total number of entities across all three collections.
    pub fn total_entities(&self) -> usize {
        self.cloudlets.len() + self.hosts.len() + self.vms.len()
    }
}
