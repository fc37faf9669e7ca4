//! Derived summary statistics over the aggregated entity collections.
//!
//! These are pure, read-only computations recomputed from scratch on every
//! load cycle; nothing here is maintained incrementally.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use dash_core::formatting;
use dash_core::models::{metric, EntityCollections, EntityRecord};

// ── SummaryStats ──────────────────────────────────────────────────────────────

/// Headline numbers shown in the dashboard's summary cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of cloudlet entities.
    pub total_cloudlets: usize,
    /// Hosts with `CPUUtilization > 0` or `VMsCount > 0`.
    pub active_hosts: usize,
    /// Total number of host entities.
    pub total_hosts: usize,
    /// Number of VM entities.
    pub total_vms: usize,
    /// Sum of `EnergyConsumed` over all hosts, in watt-hours.
    pub total_energy_wh: f64,
}

impl SummaryStats {
    /// Compute the statistics for `collections`.
    ///
    /// Missing or unparsable host metrics degrade to the inactive / zero-energy
    /// interpretation; empty collections produce all-zero stats.
    pub fn compute(collections: &EntityCollections) -> Self {
        let active_hosts = collections
            .hosts
            .iter()
            .filter(|host| host_is_active(host))
            .count();

        let total_energy_wh = collections
            .hosts
            .iter()
            .map(|host| host.metric_f64(metric::ENERGY_CONSUMED).unwrap_or(0.0))
            .sum();

        Self {
            total_cloudlets: collections.cloudlets.len(),
            active_hosts,
            total_hosts: collections.hosts.len(),
            total_vms: collections.vms.len(),
            total_energy_wh,
        }
    }

    /// The `"active/total"` host display form, e.g. `"3/5"`.
    pub fn hosts_display(&self) -> String {
        format!("{}/{}", self.active_hosts, self.total_hosts)
    }

    /// Total energy with two decimals and the watt-hour unit, e.g. `"45.20 Wh"`.
    pub fn energy_display(&self) -> String {
        formatting::format_energy(self.total_energy_wh)
    }
}

/// A host counts as active when it reports any CPU load or any placed VM.
fn host_is_active(host: &EntityRecord) -> bool {
    host.metric_f64(metric::CPU_UTILIZATION).unwrap_or(0.0) > 0.0
        || host.metric_i64(metric::VMS_COUNT).unwrap_or(0) > 0
}

// ── VM allocation breakdown ───────────────────────────────────────────────────

/// Group VMs by the host they were placed on.
///
/// Returns `(label, count)` pairs with host ids ascending and the
/// `"Unallocated"` bucket (host `-1`, or a missing/unparsable `Host` metric)
/// last, present only when non-empty. Feeds the allocation chart.
pub fn vm_allocation(vms: &[EntityRecord]) -> Vec<(String, usize)> {
    let mut per_host: BTreeMap<i64, usize> = BTreeMap::new();
    let mut unallocated = 0usize;

    for vm in vms {
        match vm.metric_i64(metric::HOST) {
            Some(host_id) if host_id >= 0 => *per_host.entry(host_id).or_default() += 1,
            _ => unallocated += 1,
        }
    }

    let mut breakdown: Vec<(String, usize)> = per_host
        .into_iter()
        .map(|(host_id, count)| (format!("Host {}", host_id), count))
        .collect();
    if unallocated > 0 {
        breakdown.push(("Unallocated".to_string(), unallocated));
    }
    breakdown
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::aggregate;
    use crate::csv::parse_csv;

    fn host(id: u32, cpu: Option<&str>, energy: Option<&str>, vms: Option<&str>) -> EntityRecord {
        let mut record = EntityRecord::new(id);
        if let Some(v) = cpu {
            record.set_metric(metric::CPU_UTILIZATION, v);
        }
        if let Some(v) = energy {
            record.set_metric(metric::ENERGY_CONSUMED, v);
        }
        if let Some(v) = vms {
            record.set_metric(metric::VMS_COUNT, v);
        }
        record
    }

    fn vm(id: u32, host: Option<&str>) -> EntityRecord {
        let mut record = EntityRecord::new(id);
        if let Some(v) = host {
            record.set_metric(metric::HOST, v);
        }
        record
    }

    // ── compute ───────────────────────────────────────────────────────────

    #[test]
    fn test_empty_collections_all_zero() {
        let stats = SummaryStats::compute(&EntityCollections::default());
        assert_eq!(stats.total_cloudlets, 0);
        assert_eq!(stats.total_vms, 0);
        assert_eq!(stats.hosts_display(), "0/0");
        assert_eq!(stats.energy_display(), "0.00 Wh");
    }

    #[test]
    fn test_active_host_by_cpu_utilization() {
        let collections = EntityCollections {
            cloudlets: vec![],
            hosts: vec![
                host(0, Some("0.75"), None, None),
                host(1, Some("0.0"), None, None),
            ],
            vms: vec![],
        };
        let stats = SummaryStats::compute(&collections);
        assert_eq!(stats.active_hosts, 1);
        assert_eq!(stats.hosts_display(), "1/2");
    }

    #[test]
    fn test_active_host_by_vm_count_alone() {
        // Zero CPU but a placed VM still counts as active.
        let collections = EntityCollections {
            cloudlets: vec![],
            hosts: vec![host(0, Some("0.0"), None, Some("2"))],
            vms: vec![],
        };
        assert_eq!(SummaryStats::compute(&collections).active_hosts, 1);
    }

    #[test]
    fn test_host_with_missing_metrics_is_inactive() {
        let collections = EntityCollections {
            cloudlets: vec![],
            hosts: vec![host(0, None, None, None)],
            vms: vec![],
        };
        let stats = SummaryStats::compute(&collections);
        assert_eq!(stats.active_hosts, 0);
        assert_eq!(stats.total_hosts, 1);
    }

    #[test]
    fn test_host_with_unparsable_metrics_is_inactive() {
        let collections = EntityCollections {
            cloudlets: vec![],
            hosts: vec![host(0, Some("busy"), Some("lots"), Some("many"))],
            vms: vec![],
        };
        let stats = SummaryStats::compute(&collections);
        assert_eq!(stats.active_hosts, 0);
        assert_eq!(stats.total_energy_wh, 0.0);
    }

    #[test]
    fn test_energy_sums_and_defaults_missing_to_zero() {
        let collections = EntityCollections {
            cloudlets: vec![],
            hosts: vec![
                host(0, None, Some("45.2"), None),
                host(1, None, None, None),
                host(2, None, Some("10.0"), None),
            ],
            vms: vec![],
        };
        let stats = SummaryStats::compute(&collections);
        assert!((stats.total_energy_wh - 55.2).abs() < 1e-9);
        assert_eq!(stats.energy_display(), "55.20 Wh");
    }

    #[test]
    fn test_scenario_from_pipeline() {
        let table = parse_csv(concat!(
            "Type,ID,Metric,Value\n",
            "Cloudlet,0,ExecutionTime,12.5\n",
            "Cloudlet,0,Status,Success\n",
            "Host,0,CPUUtilization,0.5\n",
            "Host,0,EnergyConsumed,10.0\n",
            "Host,0,VMsCount,1\n",
            "VM,0,Host,0\n",
        ))
        .unwrap();
        let collections = aggregate(&table).unwrap();

        assert_eq!(collections.cloudlets.len(), 1);
        assert_eq!(
            collections.cloudlets[0].metric(metric::EXECUTION_TIME),
            Some("12.5")
        );
        assert_eq!(
            collections.cloudlets[0].metric(metric::STATUS),
            Some("Success")
        );
        assert_eq!(collections.hosts[0].metric(metric::VMS_COUNT), Some("1"));
        assert_eq!(collections.vms[0].metric(metric::HOST), Some("0"));

        let stats = SummaryStats::compute(&collections);
        assert_eq!(stats.total_cloudlets, 1);
        assert_eq!(stats.hosts_display(), "1/1");
        assert_eq!(stats.total_vms, 1);
        assert_eq!(stats.energy_display(), "10.00 Wh");
    }

    // ── vm_allocation ─────────────────────────────────────────────────────

    #[test]
    fn test_vm_allocation_groups_by_host() {
        let vms = vec![
            vm(0, Some("1")),
            vm(1, Some("0")),
            vm(2, Some("1")),
            vm(3, Some("-1")),
        ];
        let breakdown = vm_allocation(&vms);
        assert_eq!(
            breakdown,
            vec![
                ("Host 0".to_string(), 1),
                ("Host 1".to_string(), 2),
                ("Unallocated".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_vm_allocation_missing_host_is_unallocated() {
        let breakdown = vm_allocation(&[vm(0, None)]);
        assert_eq!(breakdown, vec![("Unallocated".to_string(), 1)]);
    }

    #[test]
    fn test_vm_allocation_empty() {
        assert!(vm_allocation(&[]).is_empty());
    }

    #[test]
    fn test_vm_allocation_omits_empty_unallocated_bucket() {
        let breakdown = vm_allocation(&[vm(0, Some("2"))]);
        assert_eq!(breakdown, vec![("Host 2".to_string(), 1)]);
    }
}
