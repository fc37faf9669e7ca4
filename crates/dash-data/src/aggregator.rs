//! Pivoting of long-format summary rows into per-entity records.
//!
//! Each summary row carries a single `(Type, ID, Metric, Value)` fact. The
//! aggregator groups those facts by `(Type, ID)` and merges them into wide
//! [`EntityRecord`]s, one collection per entity type. It is a pure reducer:
//! no state is retained between calls, and a fresh invocation rebuilds the
//! collections from scratch.

use std::collections::BTreeMap;

use dash_core::models::{EntityCollections, EntityRecord, EntityType};
use dash_core::{DashError, Result};
use tracing::warn;

use crate::csv::CsvTable;

/// Column holding the entity type of a row.
pub const COL_TYPE: &str = "Type";
/// Column holding the entity id of a row.
pub const COL_ID: &str = "ID";
/// Column naming the metric a row reports.
pub const COL_METRIC: &str = "Metric";
/// Column holding the raw metric value.
pub const COL_VALUE: &str = "Value";

/// All columns a summary header must provide, in no particular order.
pub const REQUIRED_COLUMNS: [&str; 4] = [COL_TYPE, COL_ID, COL_METRIC, COL_VALUE];

/// Pivot parsed summary rows into the three entity collections.
///
/// Rows are processed in input order, but the output collections are sorted
/// ascending by id regardless of arrival order; rows for one entity need not
/// be contiguous. Duplicate metrics for the same entity are last-write-wins.
///
/// Field-level anomalies degrade instead of erroring:
/// * an unrecognized `Type` value skips the row silently (forward-compatible
///   with future row types);
/// * a non-numeric `ID` drops the row with a warning — the upstream data is
///   machine-generated, so this is noise rather than a fatal condition.
///
/// A header missing one of [`REQUIRED_COLUMNS`] is structural and fails with
/// [`DashError::MissingColumn`].
pub fn aggregate(table: &CsvTable) -> Result<EntityCollections> {
    for column in REQUIRED_COLUMNS {
        if !table.has_column(column) {
            return Err(DashError::MissingColumn(column.to_string()));
        }
    }

    // BTreeMap keyed by id: no sparse holes to compact, and materializing
    // into a Vec yields ascending-id order for free.
    let mut cloudlets: BTreeMap<u32, EntityRecord> = BTreeMap::new();
    let mut hosts: BTreeMap<u32, EntityRecord> = BTreeMap::new();
    let mut vms: BTreeMap<u32, EntityRecord> = BTreeMap::new();

    for row in &table.rows {
        let type_field = row.get(COL_TYPE).map(String::as_str).unwrap_or("");
        let Some(entity_type) = EntityType::from_type_field(type_field) else {
            continue;
        };

        let id_field = row.get(COL_ID).map(String::as_str).unwrap_or("");
        let id: u32 = match id_field.trim().parse() {
            Ok(id) => id,
            Err(_) => {
                warn!(
                    entity_type = entity_type.as_str(),
                    id = id_field,
                    "dropping summary row with non-numeric ID"
                );
                continue;
            }
        };

        let metric = row.get(COL_METRIC).map(String::as_str).unwrap_or("");
        let value = row.get(COL_VALUE).map(String::as_str).unwrap_or("");

        let destination = match entity_type {
            EntityType::Cloudlet => &mut cloudlets,
            EntityType::Host => &mut hosts,
            EntityType::Vm => &mut vms,
        };
        destination
            .entry(id)
            .or_insert_with(|| EntityRecord::new(id))
            .set_metric(metric, value);
    }

    Ok(EntityCollections {
        cloudlets: cloudlets.into_values().collect(),
        hosts: hosts.into_values().collect(),
        vms: vms.into_values().collect(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
