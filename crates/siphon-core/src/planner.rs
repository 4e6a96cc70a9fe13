//! Plan derivation — decide whether and how to partition one table read.

use tracing::{debug, warn};

use crate::plan::{PartitionHints, PartitionPlan};
use crate::probe::BoundaryProber;

/// Derive a partition plan from the caller's hints and a single boundary
/// probe.
///
/// The rules are evaluated in priority order; the first match wins:
/// 1. No partition column → no plan, and the prober is never invoked.
/// 2. Probe failure → no plan. Boundary discovery is an optimization, so a
///    failed probe degrades the read to a single unbounded scan instead of
///    failing it.
/// 3. `requested_partitions > 0` → exactly that many partitions over the
///    probed `[min, max]`. The probed count is ignored; an explicit request
///    fixes partition cardinality regardless of row volume.
/// 4. `batch_size > 0` → `count / batch_size + 1` partitions over the probed
///    `[min, max]`. The `+1` keeps every batch at or below the target size
///    at the cost of one small trailing partition.
/// 5. Neither hint set → no plan.
///
/// Never fails: every input combination maps to `Some(plan)` or `None`.
pub async fn derive_plan(
    column: Option<&str>,
    hints: PartitionHints,
    prober: &dyn BoundaryProber,
) -> Option<PartitionPlan> {
    let column = match column {
        Some(col) if !col.is_empty() => col,
        _ => return None,
    };

    let boundaries = match prober.probe(column, hints.requested_partitions).await {
        Ok(boundaries) => boundaries,
        Err(e) => {
            warn!(
                "Boundary probe on column '{}' failed, reading unpartitioned: {}",
                column, e
            );
            return None;
        }
    };

    if hints.requested_partitions > 0 {
        return Some(PartitionPlan {
            column: column.to_string(),
            lower_bound: boundaries.min,
            upper_bound: boundaries.max,
            num_partitions: hints.requested_partitions,
        });
    }

    if hints.batch_size > 0 {
        let num_partitions = (boundaries.count / hints.batch_size) as usize + 1;
        debug!(
            "Derived {} partitions for column '{}' from count={} batch_size={}",
            num_partitions, column, boundaries.count, hints.batch_size
        );
        return Some(PartitionPlan {
            column: column.to_string(),
            lower_bound: boundaries.min,
            upper_bound: boundaries.max,
            num_partitions,
        });
    }

    None
}
