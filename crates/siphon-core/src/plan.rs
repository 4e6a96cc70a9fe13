//! Partition plans — split a table's key range into independent,
//! boundable range queries that can be fetched in parallel.

use serde::{Deserialize, Serialize};

/// Caller-supplied partitioning hints. Zero means "not specified".
///
/// `requested_partitions` takes precedence over `batch_size` when both are
/// nonzero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PartitionHints {
    /// Explicit partition count.
    pub requested_partitions: usize,
    /// Target number of rows per partition.
    pub batch_size: u64,
}

/// A single key-range partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRange {
    /// Inclusive lower bound. `None` = unbounded.
    pub lower: Option<i64>,
    /// Exclusive upper bound. `None` = unbounded.
    pub upper: Option<i64>,
}

impl KeyRange {
    /// Render the WHERE clause fragment for this range.
    pub fn where_clause(&self, column: &str) -> String {
        match (self.lower, self.upper) {
            (Some(lo), Some(hi)) => format!("{column} >= {lo} AND {column} < {hi}"),
            (Some(lo), None) => format!("{column} >= {lo}"),
            (None, Some(hi)) => format!("{column} < {hi}"),
            (None, None) => "1=1".to_string(),
        }
    }
}

/// A concrete partitioning of one table read.
///
/// Produced only when a partition column was given and the boundary probe
/// succeeded; the absence of a plan (`Option::None` from the planner) means
/// the read proceeds as a single unbounded scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionPlan {
    /// The integer column the read is split on.
    pub column: String,
    /// Probed minimum of the column.
    pub lower_bound: i64,
    /// Probed maximum of the column.
    pub upper_bound: i64,
    /// Number of partitions to read. Always >= 1.
    pub num_partitions: usize,
}

impl PartitionPlan {
    /// Split `[lower_bound, upper_bound]` into at most `num_partitions`
    /// contiguous half-open ranges.
    ///
    /// The first range is unbounded below and the last unbounded above, so
    /// rows written outside the probed bounds between probe and read still
    /// land in exactly one range. If the key space is narrower than
    /// `num_partitions`, fewer ranges are produced (never zero).
    pub fn key_ranges(&self) -> Vec<KeyRange> {
        assert!(self.num_partitions > 0);
        assert!(self.lower_bound <= self.upper_bound);

        // Widened arithmetic: the full i64 span does not fit in i64.
        let min = self.lower_bound as i128;
        let max = self.upper_bound as i128;
        let n = self.num_partitions as i128;
        let step = (max - min + n - 1) / n;

        let mut ranges = Vec::with_capacity(self.num_partitions);
        let mut lo = min;
        for _ in 0..self.num_partitions {
            let hi = (lo + step).min(max);
            ranges.push(KeyRange {
                lower: if lo <= min { None } else { Some(lo as i64) },
                upper: if hi >= max { None } else { Some(hi as i64) },
            });
            lo = hi;
            if lo >= max {
                break;
            }
        }
        ranges
    }

    /// Render the WHERE clause fragments for every range of this plan.
    pub fn where_clauses(&self) -> Vec<String> {
        self.key_ranges()
            .iter()
            .map(|range| range.where_clause(&self.column))
            .collect()
    }
}
