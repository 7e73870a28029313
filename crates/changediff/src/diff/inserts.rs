//! Seed-insert differencing.

use crate::operations::Operation;
use crate::snapshot::SchemaSnapshot;

/// Computes the seed inserts that are new in the current version.
///
/// An insert block counts as new when no block in the previous version
/// targets the same table. The pass is asymmetric: removing a seed block
/// never produces an operation. Seed data is only ever added, never
/// retracted.
#[must_use]
pub fn diff_inserts(previous: &SchemaSnapshot, current: &SchemaSnapshot) -> Vec<Operation> {
    current
        .inserts()
        .iter()
        .filter(|block| !previous.has_insert_for(&block.table_name))
        .map(|block| Operation::insert_seed(block.table_name.clone(), block.node.clone()))
        .collect()
}
