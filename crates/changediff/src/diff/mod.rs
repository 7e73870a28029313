//! Differencing passes over two schema snapshots.
//!
//! Each pass is a pure function from `(previous, current)` to a list of
//! operations, ordered the way they are emitted. Entities are matched by name
//! only; a renamed table or column diffs as a drop plus an add.

mod columns;
mod inserts;
mod tables;

pub use columns::diff_columns;
pub use inserts::diff_inserts;
pub use tables::diff_tables;
