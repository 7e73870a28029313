//! # changediff
//!
//! Generates a migration changelog from the structural difference between
//! two versions of a declarative schema changelog.
//!
//! ## How a run works
//!
//! 1. Both changelog documents are parsed and reduced to
//!    [`snapshot::SchemaSnapshot`]s: tables with their columns, plus seed
//!    insert blocks, matched by name identity only.
//! 2. Three passes diff the snapshots: tables, then columns of tables present
//!    in both versions, then seed inserts. Renames are invisible to the
//!    passes and come out as a drop plus an add.
//! 3. Every detected operation is wrapped in a `changeSet` element whose
//!    identifier comes from [`counter::ChangesetIds`], a monotonic counter
//!    persisted across runs, and the result is serialized under a namespaced
//!    `databaseChangeLog` root.
//!
//! ## Example
//!
//! ```rust
//! use changediff::counter::{ChangesetIds, MemoryCounterStore};
//! use changediff::generator::MigrationGenerator;
//! use changediff_dom::Reader;
//!
//! let previous = Reader::new("<databaseChangeLog/>").read_document().unwrap();
//! let current = Reader::new(
//!     r#"<databaseChangeLog>
//!          <createTable tableName="users"><column name="id" type="int"/></createTable>
//!        </databaseChangeLog>"#,
//! )
//! .read_document()
//! .unwrap();
//!
//! let mut generator = MigrationGenerator::new(ChangesetIds::new(MemoryCounterStore::new()));
//! let migration = generator.generate(&previous, &current).unwrap();
//!
//! let ids: Vec<_> = migration
//!     .child_elements()
//!     .map(|change_set| change_set.attribute("id").unwrap())
//!     .collect();
//! assert_eq!(ids, ["create-table-users-1"]);
//! ```

pub mod counter;
pub mod diff;
pub mod error;
pub mod generator;
pub mod operations;
pub mod snapshot;

/// Commonly used types, re-exported for convenience.
pub mod prelude {
    pub use crate::counter::{ChangesetIds, CounterStore, FsCounterStore, MemoryCounterStore};
    pub use crate::diff::{diff_columns, diff_inserts, diff_tables};
    pub use crate::error::{DiffError, Result};
    pub use crate::generator::{load_changelog, MigrationGenerator};
    pub use crate::operations::Operation;
    pub use crate::snapshot::{Column, InsertBlock, SchemaSnapshot, Table};
}
