//! Migration changelog assembly.
//!
//! The generator drives the three differencing passes in a fixed order:
//! tables, then columns, then seed inserts. Structure has to exist before
//! columns can be added to it, and columns before rows reference them, so the
//! emitted script keeps that order too. Every detected operation is wrapped
//! in a `changeSet` whose identifier comes from the injected allocator.

use std::path::Path;

use changediff_dom::{Element, Reader, XmlWriter};
use tracing::{debug, error, info};

use crate::counter::{ChangesetIds, CounterStore};
use crate::diff::{diff_columns, diff_inserts, diff_tables};
use crate::error::{DiffError, Result};
use crate::operations::Operation;
use crate::snapshot::SchemaSnapshot;

const XMLNS: &str = "http://www.liquibase.org/xml/ns/dbchangelog";
const XMLNS_XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
const XSI_SCHEMA_LOCATION: &str = "http://www.liquibase.org/xml/ns/dbchangelog \
                                   http://www.liquibase.org/xml/ns/dbchangelog/dbchangelog-latest.xsd";

/// Assembles a migration changelog from the difference between two schema
/// changelog versions.
#[derive(Debug)]
pub struct MigrationGenerator<S: CounterStore> {
    ids: ChangesetIds<S>,
}

impl<S: CounterStore> MigrationGenerator<S> {
    /// Creates a generator around an identifier allocator.
    pub fn new(ids: ChangesetIds<S>) -> Self {
        Self { ids }
    }

    /// Loads both changelog files, diffs them, and returns the serialized
    /// migration document.
    ///
    /// # Errors
    ///
    /// Returns an error when either input cannot be read or parsed, or when
    /// the counter store fails a write. No output is produced in that case.
    pub fn generate_from_paths(&mut self, previous: &Path, current: &Path) -> Result<String> {
        let previous = load_changelog(previous)?;
        let current = load_changelog(current)?;
        let migration = self.generate(&previous, &current)?;
        Ok(XmlWriter::new().write_document(&migration))
    }

    /// Diffs two parsed changelog documents into a migration document.
    ///
    /// # Errors
    ///
    /// Returns an error when either document lacks identity attributes on its
    /// schema elements, or when the counter store fails a write.
    pub fn generate(&mut self, previous: &Element, current: &Element) -> Result<Element> {
        let previous = SchemaSnapshot::from_document(previous)?;
        let current = SchemaSnapshot::from_document(current)?;
        debug!(
            previous_tables = previous.tables().count(),
            current_tables = current.tables().count(),
            "Snapshots extracted"
        );

        let mut root = migration_root();
        let mut emitted = 0;

        emitted += self.append_operations(&mut root, diff_tables(&previous, &current))?;

        // The column stage is best effort: anything short of a counter-store
        // failure is logged here and the run keeps what it already emitted.
        match self.append_operations(&mut root, diff_columns(&previous, &current)) {
            Ok(count) => emitted += count,
            Err(err) if err.is_persistence() => return Err(err),
            Err(err) => {
                error!(error = %err, "Column differencing failed, skipping that stage");
            }
        }

        emitted += self.append_operations(&mut root, diff_inserts(&previous, &current))?;

        info!(changesets = emitted, "Assembled migration changelog");
        Ok(root)
    }

    fn append_operations(&mut self, root: &mut Element, operations: Vec<Operation>) -> Result<usize> {
        let count = operations.len();
        for operation in operations {
            let id = self.ids.next_id(&operation.id_prefix())?;
            debug!(changeset = %id, "Emitting changeset");
            root.push_child(operation.into_change_set(&id));
        }
        Ok(count)
    }

    /// The identifier allocator, for inspecting counter state.
    pub fn ids(&self) -> &ChangesetIds<S> {
        &self.ids
    }

    /// Consumes the generator and hands the allocator back.
    pub fn into_ids(self) -> ChangesetIds<S> {
        self.ids
    }
}

/// Reads and parses one changelog document.
///
/// # Errors
///
/// Returns [`DiffError::Read`] when the file cannot be read and
/// [`DiffError::Parse`] when its content is not a well-formed document.
pub fn load_changelog(path: &Path) -> Result<Element> {
    debug!(path = %path.display(), "Loading changelog");
    let text = std::fs::read_to_string(path).map_err(|source| DiffError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Reader::new(&text)
        .read_document()
        .map_err(|source| DiffError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

fn migration_root() -> Element {
    Element::new("databaseChangeLog")
        .attr("xmlns", XMLNS)
        .attr("xmlns:xsi", XMLNS_XSI)
        .attr("xsi:schemaLocation", XSI_SCHEMA_LOCATION)
}
