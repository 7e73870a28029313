//! Migration operations and their `changeSet` rendering.
//!
//! A detected difference becomes one [`Operation`], and each operation is
//! rendered as exactly one `changeSet` element. Payloads carried over from an
//! input document (new tables, new columns, new inserts) are emitted verbatim;
//! drop payloads are synthesized, since only the name of a dropped entity
//! matters.

use changediff_dom::Element;

/// Author attribute stamped on every generated changeSet.
pub const CHANGESET_AUTHOR: &str = "migration";

/// A single detected schema or seed-data change.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// A table present only in the current version.
    CreateTable {
        /// Table name.
        name: String,
        /// The verbatim `createTable` element from the current document.
        table: Element,
    },
    /// A table present only in the previous version.
    DropTable {
        /// Table name.
        name: String,
    },
    /// Columns added to a table present in both versions.
    AddColumn {
        /// Table name.
        table: String,
        /// Verbatim `column` elements from the current document.
        columns: Vec<Element>,
    },
    /// Columns removed from a table present in both versions.
    DropColumn {
        /// Table name.
        table: String,
        /// Names of the removed columns.
        columns: Vec<String>,
    },
    /// A seed insert for a table that had none in the previous version.
    InsertSeed {
        /// Target table name.
        table: String,
        /// The verbatim `insert` element from the current document.
        insert: Element,
    },
}

impl Operation {
    /// Creates a table-creation operation.
    #[must_use]
    pub fn create_table(name: impl Into<String>, table: Element) -> Self {
        Self::CreateTable {
            name: name.into(),
            table,
        }
    }

    /// Creates a table-drop operation.
    #[must_use]
    pub fn drop_table(name: impl Into<String>) -> Self {
        Self::DropTable { name: name.into() }
    }

    /// Creates a column-addition operation covering all added columns of one table.
    #[must_use]
    pub fn add_column(table: impl Into<String>, columns: Vec<Element>) -> Self {
        Self::AddColumn {
            table: table.into(),
            columns,
        }
    }

    /// Creates a column-drop operation covering all removed columns of one table.
    #[must_use]
    pub fn drop_column(table: impl Into<String>, columns: Vec<String>) -> Self {
        Self::DropColumn {
            table: table.into(),
            columns,
        }
    }

    /// Creates a seed-insert operation.
    #[must_use]
    pub fn insert_seed(table: impl Into<String>, insert: Element) -> Self {
        Self::InsertSeed {
            table: table.into(),
            insert,
        }
    }

    /// The identifier prefix for this operation's changeSet. The allocator
    /// appends the counter suffix to it.
    #[must_use]
    pub fn id_prefix(&self) -> String {
        match self {
            Self::CreateTable { name, .. } => format!("create-table-{name}"),
            Self::DropTable { name } => format!("drop-table-{name}"),
            Self::AddColumn { table, .. } => format!("add-column-{table}"),
            Self::DropColumn { table, .. } => format!("drop-column-{table}"),
            Self::InsertSeed { table, .. } => format!("insert-{table}"),
        }
    }

    /// Wraps this operation's payload in a `changeSet` element carrying the
    /// given identifier.
    #[must_use]
    pub fn into_change_set(self, id: &str) -> Element {
        Element::new("changeSet")
            .attr("author", CHANGESET_AUTHOR)
            .attr("id", id)
            .child(self.into_payload())
    }

    fn into_payload(self) -> Element {
        match self {
            Self::CreateTable { table, .. } => table,
            Self::DropTable { name } => Element::new("dropTable").attr("tableName", name),
            Self::AddColumn { table, columns } => {
                let mut payload = Element::new("addColumn").attr("tableName", table);
                for column in columns {
                    payload.push_child(column);
                }
                payload
            }
            Self::DropColumn { table, columns } => {
                let mut payload = Element::new("dropColumn").attr("tableName", table);
                for name in columns {
                    payload.push_child(Element::new("column").attr("name", name));
                }
                payload
            }
            Self::InsertSeed { insert, .. } => insert,
        }
    }
}
