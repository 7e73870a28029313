//! Schema snapshots extracted from parsed changelog documents.
//!
//! A snapshot reduces one changelog version to the parts the differs care
//! about: tables with their columns, and seed-data insert blocks. Elements
//! are found by a deep scan, so schema nodes are picked up no matter how they
//! are wrapped in `changeSet` or grouping elements. Identity is the `name` /
//! `tableName` attribute throughout; nothing else about an element
//! participates in comparison.

use std::collections::HashSet;

use changediff_dom::Element;
use indexmap::IndexMap;
use tracing::warn;

use crate::error::{DiffError, Result};

/// A column extracted from a `createTable` element.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Value of the column's `name` attribute.
    pub name: String,
    /// The original `column` element, kept so additions can be copied into
    /// the migration verbatim.
    pub node: Element,
}

/// A table extracted from a changelog document.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Value of the table's `tableName` attribute.
    pub name: String,
    /// The original `createTable` element.
    pub node: Element,
    /// Columns in document order.
    pub columns: Vec<Column>,
}

impl Table {
    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }
}

/// A seed-data `insert` block extracted from a changelog document.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertBlock {
    /// Value of the insert's `tableName` attribute.
    pub table_name: String,
    /// The original `insert` element.
    pub node: Element,
}

/// Everything one changelog version declares: tables and seed inserts.
#[derive(Debug, Clone, Default)]
pub struct SchemaSnapshot {
    tables: IndexMap<String, Table>,
    inserts: Vec<InsertBlock>,
    insert_tables: HashSet<String>,
}

impl SchemaSnapshot {
    /// Extracts a snapshot from a parsed changelog document.
    ///
    /// Duplicate table names keep the first occurrence and log the rest.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::MissingAttribute`] when a `createTable` or
    /// `insert` has no `tableName`, or a table column has no `name`. An
    /// empty attribute value counts as missing.
    pub fn from_document(document: &Element) -> Result<Self> {
        let mut tables = IndexMap::new();
        for node in document.descendants("createTable") {
            let name = require_attr(node, "tableName")?;
            let columns = node
                .descendants("column")
                .into_iter()
                .map(|column| {
                    Ok(Column {
                        name: require_attr(column, "name")?,
                        node: column.clone(),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            if tables.contains_key(&name) {
                warn!(table = %name, "Duplicate createTable entry, keeping the first");
                continue;
            }
            tables.insert(
                name.clone(),
                Table {
                    name,
                    node: node.clone(),
                    columns,
                },
            );
        }

        let mut inserts = Vec::new();
        let mut insert_tables = HashSet::new();
        for node in document.descendants("insert") {
            let table_name = require_attr(node, "tableName")?;
            insert_tables.insert(table_name.clone());
            inserts.push(InsertBlock {
                table_name,
                node: node.clone(),
            });
        }

        Ok(Self {
            tables,
            inserts,
            insert_tables,
        })
    }

    /// Iterates over the tables in document order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    /// Looks up a table by name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// The seed insert blocks in document order.
    #[must_use]
    pub fn inserts(&self) -> &[InsertBlock] {
        &self.inserts
    }

    /// True when any insert block targets the given table.
    #[must_use]
    pub fn has_insert_for(&self, table_name: &str) -> bool {
        self.insert_tables.contains(table_name)
    }
}

fn require_attr(node: &Element, attribute: &str) -> Result<String> {
    match node.attribute(attribute) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(DiffError::MissingAttribute {
            element: node.name.clone(),
            attribute: attribute.to_string(),
        }),
    }
}
