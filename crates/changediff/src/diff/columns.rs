//! Column-level differencing for tables present in both versions.

use changediff_dom::Element;

use crate::operations::Operation;
use crate::snapshot::SchemaSnapshot;

/// Computes column additions and removals for surviving tables.
///
/// Tables that exist in only one snapshot are skipped: their columns are
/// already covered by the table pass. Added columns for one table are grouped
/// into a single `AddColumn` operation, removals into a single `DropColumn`,
/// and every `AddColumn` precedes every `DropColumn`.
#[must_use]
pub fn diff_columns(previous: &SchemaSnapshot, current: &SchemaSnapshot) -> Vec<Operation> {
    let mut operations = Vec::new();

    for table in current.tables() {
        let Some(previous_table) = previous.table(&table.name) else {
            continue;
        };
        let added: Vec<Element> = table
            .columns
            .iter()
            .filter(|column| previous_table.column(&column.name).is_none())
            .map(|column| column.node.clone())
            .collect();
        if !added.is_empty() {
            operations.push(Operation::add_column(table.name.clone(), added));
        }
    }

    for table in previous.tables() {
        let Some(current_table) = current.table(&table.name) else {
            continue;
        };
        let removed: Vec<String> = table
            .columns
            .iter()
            .filter(|column| current_table.column(&column.name).is_none())
            .map(|column| column.name.clone())
            .collect();
        if !removed.is_empty() {
            operations.push(Operation::drop_column(table.name.clone(), removed));
        }
    }

    operations
}

#[cfg(test)]
mod tests {
    use super::*;
    use changediff_dom::Reader;

    fn snapshot(input: &str) -> SchemaSnapshot {
        let doc = Reader::new(input).read_document().unwrap();
        SchemaSnapshot::from_document(&doc).unwrap()
    }

    fn users(columns: &str) -> SchemaSnapshot {
        snapshot(&format!(
            "<databaseChangeLog><createTable tableName=\"users\">{columns}</createTable></databaseChangeLog>"
        ))
    }

    #[test]
    fn test_added_columns_are_grouped_per_table() {
        let previous = users("<column name=\"id\" type=\"int\"/>");
        let current = users(concat!(
            "<column name=\"id\" type=\"int\"/>",
            "<column name=\"email\" type=\"text\"/>",
            "<column name=\"created_at\" type=\"timestamp\"/>",
        ));

        let operations = diff_columns(&previous, &current);
        assert_eq!(operations.len(), 1);
        let Operation::AddColumn { table, columns } = &operations[0] else {
            panic!("expected an AddColumn operation");
        };
        assert_eq!(table, "users");
        let names: Vec<_> = columns
            .iter()
            .map(|column| column.attribute("name").unwrap())
            .collect();
        assert_eq!(names, ["email", "created_at"]);
    }

    #[test]
    fn test_removed_columns_are_grouped_per_table() {
        let previous = users(concat!(
            "<column name=\"id\"/>",
            "<column name=\"ssn\"/>",
            "<column name=\"fax\"/>",
        ));
        let current = users("<column name=\"id\"/>");

        let operations = diff_columns(&previous, &current);
        assert_eq!(operations.len(), 1);
        assert!(matches!(
            &operations[0],
            Operation::DropColumn { table, columns }
                if table == "users" && columns == &["ssn".to_string(), "fax".to_string()]
        ));
    }

    #[test]
    fn test_rename_is_an_add_plus_a_drop() {
        let previous = users("<column name=\"mail\" type=\"text\"/>");
        let current = users("<column name=\"email\" type=\"text\"/>");

        let operations = diff_columns(&previous, &current);
        assert_eq!(operations.len(), 2);
        assert!(matches!(&operations[0], Operation::AddColumn { .. }));
        assert!(matches!(&operations[1], Operation::DropColumn { .. }));
    }

    #[test]
    fn test_type_change_alone_is_invisible() {
        let previous = users("<column name=\"id\" type=\"int\"/>");
        let current = users("<column name=\"id\" type=\"bigint\"/>");
        assert!(diff_columns(&previous, &current).is_empty());
    }

    #[test]
    fn test_tables_missing_from_either_side_are_skipped() {
        let previous = snapshot(concat!(
            "<databaseChangeLog>",
            "<createTable tableName=\"legacy\"><column name=\"id\"/></createTable>",
            "</databaseChangeLog>",
        ));
        let current = snapshot(concat!(
            "<databaseChangeLog>",
            "<createTable tableName=\"orders\"><column name=\"id\"/></createTable>",
            "</databaseChangeLog>",
        ));
        assert!(diff_columns(&previous, &current).is_empty());
    }

    #[test]
    fn test_added_column_carries_its_full_definition() {
        let previous = users("<column name=\"id\"/>");
        let current = users(concat!(
            "<column name=\"id\"/>",
            "<column name=\"email\" type=\"varchar(255)\" defaultValue=\"none\"/>",
        ));

        let operations = diff_columns(&previous, &current);
        let Operation::AddColumn { columns, .. } = &operations[0] else {
            panic!("expected an AddColumn operation");
        };
        assert_eq!(columns[0].attribute("type"), Some("varchar(255)"));
        assert_eq!(columns[0].attribute("defaultValue"), Some("none"));
    }
}
