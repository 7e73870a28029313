//! Table-level differencing.

use crate::operations::Operation;
use crate::snapshot::SchemaSnapshot;

/// Computes table additions and removals between two snapshots.
///
/// Every `CreateTable` (in current-document order) precedes every `DropTable`
/// (in previous-document order). Tables present in both versions produce
/// nothing here, however much their definitions differ; column changes are
/// the column pass's job.
#[must_use]
pub fn diff_tables(previous: &SchemaSnapshot, current: &SchemaSnapshot) -> Vec<Operation> {
    let mut operations = Vec::new();

    for table in current.tables() {
        if previous.table(&table.name).is_none() {
            operations.push(Operation::create_table(table.name.clone(), table.node.clone()));
        }
    }

    for table in previous.tables() {
        if current.table(&table.name).is_none() {
            operations.push(Operation::drop_table(table.name.clone()));
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

    #[test]
    fn test_added_and_removed_tables() {
        let previous = snapshot(concat!(
            "<databaseChangeLog>",
            "<createTable tableName=\"users\"/>",
            "<createTable tableName=\"legacy\"/>",
            "</databaseChangeLog>",
        ));
        let current = snapshot(concat!(
            "<databaseChangeLog>",
            "<createTable tableName=\"users\"/>",
            "<createTable tableName=\"orders\"/>",
            "</databaseChangeLog>",
        ));

        let operations = diff_tables(&previous, &current);
        assert_eq!(operations.len(), 2);
        assert!(matches!(
            &operations[0],
            Operation::CreateTable { name, .. } if name == "orders"
        ));
        assert!(matches!(
            &operations[1],
            Operation::DropTable { name } if name == "legacy"
        ));
    }

    #[test]
    fn test_creates_precede_drops() {
        let previous = snapshot("<databaseChangeLog><createTable tableName=\"a\"/></databaseChangeLog>");
        let current = snapshot("<databaseChangeLog><createTable tableName=\"z\"/></databaseChangeLog>");

        let operations = diff_tables(&previous, &current);
        assert!(matches!(operations[0], Operation::CreateTable { .. }));
        assert!(matches!(operations[1], Operation::DropTable { .. }));
    }

    #[test]
    fn test_identical_snapshots_produce_nothing() {
        let input = "<databaseChangeLog><createTable tableName=\"users\"/></databaseChangeLog>";
        assert!(diff_tables(&snapshot(input), &snapshot(input)).is_empty());
    }

    #[test]
    fn test_changed_definition_of_existing_table_is_ignored() {
        // Same name on both sides means "same table", no matter the columns.
        let previous = snapshot(concat!(
            "<databaseChangeLog><createTable tableName=\"users\">",
            "<column name=\"id\" type=\"int\"/>",
            "</createTable></databaseChangeLog>",
        ));
        let current = snapshot(concat!(
            "<databaseChangeLog><createTable tableName=\"users\">",
            "<column name=\"id\" type=\"bigint\"/>",
            "<column name=\"email\" type=\"text\"/>",
            "</createTable></databaseChangeLog>",
        ));
        assert!(diff_tables(&previous, &current).is_empty());
    }

    #[test]
    fn test_create_carries_the_current_definition() {
        let previous = snapshot("<databaseChangeLog/>");
        let current = snapshot(concat!(
            "<databaseChangeLog><createTable tableName=\"orders\">",
            "<column name=\"id\" type=\"int\"/>",
            "</createTable></databaseChangeLog>",
        ));

        let operations = diff_tables(&previous, &current);
        let Operation::CreateTable { table, .. } = &operations[0] else {
            panic!("expected a CreateTable operation");
        };
        assert_eq!(table.descendants("column").len(), 1);
    }
}
