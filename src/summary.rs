//! Condensed text form of a schema, sized for a language-model prompt.

use crate::model::{Column, Table};

/// `Table: <name>` followed by `Columns: name(type) [comment], ...`, one
/// paragraph per table.
pub fn schema_summary(tables: &[Table]) -> String {
    tables
        .iter()
        .map(|t| {
            let columns: Vec<String> = t.columns.iter().map(column_entry).collect();
            format!("Table: {}\nColumns: {}", t.name, columns.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn column_entry(col: &Column) -> String {
    match &col.comment {
        Some(comment) => format!("{}({}) [{}]", col.name, col.typ, comment),
        None => format!("{}({})", col.name, col.typ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_schema;

    #[test]
    fn test_summary_format() {
        let schema = parse_schema(
            "CREATE TABLE users (id int, email varchar(255) COMMENT 'login');\n\
             CREATE TABLE posts (id bigint);",
        );
        assert_eq!(
            schema_summary(&schema.tables),
            "Table: users\nColumns: id(int), email(varchar(255)) [login]\n\nTable: posts\nColumns: id(bigint)"
        );
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(schema_summary(&[]), "");
    }
}
