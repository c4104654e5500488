//! DDL text to tables: segmentation and column parsing.

mod column;
mod lexer;
mod segment;

pub use column::{classify, split_lines, LineShape};
pub use lexer::{Lexer, Token, TokenKind};
pub use segment::{segment, TableBlock};

use crate::model::Table;
use std::collections::HashSet;
use tracing::debug;

/// Parse every `CREATE TABLE` statement in `input`, in source order.
///
/// Foreign-key flags are left unset; relationship inference runs over the
/// complete result afterwards.
pub fn parse_tables(input: &str) -> Vec<Table> {
    let tokens = Lexer::new(input).tokenize();
    let mut ids: HashSet<String> = HashSet::new();
    let mut tables = Vec::new();

    for block in segment(input, &tokens) {
        let columns = column::parse_body(input, block.body);
        let id = unique_id(&block.name, &ids);
        if id != block.name {
            debug!(table = %block.name, %id, "duplicate table name, assigned new id");
        }
        ids.insert(id.clone());

        tables.push(Table {
            id,
            name: block.name,
            columns,
            raw_sql: Some(block.raw_sql.to_string()),
        });
    }

    tables
}

/// The name itself when free, otherwise `name#2`, `name#3`, ...
fn unique_id(name: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(name) {
        return name.to_string();
    }
    (2..)
        .map(|n| format!("{}#{}", name, n))
        .find(|id| !taken.contains(id))
        .unwrap_or_else(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mysql_dump() {
        let sql = r#"
            /*!40101 SET @OLD_CHARACTER_SET_CLIENT=@@CHARACTER_SET_CLIENT */;
            DROP TABLE IF EXISTS `users`;
            CREATE TABLE `users` (
              `id` int NOT NULL AUTO_INCREMENT,
              `name` varchar(255) DEFAULT NULL,
              `balance` decimal(10,2) NOT NULL DEFAULT '0.00',
              PRIMARY KEY (`id`),
              UNIQUE KEY `users_name` (`name`)
            ) ENGINE=InnoDB AUTO_INCREMENT=3 DEFAULT CHARSET=utf8mb4;
        "#;

        let tables = parse_tables(sql);
        assert_eq!(tables.len(), 1);

        let users = &tables[0];
        assert_eq!(users.id, "users");
        assert_eq!(users.name, "users");
        let names: Vec<&str> = users.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "name", "balance"]);
        assert!(users.columns[0].is_primary_key);
        assert_eq!(users.columns[2].typ, "decimal(10,2)");
        assert!(users.raw_sql.as_deref().unwrap().starts_with("CREATE TABLE `users` ("));
        assert!(users.raw_sql.as_deref().unwrap().ends_with(')'));
    }

    #[test]
    fn test_duplicate_names_get_distinct_ids() {
        let sql = "CREATE TABLE t (a int); CREATE TABLE t (b int); CREATE TABLE t (c int);";
        let tables = parse_tables(sql);
        let ids: Vec<&str> = tables.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t", "t#2", "t#3"]);
        assert!(tables.iter().all(|t| t.name == "t"));
    }

    #[test]
    fn test_no_tables() {
        assert!(parse_tables("").is_empty());
        assert!(parse_tables("SELECT 1; INSERT INTO t VALUES (1);").is_empty());
    }
}
