//! Schema graph produced by a parse: tables, columns and relationships.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SchemaData {
    pub tables: Vec<Table>,
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Graph-node identity. Equal to `name` unless the name was already taken
    /// by an earlier statement in the same input.
    pub id: String,
    pub name: String,
    pub columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_sql: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub typ: String,
    pub is_primary_key: bool,
    pub is_foreign_key: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub source: String,
    pub target: String,
    pub label: String,
}

impl SchemaData {
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn table(&self, id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    /// Relationships whose source or target is the given table id.
    pub fn relationships_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Relationship> {
        self.relationships
            .iter()
            .filter(move |r| r.source == id || r.target == id)
    }
}

impl Table {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn primary_key(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_primary_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> Table {
        Table {
            id: "users".to_string(),
            name: "users".to_string(),
            columns: vec![Column {
                name: "id".to_string(),
                typ: "int".to_string(),
                is_primary_key: true,
                is_foreign_key: false,
                comment: None,
                nullable: false,
            }],
            raw_sql: None,
        }
    }

    #[test]
    fn test_json_field_names() {
        let schema = SchemaData {
            tables: vec![users()],
            relationships: vec![Relationship {
                source: "users".to_string(),
                target: "users".to_string(),
                label: "parent_id".to_string(),
            }],
        };

        let json = serde_json::to_value(&schema).unwrap();
        let column = &json["tables"][0]["columns"][0];
        assert_eq!(column["type"], "int");
        assert_eq!(column["isPrimaryKey"], true);
        assert_eq!(column["isForeignKey"], false);
        assert!(column.get("comment").is_none());
        assert!(json["tables"][0].get("rawSql").is_none());
        assert_eq!(json["relationships"][0]["label"], "parent_id");
    }

    #[test]
    fn test_lookup_helpers() {
        let schema = SchemaData {
            tables: vec![users()],
            relationships: vec![],
        };
        let table = schema.table("users").unwrap();
        assert!(table.column("id").is_some());
        assert!(table.column("missing").is_none());
        assert_eq!(table.primary_key().count(), 1);
        assert_eq!(schema.relationships_of("users").count(), 0);
    }
}
