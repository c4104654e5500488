//! Node/edge projection of a schema for a diagram renderer.

use crate::model::SchemaData;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailLevel {
    Tables,
    Pk,
    PkFk,
    #[default]
    All,
}

impl DetailLevel {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "tables" => Some(Self::Tables),
            "pk" => Some(Self::Pk),
            "pk_fk" => Some(Self::PkFk),
            "all" => Some(Self::All),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphView {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub columns: Vec<NodeColumn>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub typ: String,
    pub is_pk: bool,
    pub is_fk: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub label: String,
}

impl GraphView {
    pub fn from_schema(schema: &SchemaData, detail: DetailLevel) -> Self {
        let nodes = schema
            .tables
            .iter()
            .map(|t| Node {
                id: t.id.clone(),
                label: t.name.clone(),
                columns: t
                    .columns
                    .iter()
                    .filter(|c| match detail {
                        DetailLevel::Tables => false,
                        DetailLevel::Pk => c.is_primary_key,
                        DetailLevel::PkFk => c.is_primary_key || c.is_foreign_key,
                        DetailLevel::All => true,
                    })
                    .map(|c| NodeColumn {
                        name: c.name.clone(),
                        typ: c.typ.clone(),
                        is_pk: c.is_primary_key,
                        is_fk: c.is_foreign_key,
                    })
                    .collect(),
            })
            .collect();

        let edges = schema
            .relationships
            .iter()
            .map(|r| Edge {
                source: r.source.clone(),
                target: r.target.clone(),
                label: r.label.clone(),
            })
            .collect();

        GraphView { nodes, edges }
    }
}
