//! Relationship inference from column naming conventions.
//!
//! Runs after every table has been parsed: resolving `user_id` needs to know
//! whether `user`, `users` or `useres` exists anywhere in the input.

use crate::config::InferenceRules;
use crate::model::{Relationship, Table};
use std::collections::HashMap;
use tracing::debug;

/// Table name to id, first occurrence wins.
struct TableIndex {
    ids: HashMap<String, String>,
}

impl TableIndex {
    fn new(tables: &[Table]) -> Self {
        let mut ids = HashMap::new();
        for table in tables {
            ids.entry(table.name.clone())
                .or_insert_with(|| table.id.clone());
        }
        Self { ids }
    }

    /// Exact name first, then each plural suffix in order.
    fn resolve(&self, base: &str, rules: &InferenceRules) -> Option<&str> {
        if let Some(id) = self.ids.get(base) {
            return Some(id.as_str());
        }
        rules
            .plural_suffixes
            .iter()
            .find_map(|suffix| self.ids.get(&format!("{}{}", base, suffix)))
            .map(String::as_str)
    }
}

/// Mark foreign-key columns and return the inferred edges, ordered by table
/// then column declaration order.
pub fn infer_relationships(tables: &mut [Table], rules: &InferenceRules) -> Vec<Relationship> {
    let index = TableIndex::new(tables);
    let mut relationships = Vec::new();

    for table in tables.iter_mut() {
        for col in &mut table.columns {
            let target = if col.name == rules.self_reference {
                Some(table.id.as_str())
            } else {
                col.name
                    .strip_suffix(rules.fk_suffix.as_str())
                    .and_then(|base| index.resolve(base, rules))
            };

            let Some(target) = target else {
                continue;
            };

            debug!(source = %table.id, %target, column = %col.name, "inferred relationship");
            col.is_foreign_key = true;
            relationships.push(Relationship {
                source: table.id.clone(),
                target: target.to_string(),
                label: col.name.clone(),
            });
        }
    }

    relationships
}
