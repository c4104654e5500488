//! Naming-convention rules used by relationship inference.

use std::env;

/// Foreign-key naming rules.
///
/// The defaults are the fixed behavior: `<base>_id` resolves to a table named
/// `<base>`, then `<base>s`, then `<base>es`, and `parent_id` always points
/// at its own table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceRules {
    /// Column-name suffix marking a foreign-key candidate.
    pub fk_suffix: String,
    /// Column name that always references its owning table.
    pub self_reference: String,
    /// Suffixes tried after an exact match, in order.
    pub plural_suffixes: Vec<String>,
}

impl Default for InferenceRules {
    fn default() -> Self {
        Self {
            fk_suffix: "_id".to_string(),
            self_reference: "parent_id".to_string(),
            plural_suffixes: vec!["s".to_string(), "es".to_string()],
        }
    }
}

impl InferenceRules {
    /// Load rules from `DDLGRAPH_*` environment variables, defaulting each
    /// unset or empty variable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            fk_suffix: non_empty("DDLGRAPH_FK_SUFFIX").unwrap_or(defaults.fk_suffix),
            self_reference: non_empty("DDLGRAPH_SELF_REFERENCE")
                .unwrap_or(defaults.self_reference),
            plural_suffixes: non_empty("DDLGRAPH_PLURAL_SUFFIXES")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect::<Vec<_>>()
                })
                .unwrap_or(defaults.plural_suffixes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let rules = InferenceRules::default();
        assert_eq!(rules.fk_suffix, "_id");
        assert_eq!(rules.self_reference, "parent_id");
        assert_eq!(rules.plural_suffixes, vec!["s", "es"]);
    }

    #[test]
    fn test_unset_variables_use_defaults() {
        assert_eq!(InferenceRules::from_lookup(lookup(&[])), InferenceRules::default());
    }

    #[test]
    fn test_overrides() {
        let rules = InferenceRules::from_lookup(lookup(&[
            ("DDLGRAPH_FK_SUFFIX", "Id"),
            ("DDLGRAPH_PLURAL_SUFFIXES", "s, ies ,"),
            ("DDLGRAPH_SELF_REFERENCE", " "),
        ]));
        assert_eq!(rules.fk_suffix, "Id");
        assert_eq!(rules.plural_suffixes, vec!["s", "ies"]);
        assert_eq!(rules.self_reference, "parent_id");
    }
}
