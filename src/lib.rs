pub mod config;
pub mod details;
pub mod error;
pub mod infer;
pub mod model;
pub mod sql;
pub mod summary;
pub mod view;

use wasm_bindgen::prelude::*;

use config::InferenceRules;
pub use error::ExtractError;
pub use model::{Column, Relationship, SchemaData, Table};

/// Parse DDL into a schema graph using the default naming rules.
///
/// Never fails: unrecognized input yields an empty or partial schema.
pub fn parse_schema(input: &str) -> SchemaData {
    parse_schema_with(input, &InferenceRules::default())
}

/// Parse all tables first, then infer relationships over the complete set.
pub fn parse_schema_with(input: &str, rules: &InferenceRules) -> SchemaData {
    let mut tables = sql::parse_tables(input);
    let relationships = infer::infer_relationships(&mut tables, rules);
    SchemaData {
        tables,
        relationships,
    }
}

/// Like [`parse_schema`], but reports blank input and inputs that contain
/// no recognizable table as distinct errors.
pub fn extract(input: &str) -> Result<SchemaData, ExtractError> {
    extract_with(input, &InferenceRules::default())
}

pub fn extract_with(input: &str, rules: &InferenceRules) -> Result<SchemaData, ExtractError> {
    if input.trim().is_empty() {
        return Err(ExtractError::BlankInput);
    }
    let schema = parse_schema_with(input, rules);
    if schema.is_empty() {
        return Err(ExtractError::NoTables);
    }
    Ok(schema)
}

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Parse DDL to the schema graph as JSON
#[wasm_bindgen(js_name = "parseSchema")]
pub fn parse_schema_json(source: &str) -> Result<String, String> {
    let schema = extract(source).map_err(|e| e.to_string())?;
    serde_json::to_string(&schema).map_err(|e| e.to_string())
}

/// Parse DDL and return the condensed text summary of its tables
#[wasm_bindgen(js_name = "schemaSummary")]
pub fn schema_summary_text(source: &str) -> Result<String, String> {
    let schema = extract(source).map_err(|e| e.to_string())?;
    Ok(summary::schema_summary(&schema.tables))
}
