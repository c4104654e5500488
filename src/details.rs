//! Plain-text details panel for a single table.

use crate::model::{Column, SchemaData, Table};
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells; wide characters count as two.
pub fn text_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text_width(text));
    format!("{}{}", text, " ".repeat(fill))
}

fn badge(col: &Column) -> &'static str {
    match (col.is_primary_key, col.is_foreign_key) {
        (true, true) => "PK,FK",
        (true, false) => "PK",
        (false, true) => "FK",
        (false, false) => "",
    }
}

fn nullability(col: &Column) -> &'static str {
    if col.nullable { "NULL" } else { "NOT NULL" }
}

/// Render the table name, one aligned row per column (key badge, name,
/// type, nullability, comment), then its primary key and the relationships
/// it takes part in.
pub fn render_table(schema: &SchemaData, table: &Table) -> String {
    let mut out = String::new();
    push_line(&mut out, &table.name);
    push_line(&mut out, &"=".repeat(text_width(&table.name).max(1)));

    let badge_w = table.columns.iter().map(|c| badge(c).len()).max().unwrap_or(0);
    let name_w = table.columns.iter().map(|c| text_width(&c.name)).max().unwrap_or(0);
    let type_w = table.columns.iter().map(|c| text_width(&c.typ)).max().unwrap_or(0);
    let null_w = table.columns.iter().map(|c| nullability(c).len()).max().unwrap_or(0);

    for col in &table.columns {
        let mut row = format!(
            "{}  {}  {}  {}",
            pad(badge(col), badge_w),
            pad(&col.name, name_w),
            pad(&col.typ, type_w),
            pad(nullability(col), null_w)
        );
        if let Some(comment) = &col.comment {
            row.push_str("  ");
            row.push_str(comment);
        }
        push_line(&mut out, row.trim_end());
    }

    let primary_key: Vec<&str> = table.primary_key().map(|c| c.name.as_str()).collect();
    if !primary_key.is_empty() {
        out.push('\n');
        push_line(&mut out, &format!("Primary key: {}", primary_key.join(", ")));
    }

    let relationships: Vec<String> = schema
        .relationships_of(&table.id)
        .map(|r| format!("  {}.{} -> {}", r.source, r.label, r.target))
        .collect();
    if !relationships.is_empty() {
        if primary_key.is_empty() {
            out.push('\n');
        }
        push_line(&mut out, "Relationships:");
        for line in &relationships {
            push_line(&mut out, line);
        }
    }

    out
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
