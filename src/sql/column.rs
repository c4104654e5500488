//! Column and table-constraint line parsing for one table body.

use super::lexer::{Token, TokenKind};
use super::segment::matching_paren;
use crate::model::Column;
use tracing::trace;

/// Keywords that open a table-level constraint or index line.
const CONSTRAINT_KEYWORDS: &[&str] = &[
    "KEY", "INDEX", "UNIQUE", "FULLTEXT", "SPATIAL", "CONSTRAINT", "FOREIGN", "CHECK",
];

/// Shape of one comma-separated line in a table body.
#[derive(Debug, Clone, PartialEq)]
pub enum LineShape {
    /// `PRIMARY KEY (a, b)` or `CONSTRAINT name PRIMARY KEY (...)`
    PrimaryKey(Vec<String>),
    /// Index, unique, foreign-key or check constraint; not interpreted.
    Constraint,
    Column(Column),
    Unrecognized,
}

/// Parse a table body into columns in declaration order.
///
/// Primary-key constraint lines mark columns declared before them; names that
/// do not match an existing column are ignored.
pub fn parse_body(source: &str, body: &[Token]) -> Vec<Column> {
    let mut columns: Vec<Column> = Vec::new();

    for line in split_lines(body) {
        match classify(source, line) {
            LineShape::PrimaryKey(names) => {
                for name in names {
                    match columns.iter_mut().find(|c| c.name == name) {
                        Some(col) => col.is_primary_key = true,
                        None => trace!(column = %name, "primary key names unknown column"),
                    }
                }
            }
            LineShape::Constraint => trace!("skipping constraint line"),
            LineShape::Column(col) => match columns.iter_mut().find(|c| c.name == col.name) {
                // Redeclaration replaces the earlier definition in place
                Some(existing) => *existing = col,
                None => columns.push(col),
            },
            LineShape::Unrecognized => trace!("skipping unrecognized line"),
        }
    }

    columns
}

/// Split on commas at parenthesis depth zero.
pub fn split_lines(body: &[Token]) -> Vec<&[Token]> {
    let mut lines = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, token) in body.iter().enumerate() {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => depth = depth.saturating_sub(1),
            TokenKind::Comma if depth == 0 => {
                lines.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    lines.push(&body[start..]);

    lines.retain(|line| !line.is_empty());
    lines
}

pub fn classify(source: &str, line: &[Token]) -> LineShape {
    let Some(first) = line.first() else {
        return LineShape::Unrecognized;
    };

    if first.is_keyword("PRIMARY") {
        return primary_key_line(line, 0);
    }
    if first.is_keyword("CONSTRAINT") {
        // CONSTRAINT [name] PRIMARY KEY (...)
        if let Some(pk) = (1..=2).find(|&i| line.get(i).is_some_and(|t| t.is_keyword("PRIMARY")))
        {
            return primary_key_line(line, pk);
        }
        return LineShape::Constraint;
    }
    if CONSTRAINT_KEYWORDS.iter().any(|kw| first.is_keyword(kw)) {
        return LineShape::Constraint;
    }

    column_line(source, line).map_or(LineShape::Unrecognized, LineShape::Column)
}

fn primary_key_line(line: &[Token], primary: usize) -> LineShape {
    if !line.get(primary + 1).is_some_and(|t| t.is_keyword("KEY")) {
        return LineShape::Unrecognized;
    }
    let Some(open) = line
        .iter()
        .skip(primary + 2)
        .position(|t| t.kind == TokenKind::LParen)
        .map(|i| i + primary + 2)
    else {
        return LineShape::Unrecognized;
    };
    let close = matching_paren(line, open).unwrap_or(line.len());

    // Only depth-one identifiers are column names; `name(10)` prefix lengths are not
    let mut names = Vec::new();
    let mut depth = 0usize;
    for token in &line[open + 1..close] {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => depth = depth.saturating_sub(1),
            _ if depth == 0 => {
                if let Some(ident) = token.ident() {
                    if !token.is_keyword("ASC") && !token.is_keyword("DESC") {
                        names.push(ident.to_string());
                    }
                }
            }
            _ => {}
        }
    }

    LineShape::PrimaryKey(names)
}

fn column_line(source: &str, line: &[Token]) -> Option<Column> {
    let name = line.first()?.ident()?;
    let type_word = line.get(1)?;
    let TokenKind::Word(_) = type_word.kind else {
        return None;
    };

    // Type word plus an immediately following argument list, kept verbatim
    let mut type_end = type_word.span.end;
    let mut rest = 2;
    if line.get(2).is_some_and(|t| t.kind == TokenKind::LParen) {
        if let Some(close) = matching_paren(line, 2) {
            type_end = line[close].span.end;
            rest = close + 1;
        }
    }
    let typ = source[type_word.span.start..type_end].to_string();

    let markers = scan_markers(&line[rest..]);

    Some(Column {
        name: name.to_string(),
        typ,
        is_primary_key: markers.primary_key,
        is_foreign_key: false,
        comment: markers.comment,
        nullable: !markers.not_null,
    })
}

#[derive(Debug, Default)]
struct Markers {
    primary_key: bool,
    not_null: bool,
    comment: Option<String>,
}

fn scan_markers(tokens: &[Token]) -> Markers {
    let mut markers = Markers::default();
    let mut i = 0;

    while i < tokens.len() {
        let next_is = |kw: &str| tokens.get(i + 1).is_some_and(|t| t.is_keyword(kw));
        let token = &tokens[i];

        if token.is_keyword("PRIMARY") && next_is("KEY") {
            markers.primary_key = true;
            i += 2;
            continue;
        }
        if token.is_keyword("NOT") && next_is("NULL") {
            markers.not_null = true;
            i += 2;
            continue;
        }
        if token.is_keyword("COMMENT") && markers.comment.is_none() {
            let mut j = i + 1;
            if tokens.get(j).is_some_and(|t| t.kind == TokenKind::Symbol('=')) {
                j += 1;
            }
            if let Some(TokenKind::Str(text)) = tokens.get(j).map(|t| &t.kind) {
                markers.comment = Some(text.clone());
                i = j + 1;
                continue;
            }
        }
        i += 1;
    }

    markers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::lexer::Lexer;

    fn parse(body: &str) -> Vec<Column> {
        let tokens = Lexer::new(body).tokenize();
        parse_body(body, &tokens)
    }

    fn shape(line: &str) -> LineShape {
        let tokens = Lexer::new(line).tokenize();
        classify(line, &tokens)
    }

    #[test]
    fn test_column_definition() {
        let cols = parse("`email` varchar(255) NOT NULL COMMENT 'Login address'");
        assert_eq!(cols.len(), 1);
        assert_eq!(cols[0].name, "email");
        assert_eq!(cols[0].typ, "varchar(255)");
        assert!(!cols[0].nullable);
        assert!(!cols[0].is_primary_key);
        assert!(!cols[0].is_foreign_key);
        assert_eq!(cols[0].comment.as_deref(), Some("Login address"));
    }

    #[test]
    fn test_nullable_by_default() {
        let cols = parse("name varchar(255) DEFAULT NULL");
        assert!(cols[0].nullable);
        assert_eq!(cols[0].comment, None);
    }

    #[test]
    fn test_type_arguments_do_not_split() {
        let cols = parse("price decimal(10,2) NOT NULL, qty int");
        assert_eq!(cols.len(), 2);
        assert_eq!(cols[0].typ, "decimal(10,2)");
        assert_eq!(cols[1].name, "qty");
    }

    #[test]
    fn test_enum_type_kept_verbatim() {
        let cols = parse("status enum('a','b, c') DEFAULT 'a'");
        assert_eq!(cols.len(), 1);
        assert_eq!(cols[0].typ, "enum('a','b, c')");
    }

    #[test]
    fn test_inline_primary_key() {
        let cols = parse("id INT AUTO_INCREMENT PRIMARY KEY, name TEXT");
        assert!(cols[0].is_primary_key);
        assert!(!cols[1].is_primary_key);
    }

    #[test]
    fn test_primary_key_constraint_line() {
        let cols = parse("`id` bigint NOT NULL, `name` text, PRIMARY KEY (`id`) USING BTREE");
        assert!(cols[0].is_primary_key);
        assert!(!cols[1].is_primary_key);
    }

    #[test]
    fn test_composite_primary_key() {
        let cols = parse("a int, b int, c int, CONSTRAINT pk_ab PRIMARY KEY (a, b)");
        let flags: Vec<bool> = cols.iter().map(|c| c.is_primary_key).collect();
        assert_eq!(flags, vec![true, true, false]);
    }

    #[test]
    fn test_primary_key_on_unknown_column_is_noop() {
        let cols = parse("id int, PRIMARY KEY (missing)");
        assert_eq!(cols.len(), 1);
        assert!(!cols[0].is_primary_key);
    }

    #[test]
    fn test_primary_key_before_column_is_noop() {
        let cols = parse("PRIMARY KEY (id), id int");
        assert!(!cols[0].is_primary_key);
    }

    #[test]
    fn test_constraint_lines_skipped() {
        let body = "id int, user_id int, KEY idx_user (user_id), UNIQUE KEY uq (id), \
                    CONSTRAINT fk_user FOREIGN KEY (user_id) REFERENCES users (id), \
                    FOREIGN KEY (id) REFERENCES x(id), INDEX (id), FULLTEXT KEY ft (id), CHECK (id > 0)";
        let names: Vec<String> = parse(body).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["id", "user_id"]);
    }

    #[test]
    fn test_markers_inside_comment_are_ignored() {
        let cols = parse("note text COMMENT 'NOT NULL PRIMARY KEY'");
        assert!(cols[0].nullable);
        assert!(!cols[0].is_primary_key);
        assert_eq!(cols[0].comment.as_deref(), Some("NOT NULL PRIMARY KEY"));
    }

    #[test]
    fn test_redeclared_column_replaces_in_place() {
        let cols = parse("a int NOT NULL, b int, a bigint");
        assert_eq!(cols.len(), 2);
        assert_eq!(cols[0].name, "a");
        assert_eq!(cols[0].typ, "bigint");
        assert!(cols[0].nullable);
    }

    #[test]
    fn test_line_shapes() {
        assert_eq!(shape("PRIMARY KEY (`id`)"), LineShape::PrimaryKey(vec!["id".to_string()]));
        assert_eq!(shape("UNIQUE KEY `email` (`email`)"), LineShape::Constraint);
        assert_eq!(shape("'just a string'"), LineShape::Unrecognized);
        assert_eq!(shape("lonely"), LineShape::Unrecognized);
        assert!(matches!(shape("`key` int"), LineShape::Column(_)));
    }

    #[test]
    fn test_primary_key_prefix_length() {
        assert_eq!(
            shape("PRIMARY KEY (`slug`(20), `id` DESC)"),
            LineShape::PrimaryKey(vec!["slug".to_string(), "id".to_string()])
        );
    }
}
