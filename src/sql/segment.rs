//! Statement segmentation: locate each `CREATE TABLE` block and cut out its
//! name and column/constraint list.

use super::lexer::{Token, TokenKind};
use tracing::{debug, trace};

/// One table-defining statement.
#[derive(Debug, Clone, PartialEq)]
pub struct TableBlock<'a> {
    pub name: String,
    /// Tokens strictly inside the outer parentheses.
    pub body: &'a [Token],
    /// Statement text from `CREATE` through the closing parenthesis.
    pub raw_sql: &'a str,
}

/// Split a token stream into table blocks, in source order.
///
/// A block runs from one `CREATE [TEMPORARY] TABLE` phrase to the next, or to
/// the end of input. Blocks without a name or a non-empty body are dropped.
pub fn segment<'a>(source: &'a str, tokens: &'a [Token]) -> Vec<TableBlock<'a>> {
    let starts: Vec<(usize, usize)> = (0..tokens.len())
        .filter_map(|i| create_table_phrase(&tokens[i..]).map(|len| (i, len)))
        .collect();

    starts
        .iter()
        .enumerate()
        .filter_map(|(n, &(start, phrase_len))| {
            let end = starts.get(n + 1).map_or(tokens.len(), |&(next, _)| next);
            let block = &tokens[start..end];
            let extracted = extract_block(source, block, phrase_len);
            if extracted.is_none() {
                debug!(
                    offset = block[0].span.start,
                    "dropping CREATE TABLE block without a usable name or body"
                );
            }
            extracted
        })
        .collect()
}

/// Length of the `CREATE [TEMPORARY] TABLE` phrase at the head of `tokens`.
fn create_table_phrase(tokens: &[Token]) -> Option<usize> {
    let first = tokens.first()?;
    if !first.is_keyword("CREATE") {
        return None;
    }
    match tokens.get(1) {
        Some(t) if t.is_keyword("TABLE") => Some(2),
        Some(t) if t.is_keyword("TEMPORARY") => {
            tokens.get(2).filter(|t| t.is_keyword("TABLE")).map(|_| 3)
        }
        _ => None,
    }
}

fn extract_block<'a>(
    source: &'a str,
    block: &'a [Token],
    phrase_len: usize,
) -> Option<TableBlock<'a>> {
    let mut pos = phrase_len;

    // Skip IF NOT EXISTS
    if keywords_at(block, pos, &["IF", "NOT", "EXISTS"]) {
        pos += 3;
    }

    let (name, after_name) = table_name(block, pos)?;

    let open = after_name + block[after_name..].iter().position(|t| t.kind == TokenKind::LParen)?;
    let close = match matching_paren(block, open) {
        Some(close) => close,
        None => {
            // Unbalanced list: fall back to the last closing paren in the block
            let last = block.iter().rposition(|t| t.kind == TokenKind::RParen)?;
            trace!(table = %name, "unbalanced column list, using last closing paren");
            if last <= open {
                return None;
            }
            last
        }
    };

    let body = &block[open + 1..close];
    if body.is_empty() {
        return None;
    }

    Some(TableBlock {
        name,
        body,
        raw_sql: &source[block[0].span.start..block[close].span.end],
    })
}

/// Read a possibly schema-qualified table name; the last part wins.
fn table_name(block: &[Token], pos: usize) -> Option<(String, usize)> {
    let mut name = block.get(pos)?.ident()?;
    let mut next = pos + 1;
    while let (Some(dot), Some(part)) = (block.get(next), block.get(next + 1)) {
        match (&dot.kind, part.ident()) {
            (TokenKind::Dot, Some(ident)) => {
                name = ident;
                next += 2;
            }
            _ => break,
        }
    }
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), next))
}

fn keywords_at(tokens: &[Token], pos: usize, keywords: &[&str]) -> bool {
    keywords
        .iter()
        .enumerate()
        .all(|(i, kw)| tokens.get(pos + i).is_some_and(|t| t.is_keyword(kw)))
}

/// Index of the `)` closing the `(` at `open`, accounting for nesting.
pub(crate) fn matching_paren(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
