//! GML graph format subset: `graph [ node [ id N label "..." ] edge [
//! source S target T weight W ] ]` (§6).
//!
//! This is a conservative tokenizer over the bracketed key/value grammar,
//! not a full GML implementation: unsupported keys and nested constructs
//! (sub-graphs, non-`node`/`edge` blocks) are skipped rather than
//! rejected, matching the permissive behavior of typical GML consumers.

use crate::errors::InputError;
use crate::graph::{Graph, GraphBuilder};

#[derive(Debug, PartialEq)]
enum Token<'a> {
    Ident(&'a str),
    Number(f64),
    Str(&'a str),
    Open,
    Close,
}

fn tokenize(content: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let bytes = content.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i] as char;
        if c.is_whitespace() {
            i += 1;
        } else if c == '[' {
            tokens.push(Token::Open);
            i += 1;
        } else if c == ']' {
            tokens.push(Token::Close);
            i += 1;
        } else if c == '"' {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len() && bytes[end] as char != '"' {
                end += 1;
            }
            tokens.push(Token::Str(&content[start..end]));
            i = end + 1;
        } else {
            let start = i;
            while i < bytes.len() && !(bytes[i] as char).is_whitespace() && bytes[i] != b'[' && bytes[i] != b']'
            {
                i += 1;
            }
            let word = &content[start..i];
            if let Ok(n) = word.parse::<f64>() {
                tokens.push(Token::Number(n));
            } else {
                tokens.push(Token::Ident(word));
            }
        }
    }
    tokens
}

#[derive(Default)]
struct GmlNode {
    id: Option<i64>,
    label: Option<String>,
}

#[derive(Default)]
struct GmlEdge {
    source: Option<i64>,
    target: Option<i64>,
    weight: f64,
}

/// Parses the GML subset described above.
///
/// # Errors
///
/// Returns [`InputError::Malformed`] if the token stream doesn't match
/// the expected `graph [ node [...] edge [...] ]` grammar, or
/// [`InputError::UndeclaredNode`] if an edge references a node id with
/// no matching `node [ id ... ]` block.
pub fn parse(content: &str) -> Result<Graph, InputError> {
    let tokens = tokenize(content);
    let mut pos = 0;
    let mut nodes: Vec<GmlNode> = Vec::new();
    let mut edges: Vec<GmlEdge> = Vec::new();

    // Skip to the top-level `graph [ ... ]` block.
    while pos < tokens.len() && tokens[pos] != Token::Ident("graph") {
        pos += 1;
    }
    if pos >= tokens.len() {
        return Err(InputError::Malformed {
            format: "gml",
            line: 1,
            message: "no top-level `graph` block found".to_string(),
        });
    }
    pos += 1;
    expect_open(&tokens, &mut pos)?;

    let mut depth = 1usize;
    while pos < tokens.len() && depth > 0 {
        match &tokens[pos] {
            Token::Ident("node") => {
                pos += 1;
                expect_open(&tokens, &mut pos)?;
                nodes.push(parse_node(&tokens, &mut pos)?);
            }
            Token::Ident("edge") => {
                pos += 1;
                expect_open(&tokens, &mut pos)?;
                edges.push(parse_edge(&tokens, &mut pos)?);
            }
            Token::Open => {
                depth += 1;
                pos += 1;
            }
            Token::Close => {
                depth -= 1;
                pos += 1;
            }
            _ => pos += 1,
        }
    }

    let mut builder = GraphBuilder::default();
    let mut name_of_id = std::collections::HashMap::new();
    for node in &nodes {
        let id = node.id.ok_or_else(|| InputError::Malformed {
            format: "gml",
            line: 1,
            message: "node without an id".to_string(),
        })?;
        let name = node.label.clone().unwrap_or_else(|| id.to_string());
        builder.node(&name);
        name_of_id.insert(id, name);
    }
    for edge in &edges {
        let source_id = edge.source.ok_or_else(|| InputError::Malformed {
            format: "gml",
            line: 1,
            message: "edge without a source".to_string(),
        })?;
        let target_id = edge.target.ok_or_else(|| InputError::Malformed {
            format: "gml",
            line: 1,
            message: "edge without a target".to_string(),
        })?;
        let source = name_of_id
            .get(&source_id)
            .ok_or_else(|| InputError::UndeclaredNode(source_id.to_string()))?;
        let target = name_of_id
            .get(&target_id)
            .ok_or_else(|| InputError::UndeclaredNode(target_id.to_string()))?;
        builder.add_edge(source, target, edge.weight)?;
    }
    Ok(builder.build())
}

fn expect_open(tokens: &[Token<'_>], pos: &mut usize) -> Result<(), InputError> {
    match tokens.get(*pos) {
        Some(Token::Open) => {
            *pos += 1;
            Ok(())
        }
        _ => Err(InputError::Malformed {
            format: "gml",
            line: 1,
            message: "expected `[`".to_string(),
        }),
    }
}

fn parse_node(tokens: &[Token<'_>], pos: &mut usize) -> Result<GmlNode, InputError> {
    let mut node = GmlNode::default();
    let mut depth = 1usize;
    while *pos < tokens.len() && depth > 0 {
        match &tokens[*pos] {
            Token::Ident("id") => {
                *pos += 1;
                if let Some(Token::Number(n)) = tokens.get(*pos) {
                    node.id = Some(*n as i64);
                    *pos += 1;
                }
            }
            Token::Ident("label") => {
                *pos += 1;
                if let Some(Token::Str(s)) = tokens.get(*pos) {
                    node.label = Some((*s).to_string());
                    *pos += 1;
                }
            }
            Token::Open => {
                depth += 1;
                *pos += 1;
            }
            Token::Close => {
                depth -= 1;
                *pos += 1;
            }
            _ => *pos += 1,
        }
    }
    Ok(node)
}

fn parse_edge(tokens: &[Token<'_>], pos: &mut usize) -> Result<GmlEdge, InputError> {
    let mut edge = GmlEdge { weight: 1.0, ..GmlEdge::default() };
    let mut depth = 1usize;
    while *pos < tokens.len() && depth > 0 {
        match &tokens[*pos] {
            Token::Ident("source") => {
                *pos += 1;
                if let Some(Token::Number(n)) = tokens.get(*pos) {
                    edge.source = Some(*n as i64);
                    *pos += 1;
                }
            }
            Token::Ident("target") => {
                *pos += 1;
                if let Some(Token::Number(n)) = tokens.get(*pos) {
                    edge.target = Some(*n as i64);
                    *pos += 1;
                }
            }
            Token::Ident("weight") => {
                *pos += 1;
                if let Some(Token::Number(n)) = tokens.get(*pos) {
                    edge.weight = *n;
                    *pos += 1;
                }
            }
            Token::Open => {
                depth += 1;
                *pos += 1;
            }
            Token::Close => {
                depth -= 1;
                *pos += 1;
            }
            _ => *pos += 1,
        }
    }
    Ok(edge)
}

#[cfg(test)]
mod tests {
    use super::parse;

    #[test]
    fn parses_a_minimal_graph() {
        let gml = r#"
            graph [
              node [ id 0 label "a" ]
              node [ id 1 label "b" ]
              edge [ source 0 target 1 weight 2.0 ]
            ]
        "#;
        let g = parse(gml).unwrap();
        assert_eq!(g.size(), 2);
        assert_eq!(g.adjacency(0, 1), 2.0);
    }

    #[test]
    fn defaults_weight_to_one() {
        let gml = r#"
            graph [
              node [ id 0 label "a" ]
              node [ id 1 label "b" ]
              edge [ source 0 target 1 ]
            ]
        "#;
        let g = parse(gml).unwrap();
        assert_eq!(g.adjacency(0, 1), 1.0);
    }
}
