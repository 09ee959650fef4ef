//! DOT graph format subset: `graph { A -- B [weight=W]; ... }` (§6).
//!
//! Only the undirected `graph { ... }` form with `--` edges is accepted;
//! `digraph` / `->` is rejected with [`InputError::UnexpectedlyDirected`].

use crate::errors::InputError;
use crate::graph::{Graph, GraphBuilder};

/// Parses the DOT subset described above.
///
/// # Errors
///
/// Returns [`InputError::UnexpectedlyDirected`] if the input is a
/// `digraph` or contains a `->` edge, or [`InputError::Malformed`] if an
/// edge statement doesn't match the expected grammar.
pub fn parse(content: &str) -> Result<Graph, InputError> {
    let trimmed = content.trim_start();
    if trimmed.starts_with("digraph") {
        return Err(InputError::UnexpectedlyDirected { format: "dot" });
    }
    if trimmed.contains("->") {
        return Err(InputError::UnexpectedlyDirected { format: "dot" });
    }

    let body_start = content.find('{').ok_or_else(|| InputError::Malformed {
        format: "dot",
        line: 1,
        message: "missing `{`".to_string(),
    })?;
    let body_end = content.rfind('}').ok_or_else(|| InputError::Malformed {
        format: "dot",
        line: 1,
        message: "missing `}`".to_string(),
    })?;
    let body = &content[body_start + 1..body_end];

    let mut builder = GraphBuilder::default();
    for (line_number, statement) in body.split(';').enumerate() {
        let statement = statement.trim();
        if statement.is_empty() {
            continue;
        }
        let Some(edge_pos) = statement.find("--") else {
            // A lone node declaration, e.g. `A;` or `A [color=red];` — still
            // registers the node so isolated nodes are not dropped.
            let name = statement.split('[').next().unwrap_or(statement).trim();
            if !name.is_empty() {
                builder.node(trim_ident(name));
            }
            continue;
        };
        let source = trim_ident(statement[..edge_pos].trim());
        let rest = statement[edge_pos + 2..].trim();
        let (target, attrs) = match rest.find('[') {
            Some(bracket) => (rest[..bracket].trim(), Some(&rest[bracket..])),
            None => (rest, None),
        };
        let target = trim_ident(target);
        let weight = attrs.and_then(parse_weight_attribute).unwrap_or(1.0);
        builder
            .add_edge(source, target, weight)
            .map_err(|_| InputError::Malformed {
                format: "dot",
                line: line_number + 1,
                message: "conflicting edge weight".to_string(),
            })?;
    }
    Ok(builder.build())
}

fn trim_ident(s: &str) -> &str {
    s.trim().trim_matches('"')
}

fn parse_weight_attribute(attrs: &str) -> Option<f64> {
    let inner = attrs.trim_start_matches('[').trim_end_matches(']');
    for kv in inner.split(',') {
        let mut parts = kv.splitn(2, '=');
        let key = parts.next()?.trim();
        let value = parts.next()?.trim();
        if key == "weight" {
            return value.trim_matches('"').parse::<f64>().ok();
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::parse;
    use crate::errors::InputError;

    #[test]
    fn parses_edges_with_weight_attribute() {
        let dot = "graph { A -- B [weight=3.5]; B -- C; }";
        let g = parse(dot).unwrap();
        assert_eq!(g.size(), 3);
        assert_eq!(g.adjacency(0, 1), 3.5);
        assert_eq!(g.adjacency(1, 2), 1.0);
    }

    #[test]
    fn rejects_digraph() {
        let dot = "digraph { A -> B; }";
        assert!(matches!(parse(dot), Err(InputError::UnexpectedlyDirected { .. })));
    }

    #[test]
    fn keeps_isolated_node_declarations() {
        let dot = "graph { A; B -- C; }";
        let g = parse(dot).unwrap();
        assert_eq!(g.size(), 3);
    }
}
