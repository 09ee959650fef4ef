//! TSV graph format: `source\ttarget\tweight?`, `#` comments (§6).

use crate::errors::InputError;
use crate::graph::{Graph, GraphBuilder};

/// Parses a TSV edge list: one edge per line, `source<TAB>target<TAB>weight`
/// with an optional weight (defaulting to `1.0`), `#`-prefixed comment
/// lines, and blank lines ignored.
///
/// # Errors
///
/// Returns [`InputError::Malformed`] if a non-blank, non-comment line has
/// the wrong number of fields or an unparseable weight.
pub fn parse(content: &str) -> Result<Graph, InputError> {
    let mut builder = GraphBuilder::default();
    for (line_number, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split('\t');
        let source = fields.next().ok_or_else(|| malformed(line_number, "missing source"))?;
        let target = fields
            .next()
            .ok_or_else(|| malformed(line_number, "missing target"))?;
        let weight = match fields.next() {
            Some(w) => w
                .trim()
                .parse::<f64>()
                .map_err(|_| malformed(line_number, "weight is not a number"))?,
            None => 1.0,
        };
        builder.add_edge(source.trim(), target.trim(), weight)?;
    }
    Ok(builder.build())
}

fn malformed(line_number: usize, message: &str) -> InputError {
    InputError::Malformed { format: "tsv", line: line_number + 1, message: message.to_string() }
}
