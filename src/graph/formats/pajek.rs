//! Pajek/NET graph format subset: `*Vertices N` then `*Edges`/`*Arcs`
//! sections of `S D W` triples, 1-indexed in the file (§6).

use crate::errors::InputError;
use crate::graph::{Graph, GraphBuilder};

#[derive(PartialEq, Eq, Clone, Copy)]
enum Section {
    Preamble,
    Vertices,
    Edges,
}

/// Parses the Pajek/NET subset described above.
///
/// # Errors
///
/// Returns [`InputError::Malformed`] if a `*Vertices`/`*Edges`/`*Arcs`
/// section header or one of its data lines doesn't match the expected
/// grammar.
pub fn parse(content: &str) -> Result<Graph, InputError> {
    let mut builder = GraphBuilder::default();
    let mut names_by_file_id: std::collections::HashMap<usize, String> = std::collections::HashMap::new();
    let mut section = Section::Preamble;

    for (line_number, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let lower = line.to_ascii_lowercase();
        if lower.starts_with("*vertices") {
            section = Section::Vertices;
            continue;
        }
        if lower.starts_with("*edges") || lower.starts_with("*arcs") {
            section = Section::Edges;
            continue;
        }
        if line.starts_with('*') {
            // Any other section header (`*arcslist`, `*matrix`, ...) is not
            // part of this subset; stop interpreting lines as data until
            // the next recognized header.
            section = Section::Preamble;
            continue;
        }

        match section {
            Section::Preamble => {}
            Section::Vertices => {
                let mut parts = line.splitn(2, char::is_whitespace);
                let id_str = parts.next().ok_or_else(|| malformed(line_number, "missing vertex id"))?;
                let id: usize = id_str
                    .parse()
                    .map_err(|_| malformed(line_number, "vertex id is not an integer"))?;
                let rest = parts.next().unwrap_or("").trim();
                let label = if rest.is_empty() {
                    id.to_string()
                } else {
                    rest.trim_matches('"').to_string()
                };
                builder.node(&label);
                names_by_file_id.insert(id, label);
            }
            Section::Edges => {
                let mut fields = line.split_whitespace();
                let s: usize = fields
                    .next()
                    .ok_or_else(|| malformed(line_number, "missing source"))?
                    .parse()
                    .map_err(|_| malformed(line_number, "source is not an integer"))?;
                let d: usize = fields
                    .next()
                    .ok_or_else(|| malformed(line_number, "missing destination"))?
                    .parse()
                    .map_err(|_| malformed(line_number, "destination is not an integer"))?;
                let weight = match fields.next() {
                    Some(w) => w
                        .parse::<f64>()
                        .map_err(|_| malformed(line_number, "weight is not a number"))?,
                    None => 1.0,
                };
                let source = names_by_file_id
                    .get(&s)
                    .ok_or_else(|| InputError::UndeclaredNode(s.to_string()))?;
                let destination = names_by_file_id
                    .get(&d)
                    .ok_or_else(|| InputError::UndeclaredNode(d.to_string()))?;
                builder.add_edge(source, destination, weight)?;
            }
        }
    }
    Ok(builder.build())
}

fn malformed(line_number: usize, message: &str) -> InputError {
    InputError::Malformed { format: "net", line: line_number + 1, message: message.to_string() }
}
