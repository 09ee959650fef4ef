//! Submodule for fuzzing the graph file format parsers on arbitrary text.
use honggfuzz::fuzz;
use spectral_modularity::graph::formats::{dot, gml, pajek, tsv};

fn main() {
    loop {
        fuzz!(|content: String| {
            let _ = tsv::parse(&content);
            let _ = gml::parse(&content);
            let _ = dot::parse(&content);
            let _ = pajek::parse(&content);
        });
    }
}
