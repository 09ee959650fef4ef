//! Parser round-trip property: the same logical graph expressed in each
//! supported format produces graphs with identical degree sequences and
//! total edge weight (§8 property 7).

use spectral_modularity::graph::formats::{dot, gml, pajek, tsv};

const TSV: &str = "a\tb\t1\nb\tc\t2\na\tc\t1\nc\td\t1\n";

const GML: &str = r#"
graph [
  node [ id 0 label "a" ]
  node [ id 1 label "b" ]
  node [ id 2 label "c" ]
  node [ id 3 label "d" ]
  edge [ source 0 target 1 weight 1 ]
  edge [ source 1 target 2 weight 2 ]
  edge [ source 0 target 2 weight 1 ]
  edge [ source 2 target 3 weight 1 ]
]
"#;

const DOT: &str = "graph {\n  a -- b [weight=1];\n  b -- c [weight=2];\n  a -- c [weight=1];\n  c -- d [weight=1];\n}\n";

const NET: &str = "*Vertices 4\n1 \"a\"\n2 \"b\"\n3 \"c\"\n4 \"d\"\n*Edges\n1 2 1\n2 3 2\n1 3 1\n3 4 1\n";

fn degree_sequence(graph: &spectral_modularity::graph::Graph) -> Vec<f64> {
    let mut names: Vec<&str> = (0..graph.size()).map(|i| graph.name(i)).collect();
    names.sort_unstable();
    names.iter().map(|&name| graph.degree(graph.index_of(name).unwrap())).collect()
}

#[test]
fn all_four_formats_agree_on_degree_sequence_and_total_weight() {
    let from_tsv = tsv::parse(TSV).unwrap();
    let from_gml = gml::parse(GML).unwrap();
    let from_dot = dot::parse(DOT).unwrap();
    let from_net = pajek::parse(NET).unwrap();

    let expected_degrees = degree_sequence(&from_tsv);
    assert_eq!(degree_sequence(&from_gml), expected_degrees);
    assert_eq!(degree_sequence(&from_dot), expected_degrees);
    assert_eq!(degree_sequence(&from_net), expected_degrees);

    let expected_weight = from_tsv.total_weight();
    assert_eq!(from_gml.total_weight(), expected_weight);
    assert_eq!(from_dot.total_weight(), expected_weight);
    assert_eq!(from_net.total_weight(), expected_weight);
}
