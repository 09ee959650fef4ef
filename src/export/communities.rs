//! `B_communities.dat` and `B_community.dat` writers (§6).

use crate::community::CommunityTree;
use crate::export::compare_node_names;
use crate::graph::Graph;

/// Renders the indivisible-communities file: one line per leaf, `name`
/// followed by a tab-separated list of its member node names, or
/// `EMPTIED` if gMVM drained the leaf (§6 `B_communities.dat`).
#[must_use]
pub fn render_communities(tree: &CommunityTree, graph: &Graph) -> String {
    let mut leaves = tree.leaves();
    leaves.sort_by(|&a, &b| tree.get(a).name.cmp(&tree.get(b).name));

    let mut out = String::new();
    for leaf in leaves {
        let community = tree.get(leaf);
        out.push_str(&community.name);
        if community.emptied {
            out.push_str("\tEMPTIED");
        } else {
            for &member in &community.membership {
                out.push('\t');
                out.push_str(graph.name(member));
            }
        }
        out.push('\n');
    }
    out
}

/// Renders the per-node community-index file: `nodeName\tcommunityIndex`
/// lines, sorted by node name with [`compare_node_names`] (§6
/// `B_community.dat`). `communityIndex` is the leaf's position in
/// ascending-name order, matching [`render_communities`]'s row order.
#[must_use]
pub fn render_node_community_index(tree: &CommunityTree, graph: &Graph) -> String {
    let mut leaves = tree.leaves();
    leaves.sort_by(|&a, &b| tree.get(a).name.cmp(&tree.get(b).name));

    let mut rows: Vec<(String, usize)> = Vec::new();
    for (index, &leaf) in leaves.iter().enumerate() {
        for &member in &tree.get(leaf).membership {
            rows.push((graph.name(member).to_string(), index));
        }
    }
    rows.sort_by(|(a, _), (b, _)| compare_node_names(a, b));

    let mut out = String::new();
    for (name, index) in rows {
        out.push_str(&name);
        out.push('\t');
        out.push_str(&index.to_string());
        out.push('\n');
    }
    out
}
