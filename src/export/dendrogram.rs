//! `B_dendrogram.dat` writer (§6).

use crate::community::CommunityTree;

/// Renders the dendrogram file: one row per internal (split) community,
/// `childIdA\tchildIdB\theight`, where `height = tree_depth - node_depth -
/// 1` (§6 `B_dendrogram.dat`). Rows are emitted in ascending parent-name
/// order for determinism.
#[must_use]
pub fn render_dendrogram(tree: &CommunityTree) -> String {
    let tree_depth = tree_max_depth(tree);

    let mut internal: Vec<_> = (0..tree.len()).filter(|&id| !tree.get(id).is_leaf()).collect();
    internal.sort_by(|&a, &b| tree.get(a).name.cmp(&tree.get(b).name));

    let mut out = String::new();
    for id in internal {
        let community = tree.get(id);
        let (child_a, child_b) = community.children.expect("filtered to internal communities");
        let height = tree_depth - community.depth - 1;
        out.push_str(&tree.get(child_a).name);
        out.push('\t');
        out.push_str(&tree.get(child_b).name);
        out.push('\t');
        out.push_str(&height.to_string());
        out.push('\n');
    }
    out
}

fn tree_max_depth(tree: &CommunityTree) -> usize {
    (0..tree.len()).map(|id| tree.get(id).depth).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::render_dendrogram;
    use crate::community::CommunityTree;

    #[test]
    fn a_single_split_produces_one_row_with_height_zero() {
        let mut tree = CommunityTree::new(vec![0, 1, 2, 3]);
        tree.split(tree.root_id(), vec![0, 1], vec![2, 3], 0.2).unwrap();
        let rendered = render_dendrogram(&tree);
        assert_eq!(rendered, "A\tB\t0\n");
    }

    #[test]
    fn a_leaf_only_tree_produces_no_rows() {
        let tree = CommunityTree::new(vec![0, 1]);
        assert_eq!(render_dendrogram(&tree), "");
    }
}
