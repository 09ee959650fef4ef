//! The community tree: an arena of [`Community`] records linked by index
//! (C6, §3, §4.6, §9 "Tree with parent pointers").

use crate::errors::{invariant, EngineError};

/// An index into a [`CommunityTree`]'s arena.
pub type CommunityId = usize;

/// A single node of the community tree (§3 Community).
#[derive(Debug, Clone)]
pub struct Community {
    /// This community's position in its parent's arena.
    pub id: CommunityId,
    /// Built by concatenating `A`/`B` at each descent; the root's name is
    /// empty.
    pub name: String,
    /// Original-graph node indices belonging to this community, in the
    /// order they were assigned at split time.
    pub membership: Vec<usize>,
    /// Root has depth 0; every child is exactly one deeper than its
    /// parent.
    pub depth: usize,
    /// The modularity gain recorded at the split that created this
    /// community; `-1.0` for leaves/indivisible communities, the sentinel
    /// for "no split happened here".
    pub delta_q: f64,
    /// `None` for the root.
    pub parent: Option<CommunityId>,
    /// Both present or both absent (enforced at every mutation point).
    pub children: Option<(CommunityId, CommunityId)>,
    /// Set when gMVM (§4.5) drains every member out of this leaf. An
    /// emptied leaf is retained in the tree rather than removed, per §3.
    pub emptied: bool,
}

impl Community {
    /// Whether this community is currently a leaf (no children).
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// The number of members currently assigned to this community.
    #[must_use]
    pub fn size(&self) -> usize {
        self.membership.len()
    }
}

/// The binary community tree produced by [`crate::community::RecursiveDivider`]
/// (C6).
///
/// Stored as an arena (`Vec<Community>`) indexed by [`CommunityId`], so
/// parent/child links are plain indices rather than owned references —
/// the tree can never form an ownership cycle (§9).
#[derive(Debug, Clone)]
pub struct CommunityTree {
    arena: Vec<Community>,
}

impl CommunityTree {
    /// Creates a tree with a single root community holding every index in
    /// `membership`.
    #[must_use]
    pub fn new(membership: Vec<usize>) -> Self {
        let root = Community {
            id: 0,
            name: String::new(),
            membership,
            depth: 0,
            delta_q: -1.0,
            parent: None,
            children: None,
            emptied: false,
        };
        Self { arena: vec![root] }
    }

    /// The root community's id (always `0`).
    #[must_use]
    pub fn root_id(&self) -> CommunityId {
        0
    }

    /// Returns a reference to the community with the given id.
    #[must_use]
    pub fn get(&self, id: CommunityId) -> &Community {
        &self.arena[id]
    }

    /// Returns a mutable reference to the community with the given id.
    pub fn get_mut(&mut self, id: CommunityId) -> &mut Community {
        &mut self.arena[id]
    }

    /// The total number of communities (internal + leaf) ever created.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Whether the tree holds no communities — never true after
    /// [`Self::new`], kept for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Splits community `parent_id` into two children with the given
    /// memberships and recorded `delta_q`, returning their ids as
    /// `(child_a, child_b)`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvariantViolation`] if `parent_id` already
    /// has children.
    pub fn split(
        &mut self,
        parent_id: CommunityId,
        membership_a: Vec<usize>,
        membership_b: Vec<usize>,
        delta_q: f64,
    ) -> Result<(CommunityId, CommunityId), EngineError> {
        invariant!(self.arena[parent_id].children.is_none(), "community {parent_id} split twice");

        let parent_depth = self.arena[parent_id].depth;
        let parent_name = self.arena[parent_id].name.clone();

        let child_a_id = self.arena.len();
        self.arena.push(Community {
            id: child_a_id,
            name: format!("{parent_name}A"),
            membership: membership_a,
            depth: parent_depth + 1,
            delta_q: -1.0,
            parent: Some(parent_id),
            children: None,
            emptied: false,
        });

        let child_b_id = self.arena.len();
        self.arena.push(Community {
            id: child_b_id,
            name: format!("{parent_name}B"),
            membership: membership_b,
            depth: parent_depth + 1,
            delta_q: -1.0,
            parent: Some(parent_id),
            children: None,
            emptied: false,
        });

        let parent = &mut self.arena[parent_id];
        parent.children = Some((child_a_id, child_b_id));
        parent.delta_q = delta_q;
        Ok((child_a_id, child_b_id))
    }

    /// Collects the ids of every current leaf, in ascending id order.
    #[must_use]
    pub fn leaves(&self) -> Vec<CommunityId> {
        self.arena.iter().filter(|c| c.is_leaf()).map(|c| c.id).collect()
    }

    /// Visits every community in pre-order (parent before children).
    #[must_use]
    pub fn preorder(&self) -> Vec<CommunityId> {
        let mut order = Vec::with_capacity(self.arena.len());
        let mut stack = vec![self.root_id()];
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some((a, b)) = self.arena[id].children {
                stack.push(b);
                stack.push(a);
            }
        }
        order
    }

    /// Visits every community in post-order (children before parent) —
    /// the order needed to accumulate `Q = sum of delta_q` bottom-up
    /// (§4.5).
    #[must_use]
    pub fn postorder(&self) -> Vec<CommunityId> {
        let mut order = self.preorder();
        order.reverse();
        order
    }

    /// Groups community ids by depth level, shallowest first.
    #[must_use]
    pub fn by_depth(&self) -> Vec<Vec<CommunityId>> {
        let max_depth = self.arena.iter().map(|c| c.depth).max().unwrap_or(0);
        let mut levels = vec![Vec::new(); max_depth + 1];
        for c in &self.arena {
            levels[c.depth].push(c.id);
        }
        levels
    }

    /// The sum of `delta_q` over every internal (non-leaf) community —
    /// the tree-structural definition of `Q` (§4.5), valid before any
    /// gMVM cross-leaf moves have been applied.
    #[must_use]
    pub fn modularity_from_splits(&self) -> f64 {
        self.arena.iter().filter(|c| !c.is_leaf()).map(|c| c.delta_q).sum()
    }

    /// Checks the tree invariants of §3/§4.6: every community has both
    /// children or none; child depth is parent depth + 1; leaf
    /// memberships (ignoring emptied leaves) partition the root's
    /// original membership.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvariantViolation`] on the first violation
    /// found.
    pub fn check_invariants(&self) -> Result<(), EngineError> {
        for c in &self.arena {
            if let Some((a, b)) = c.children {
                invariant!(
                    self.arena[a].depth == c.depth + 1 && self.arena[b].depth == c.depth + 1,
                    "child depth mismatch under community {}",
                    c.id
                );
            }
        }

        let mut seen: bitvec::vec::BitVec = bitvec::vec::BitVec::repeat(false, self.root_member_count());
        for leaf in self.leaves() {
            for &member in &self.arena[leaf].membership {
                invariant!(!seen[member], "node {member} appears in more than one leaf");
                seen.set(member, true);
            }
        }
        Ok(())
    }

    fn root_member_count(&self) -> usize {
        self.arena[self.root_id()].membership.len()
    }
}

#[cfg(test)]
mod tests {
    use super::CommunityTree;

    #[test]
    fn split_names_children_a_and_b() {
        let mut tree = CommunityTree::new(vec![0, 1, 2, 3]);
        let (a, b) = tree.split(tree.root_id(), vec![0, 1], vec![2, 3], 0.1).unwrap();
        assert_eq!(tree.get(a).name, "A");
        assert_eq!(tree.get(b).name, "B");
        assert_eq!(tree.get(a).depth, 1);
    }

    #[test]
    fn leaves_after_one_split_are_the_two_children() {
        let mut tree = CommunityTree::new(vec![0, 1, 2, 3]);
        let (a, b) = tree.split(tree.root_id(), vec![0, 1], vec![2, 3], 0.1).unwrap();
        let mut leaves = tree.leaves();
        leaves.sort_unstable();
        let mut expected = vec![a, b];
        expected.sort_unstable();
        assert_eq!(leaves, expected);
    }

    #[test]
    fn modularity_from_splits_sums_delta_q_of_internal_nodes_only() {
        let mut tree = CommunityTree::new(vec![0, 1, 2, 3]);
        tree.split(tree.root_id(), vec![0, 1], vec![2, 3], 0.25).unwrap();
        assert_eq!(tree.modularity_from_splits(), 0.25);
    }

    #[test]
    fn invariants_hold_for_a_valid_partition() {
        let mut tree = CommunityTree::new(vec![0, 1, 2, 3]);
        tree.split(tree.root_id(), vec![0, 1], vec![2, 3], 0.1).unwrap();
        assert!(tree.check_invariants().is_ok());
    }
}
