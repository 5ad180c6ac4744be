//! Outline tree construction.
//!
//! Converts the flat, leveled outline of a conversion result into the
//! nested hierarchy consumed by both navigation serializers. Nodes live in
//! an arena and nesting state is an explicit stack of container handles, so
//! the tree carries no parent back-references.

use super::OutlineEntry;

/// Index of a node within a [`TocTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

/// One node of the nested outline: an entry plus its ordered children.
#[derive(Debug, Clone)]
pub struct TocNode {
    pub entry: OutlineEntry,
    pub children: Vec<NodeId>,
}

/// Nested outline tree.
///
/// Built from entries in document order. An entry whose effective level
/// (level floored at 1) is lower than the current nesting depth closes as
/// many containers as needed in one step; an entry whose effective level
/// exceeds the raw level of the previous entry opens exactly one new
/// container, so a jump from level 1 to level 3 nests a single step deeper.
#[derive(Debug, Clone, Default)]
pub struct TocTree {
    nodes: Vec<TocNode>,
    roots: Vec<NodeId>,
    depth: usize,
}

impl TocTree {
    /// Build the tree from a flat outline.
    ///
    /// An empty outline yields an empty tree with depth 0.
    pub fn build(entries: &[OutlineEntry]) -> Self {
        let mut tree = TocTree::default();

        // Open containers; `None` is the root list. The stack length is the
        // current nesting depth.
        let mut stack: Vec<Option<NodeId>> = Vec::new();
        let mut last_level = 0u32;
        let mut last_node: Option<NodeId> = None;

        for entry in entries {
            let effective = entry.level.max(1) as usize;

            if effective < stack.len() {
                stack.truncate(effective);
            } else if entry.level.max(1) > last_level {
                // Descend one step under the most recently appended node,
                // regardless of the size of the level jump.
                stack.push(last_node);
            }

            let id = NodeId(tree.nodes.len());
            tree.nodes.push(TocNode {
                entry: entry.clone(),
                children: Vec::new(),
            });
            match stack.last() {
                Some(Some(parent)) => tree.nodes[parent.0].children.push(id),
                _ => tree.roots.push(id),
            }

            tree.depth = tree.depth.max(stack.len());
            last_node = Some(id);
            last_level = entry.level;
        }

        tree
    }

    /// Top-level nodes in document order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> &TocNode {
        &self.nodes[id.0]
    }

    /// Maximum nesting depth reached; 0 for an empty outline.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Total number of entries in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FileId;
    use proptest::prelude::*;

    fn entries(levels: &[u32]) -> Vec<OutlineEntry> {
        levels
            .iter()
            .enumerate()
            .map(|(i, &level)| OutlineEntry::new(format!("entry {i}"), level, FileId(0)))
            .collect()
    }

    /// Collect (title, depth) pairs in document order.
    fn flatten(tree: &TocTree) -> Vec<(String, usize)> {
        fn walk(tree: &TocTree, ids: &[NodeId], depth: usize, out: &mut Vec<(String, usize)>) {
            for &id in ids {
                let node = tree.node(id);
                out.push((node.entry.title.clone(), depth));
                walk(tree, &node.children, depth + 1, out);
            }
        }
        let mut out = Vec::new();
        walk(tree, tree.roots(), 1, &mut out);
        out
    }

    fn depths(levels: &[u32]) -> Vec<usize> {
        flatten(&TocTree::build(&entries(levels)))
            .into_iter()
            .map(|(_, depth)| depth)
            .collect()
    }

    #[test]
    fn empty_outline() {
        let tree = TocTree::build(&[]);
        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 0);
        assert!(tree.roots().is_empty());
    }

    #[test]
    fn flat_outline() {
        assert_eq!(depths(&[1, 1, 1]), [1, 1, 1]);
        assert_eq!(TocTree::build(&entries(&[1, 1, 1])).depth(), 1);
    }

    #[test]
    fn level_jump_clamps_to_one_step() {
        // A jump from 1 to 3 only nests one step deeper.
        assert_eq!(depths(&[1, 3, 2]), [1, 2, 2]);
    }

    #[test]
    fn ascent_may_skip_levels() {
        assert_eq!(
            depths(&[1, 1, 1, 2, 2, 2, 3, 3, 3, 1]),
            [1, 1, 1, 2, 2, 2, 3, 3, 3, 1]
        );
    }

    #[test]
    fn zero_level_floors_to_one() {
        // The first entry opens the root container even at level 0.
        assert_eq!(depths(&[0]), [1]);
        // Descent is judged against the raw previous level, so a level-1
        // entry after a level-0 one opens a new container.
        assert_eq!(depths(&[0, 1]), [1, 2]);
        assert_eq!(depths(&[0, 0]), [1, 2]);
    }

    #[test]
    fn initial_deep_level_starts_at_depth_one() {
        assert_eq!(depths(&[4, 4, 5]), [1, 1, 2]);
    }

    #[test]
    fn children_attach_to_preceding_entry() {
        let tree = TocTree::build(&entries(&[1, 2, 2, 1]));
        assert_eq!(tree.roots().len(), 2);
        let first = tree.node(tree.roots()[0]);
        assert_eq!(first.children.len(), 2);
        assert_eq!(tree.node(tree.roots()[1]).children.len(), 0);
    }

    #[test]
    fn max_depth_tracked() {
        assert_eq!(TocTree::build(&entries(&[1, 2, 3, 1])).depth(), 3);
        assert_eq!(TocTree::build(&entries(&[1, 3, 2])).depth(), 2);
    }

    proptest! {
        #[test]
        fn every_entry_appears_exactly_once(levels in proptest::collection::vec(0u32..8, 0..64)) {
            let tree = TocTree::build(&entries(&levels));
            prop_assert_eq!(tree.len(), levels.len());
            let flat = flatten(&tree);
            prop_assert_eq!(flat.len(), levels.len());
            // Document order is preserved by the traversal.
            for (i, (title, _)) in flat.iter().enumerate() {
                prop_assert_eq!(title, &format!("entry {i}"));
            }
        }

        #[test]
        fn depth_bounded_by_entry_count(levels in proptest::collection::vec(0u32..8, 0..64)) {
            let tree = TocTree::build(&entries(&levels));
            prop_assert!(tree.depth() <= levels.len());
            let max = flatten(&tree).iter().map(|&(_, d)| d).max().unwrap_or(0);
            prop_assert_eq!(tree.depth(), max);
        }
    }
}
