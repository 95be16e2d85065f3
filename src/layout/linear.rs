use crate::config::LayoutConfig;
use crate::ir::Orientation;

use super::tree::LayoutTree;

/// Depth-axis offset of every level, relative to the margin.
///
/// A level starts at least `levelStep` past the previous one, and further out
/// when the previous level holds a box deep enough to reach into it.
pub(crate) fn level_offsets(
    tree: &LayoutTree<'_>,
    orientation: Orientation,
    config: &LayoutConfig,
) -> Vec<f32> {
    if tree.is_empty() {
        return Vec::new();
    }
    let levels = tree.max_depth() + 1;
    let mut deepest = vec![0.0f32; levels];
    for node in &tree.nodes {
        let size = node.depth_size(orientation);
        deepest[node.depth] = deepest[node.depth].max(size);
    }

    let mut offsets = vec![0.0f32; levels];
    for depth in 1..levels {
        let packed = offsets[depth - 1] + deepest[depth - 1] + config.level_gap;
        let stepped = depth as f32 * config.level_step;
        offsets[depth] = packed.max(stepped);
    }
    offsets
}

/// Places every node of a vertical or horizontal layout. Subtree sizes must
/// already be computed with the same gap.
pub(crate) fn assign_linear(
    tree: &mut LayoutTree<'_>,
    orientation: Orientation,
    config: &LayoutConfig,
) {
    let gap = config.sibling_gap(orientation);
    let offsets = level_offsets(tree, orientation, config);
    let vertical = orientation.spreads_horizontally();

    let mut allocated = vec![0.0f32; tree.len()];
    let roots_span: f32 = tree
        .roots
        .iter()
        .map(|&r| tree.nodes[r].subtree_size)
        .sum::<f32>()
        + gap * (tree.roots.len().saturating_sub(1)) as f32;
    let canvas_spread = if vertical {
        config.canvas_width
    } else {
        config.canvas_height
    };
    let mut cursor = canvas_spread / 2.0 - roots_span / 2.0;
    for &root in &tree.roots {
        allocated[root] = cursor;
        cursor += tree.nodes[root].subtree_size + gap;
    }

    // Pre-order: a parent's allocation is final before its children read it.
    for idx in 0..tree.len() {
        let start = allocated[idx];
        let span = tree.children_span(idx, gap);
        let node = &mut tree.nodes[idx];
        let level = offsets[node.depth];
        let centered = start + node.subtree_size / 2.0 - node.spread_size(orientation) / 2.0;
        if vertical {
            node.y = config.margin_top + level;
            node.x = centered;
        } else {
            node.x = config.margin_left + level;
            node.y = centered;
        }
        node.apply_manual_offset();

        let mut child_cursor = start + (node.subtree_size - span) / 2.0;
        for pos in 0..tree.nodes[idx].children.len() {
            let child = tree.nodes[idx].children[pos];
            allocated[child] = child_cursor;
            child_cursor += tree.nodes[child].subtree_size + gap;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Node;

    fn laid_out(
        forest: &[Node],
        orientation: Orientation,
        config: &LayoutConfig,
    ) -> Vec<(String, f32, f32, f32, f32)> {
        let mut tree = LayoutTree::build(forest, config).unwrap();
        tree.compute_subtree_sizes(orientation, config.sibling_gap(orientation));
        assign_linear(&mut tree, orientation, config);
        tree.nodes
            .iter()
            .map(|n| (n.source.id.clone(), n.x, n.y, n.width, n.height))
            .collect()
    }

    #[test]
    fn single_root_sits_at_margin_centered_on_canvas() {
        let config = LayoutConfig::default();
        let nodes = laid_out(&[Node::new("r", "Root")], Orientation::Vertical, &config);
        assert_eq!(nodes[0].1, 1920.0 / 2.0 - 140.0);
        assert_eq!(nodes[0].2, 100.0);
    }

    #[test]
    fn level_offsets_respect_step_and_tall_boxes() {
        let mut config = LayoutConfig::default();
        config.level_step = 50.0;
        let forest = vec![Node::new("r", "1\\n2\\n3\\n4\\n5\\n6").with_children(vec![
            Node::new("a", "A").with_children(vec![Node::new("b", "B")]),
        ])];
        let tree = LayoutTree::build(&forest, &config).unwrap();
        let offsets = level_offsets(&tree, Orientation::Vertical, &config);
        // root height: 40 + 6 * 32 = 232
        assert_eq!(offsets, vec![0.0, 332.0, 552.0]);

        config.level_step = 400.0;
        let offsets = level_offsets(&tree, Orientation::Vertical, &config);
        assert_eq!(offsets, vec![0.0, 400.0, 800.0]);
    }

    #[test]
    fn wide_parent_centers_children_block() {
        let mut config = LayoutConfig::default();
        config.node_width = 600.0;
        let forest = vec![Node::new("r", "Root").with_children(vec![Node::new("a", "A")])];
        let mut tree = LayoutTree::build(&forest, &config).unwrap();
        // shrink the child so the parent dominates
        tree.nodes[1].width = 200.0;
        tree.compute_subtree_sizes(Orientation::Vertical, 60.0);
        assign_linear(&mut tree, Orientation::Vertical, &config);
        let parent_center = tree.nodes[0].x + tree.nodes[0].width / 2.0;
        let child_center = tree.nodes[1].x + tree.nodes[1].width / 2.0;
        assert!((parent_center - child_center).abs() < 1e-3);
    }

    #[test]
    fn horizontal_stacks_levels_along_x() {
        let config = LayoutConfig::default();
        let forest = vec![Node::new("r", "Root").with_children(vec![
            Node::new("a", "A"),
            Node::new("b", "B"),
        ])];
        let nodes = laid_out(&forest, Orientation::Horizontal, &config);
        assert_eq!(nodes[0].1, 100.0);
        // root width 280 + level gap 100 outgrows the 300 step
        assert_eq!(nodes[1].1, 480.0);
        assert_eq!(nodes[2].1, 480.0);
        // siblings separated by height + vertical gap
        assert_eq!(nodes[2].2 - nodes[1].2, 120.0 + 100.0);
        let root_mid = nodes[0].2 + nodes[0].4 / 2.0;
        let kids_mid = (nodes[1].2 + nodes[2].2 + nodes[2].4) / 2.0;
        assert!((root_mid - kids_mid).abs() < 1e-3);
    }

    #[test]
    fn manual_offset_moves_only_the_node() {
        let config = LayoutConfig::default();
        let plain = vec![Node::new("r", "Root").with_children(vec![Node::new("a", "A")])];
        let nudged = vec![Node::new("r", "Root")
            .with_offset(30.0, -10.0)
            .with_children(vec![Node::new("a", "A")])];
        let before = laid_out(&plain, Orientation::Vertical, &config);
        let after = laid_out(&nudged, Orientation::Vertical, &config);
        assert_eq!(after[0].1, before[0].1 + 30.0);
        assert_eq!(after[0].2, before[0].2 - 10.0);
        assert_eq!(after[1], before[1]);
    }

    #[test]
    fn multiple_roots_share_the_canvas() {
        let config = LayoutConfig::default();
        let forest = vec![Node::new("a", "A"), Node::new("b", "B")];
        let nodes = laid_out(&forest, Orientation::Vertical, &config);
        assert_eq!(nodes[1].1 - nodes[0].1, 280.0 + 60.0);
        let mid = (nodes[0].1 + nodes[1].1 + 280.0) / 2.0;
        assert!((mid - 960.0).abs() < 1e-3);
    }
}
