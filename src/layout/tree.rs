use std::collections::HashSet;

use crate::config::LayoutConfig;
use crate::ir::{Node, Orientation};

use super::error::{LayoutError, Result};
use super::text::node_size;
use super::types::NodeLayout;

/// Private working copy of one node. Indices are pre-order positions, so a
/// parent always precedes its descendants and a subtree is a contiguous run.
#[derive(Debug, Clone)]
pub(crate) struct TreeNode<'a> {
    pub source: &'a Node,
    pub parent: Option<usize>,
    pub sibling_index: usize,
    pub children: Vec<usize>,
    pub depth: usize,
    pub width: f32,
    pub height: f32,
    pub subtree_size: f32,
    pub x: f32,
    pub y: f32,
}

impl TreeNode<'_> {
    pub fn spread_size(&self, orientation: Orientation) -> f32 {
        if orientation.spreads_horizontally() {
            self.width
        } else {
            self.height
        }
    }

    pub fn depth_size(&self, orientation: Orientation) -> f32 {
        if orientation.spreads_horizontally() {
            self.height
        } else {
            self.width
        }
    }

    /// Adds the caller's manual nudge. Children do not inherit it.
    pub fn apply_manual_offset(&mut self) {
        self.x += self.source.offset_x.unwrap_or(0.0);
        self.y += self.source.offset_y.unwrap_or(0.0);
    }
}

#[derive(Debug, Clone)]
pub(crate) struct LayoutTree<'a> {
    pub nodes: Vec<TreeNode<'a>>,
    pub roots: Vec<usize>,
}

impl<'a> LayoutTree<'a> {
    /// Validates the forest and copies it into a pre-order arena with sizes.
    /// The walk uses an explicit stack so input depth never touches the call stack.
    pub fn build(forest: &'a [Node], config: &LayoutConfig) -> Result<Self> {
        let mut nodes: Vec<TreeNode<'a>> = Vec::new();
        let mut roots = Vec::with_capacity(forest.len());
        let mut seen: HashSet<&'a str> = HashSet::new();
        let mut stack: Vec<(&'a Node, Option<usize>, usize, usize)> = forest
            .iter()
            .enumerate()
            .rev()
            .map(|(idx, node)| (node, None, idx, 0))
            .collect();

        while let Some((source, parent, sibling_index, depth)) = stack.pop() {
            let idx = nodes.len();
            let (width, height) = node_size(&source.text, config);
            nodes.push(TreeNode {
                source,
                parent,
                sibling_index,
                children: Vec::with_capacity(source.children.len()),
                depth,
                width,
                height,
                subtree_size: 0.0,
                x: 0.0,
                y: 0.0,
            });
            match parent {
                Some(parent) => nodes[parent].children.push(idx),
                None => roots.push(idx),
            }

            if source.id.trim().is_empty() {
                return Err(LayoutError::MissingId {
                    location: location(&nodes, idx),
                });
            }
            if !seen.insert(source.id.as_str()) {
                return Err(LayoutError::DuplicateId {
                    id: source.id.clone(),
                });
            }
            for (field, value) in [
                ("offsetX", source.offset_x),
                ("offsetY", source.offset_y),
                ("fontSize", source.font_size),
            ] {
                if value.is_some_and(|v| !v.is_finite()) {
                    return Err(LayoutError::NonFiniteNodeValue {
                        id: source.id.clone(),
                        field,
                    });
                }
            }

            for (child_idx, child) in source.children.iter().enumerate().rev() {
                stack.push((child, Some(idx), child_idx, depth + 1));
            }
        }

        Ok(Self { nodes, roots })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Sum of the children's subtree sizes plus one gap between each pair.
    pub fn children_span(&self, idx: usize, gap: f32) -> f32 {
        let children = &self.nodes[idx].children;
        if children.is_empty() {
            return 0.0;
        }
        let total: f32 = children.iter().map(|&c| self.nodes[c].subtree_size).sum();
        total + gap * (children.len() as f32 - 1.0)
    }

    /// Post-order footprint along the spread axis. Walking indices backwards
    /// visits every child before its parent.
    pub fn compute_subtree_sizes(&mut self, orientation: Orientation, gap: f32) {
        for idx in (0..self.nodes.len()).rev() {
            let own = self.nodes[idx].spread_size(orientation);
            let span = self.children_span(idx, gap);
            self.nodes[idx].subtree_size = own.max(span);
        }
    }

    /// Pre-order flat list with ancestor paths. Builds fresh records; the
    /// source forest is only read.
    pub fn flatten(&self) -> Vec<NodeLayout> {
        let mut out: Vec<NodeLayout> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let mut path = match node.parent {
                Some(parent) => out[parent].path.clone(),
                None => Vec::with_capacity(1),
            };
            path.push(node.source.id.clone());
            let source = node.source;
            out.push(NodeLayout {
                id: source.id.clone(),
                text: source.text.clone(),
                color: source.color.clone(),
                text_color: source.text_color.clone(),
                font_size: source.font_size,
                font_weight: source.font_weight.clone(),
                group_label: source.group_label.clone(),
                group_color: source.group_color.clone(),
                offset_x: source.offset_x,
                offset_y: source.offset_y,
                x: node.x,
                y: node.y,
                width: node.width,
                height: node.height,
                subtree_size: node.subtree_size,
                depth: node.depth,
                path,
                children: source.children.iter().map(|c| c.id.clone()).collect(),
            });
        }
        out
    }
}

/// `roots[0].children[2]` style address, used when the id itself is missing.
fn location(nodes: &[TreeNode<'_>], idx: usize) -> String {
    let mut steps = Vec::new();
    let mut cursor = Some(idx);
    while let Some(current) = cursor {
        steps.push(nodes[current].sibling_index);
        cursor = nodes[current].parent;
    }
    steps.reverse();
    let mut out = String::new();
    for (level, step) in steps.iter().enumerate() {
        if level == 0 {
            out.push_str(&format!("roots[{step}]"));
        } else {
            out.push_str(&format!(".children[{step}]"));
        }
    }
    out
}
