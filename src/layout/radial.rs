use std::f32::consts::TAU;

use crate::config::{LayoutConfig, RadialPlacement};
use crate::ir::Orientation;

use super::tree::LayoutTree;
use super::types::RadialGeometry;

/// Smallest radius that fits `count` boxes side by side around the circle.
pub fn min_radius(count: usize, config: &LayoutConfig) -> f32 {
    let required_circumference = count as f32 * (config.node_width + config.radial.node_gap);
    required_circumference / TAU
}

/// Base ring radii for a radial orientation, grown until every node fits.
pub fn ring_geometry(
    count: usize,
    orientation: Orientation,
    config: &LayoutConfig,
) -> RadialGeometry {
    let radial = &config.radial;
    let min = min_radius(count, config);
    let (radius_x, radius_y) = match orientation {
        Orientation::Elliptical => (
            radial.ellipse_radius_x.max(min),
            radial.ellipse_radius_y.max(min * radial.ellipse_min_scale)
                * (1.0 - config.ellipse_ratio),
        ),
        _ => {
            let radius = radial.circle_radius.max(min);
            (radius, radius)
        }
    };
    RadialGeometry {
        center_x: config.canvas_width / 2.0,
        center_y: config.canvas_height / 2.0,
        radius_x,
        radius_y,
        min_radius: min,
    }
}

pub(crate) fn uses_ring(orientation: Orientation, config: &LayoutConfig) -> bool {
    orientation == Orientation::Cycle || config.radial_placement == RadialPlacement::Ring
}

/// Places every node of a circular, elliptical or cycle layout and returns the
/// ring it was placed on.
pub(crate) fn assign_radial(
    tree: &mut LayoutTree<'_>,
    orientation: Orientation,
    config: &LayoutConfig,
) -> RadialGeometry {
    let geometry = ring_geometry(tree.len(), orientation, config);

    if tree.len() == 1 {
        let node = &mut tree.nodes[0];
        node.x = geometry.center_x - node.width / 2.0;
        node.y = geometry.center_y - node.height / 2.0;
        node.apply_manual_offset();
        return geometry;
    }

    if uses_ring(orientation, config) {
        place_on_ring(tree, &geometry, config.start_angle);
    } else {
        place_on_arcs(tree, &geometry, config);
    }
    geometry
}

fn place_on_ring(tree: &mut LayoutTree<'_>, geometry: &RadialGeometry, start_angle: f32) {
    let step = TAU / tree.len() as f32;
    for (idx, node) in tree.nodes.iter_mut().enumerate() {
        let angle = start_angle + idx as f32 * step;
        node.x = geometry.center_x + geometry.radius_x * angle.cos() - node.width / 2.0;
        node.y = geometry.center_y + geometry.radius_y * angle.sin() - node.height / 2.0;
        node.apply_manual_offset();
    }
}

/// Splits the full turn among subtrees by size, top-down. Each node sits at
/// the middle of its arc, on the radius configured for its depth. Depths
/// without a configured radius step outward from the base ring by `levelStep`.
fn place_on_arcs(tree: &mut LayoutTree<'_>, geometry: &RadialGeometry, config: &LayoutConfig) {
    let mut arcs = vec![(0.0f32, 0.0f32); tree.len()];
    let roots = tree.roots.clone();
    share_arc(tree, &roots, config.start_angle, TAU, &mut arcs);

    let aspect = if geometry.radius_x > 0.0 {
        geometry.radius_y / geometry.radius_x
    } else {
        1.0
    };

    for idx in 0..tree.len() {
        let (start, sweep) = arcs[idx];
        let node = &mut tree.nodes[idx];
        let (radius_x, radius_y) = match config.level_radii.get(node.depth) {
            Some(&radius) => (radius, radius * aspect),
            None => {
                let outward = node.depth as f32 * config.level_step;
                (geometry.radius_x + outward, geometry.radius_y + outward * aspect)
            }
        };
        let angle = start + sweep / 2.0;
        node.x = geometry.center_x + radius_x * angle.cos() - node.width / 2.0;
        node.y = geometry.center_y + radius_y * angle.sin() - node.height / 2.0;
        node.apply_manual_offset();

        let children = tree.nodes[idx].children.clone();
        share_arc(tree, &children, start, sweep, &mut arcs);
    }
}

fn share_arc(
    tree: &LayoutTree<'_>,
    members: &[usize],
    start: f32,
    sweep: f32,
    arcs: &mut [(f32, f32)],
) {
    if members.is_empty() {
        return;
    }
    let total: f32 = members.iter().map(|&m| tree.nodes[m].subtree_size).sum();
    let mut cursor = start;
    for &member in members {
        let share = if total > 0.0 {
            tree.nodes[member].subtree_size / total
        } else {
            1.0 / members.len() as f32
        };
        let member_sweep = share * sweep;
        arcs[member] = (cursor, member_sweep);
        cursor += member_sweep;
    }
}
