use std::f32::consts::FRAC_PI_2;
use std::fmt::Write;

use crate::ir::{ConnectorStyle, Orientation};

use super::tree::{LayoutTree, TreeNode};
use super::types::{ConnectorLayout, RadialGeometry};

type Point = (f32, f32);

/// Where a parent/child connector leaves the parent and enters the child.
fn endpoints(
    parent: &TreeNode<'_>,
    child: &TreeNode<'_>,
    orientation: Orientation,
) -> (Point, Point) {
    match orientation {
        Orientation::Vertical => (
            (parent.x + parent.width / 2.0, parent.y + parent.height),
            (child.x + child.width / 2.0, child.y),
        ),
        Orientation::Horizontal => (
            (parent.x + parent.width, parent.y + parent.height / 2.0),
            (child.x, child.y + child.height / 2.0),
        ),
        _ => (center(parent), center(child)),
    }
}

fn center(node: &TreeNode<'_>) -> Point {
    (node.x + node.width / 2.0, node.y + node.height / 2.0)
}

/// One connector per parent/child pair. Emitted in child pre-order, which is
/// the order a depth-first walk over each parent's children produces.
pub(crate) fn route_hierarchy(
    tree: &LayoutTree<'_>,
    orientation: Orientation,
    style: ConnectorStyle,
    curve_offset: f32,
) -> Vec<ConnectorLayout> {
    let mut connectors = Vec::with_capacity(tree.len().saturating_sub(tree.roots.len()));
    for child in &tree.nodes {
        let Some(parent_idx) = child.parent else {
            continue;
        };
        let parent = &tree.nodes[parent_idx];
        let (start, end) = endpoints(parent, child, orientation);
        let points = match (style, orientation) {
            (ConnectorStyle::Straight, _) => vec![start, end],
            (ConnectorStyle::Curved, Orientation::Vertical) => {
                let mid_y = start.1 + (end.1 - start.1) / 2.0;
                vec![start, (start.0, mid_y), (end.0, mid_y), end]
            }
            (ConnectorStyle::Curved, Orientation::Horizontal) => {
                let mid_x = start.0 + (end.0 - start.0) / 2.0;
                vec![start, (mid_x, start.1), (mid_x, end.1), end]
            }
            (ConnectorStyle::Curved, _) => {
                vec![start, bend_control(start, end, curve_offset), end]
            }
            (ConnectorStyle::Orthogonal, Orientation::Vertical) => {
                let mid_y = start.1 + (end.1 - start.1) / 2.0;
                vec![start, (start.0, mid_y), (end.0, mid_y), end]
            }
            (ConnectorStyle::Orthogonal, Orientation::Horizontal) => {
                let mid_x = start.0 + (end.0 - start.0) / 2.0;
                vec![start, (mid_x, start.1), (mid_x, end.1), end]
            }
            // radial layouts have no shared level gap to elbow through
            (ConnectorStyle::Orthogonal, _) => vec![start, end],
        };
        let path = match (style, points.len()) {
            (ConnectorStyle::Curved, 4) => cubic_path(&points),
            (ConnectorStyle::Curved, 3) => quadratic_path(&points),
            _ => polyline_path(&points),
        };
        connectors.push(ConnectorLayout {
            path,
            from: parent.source.id.clone(),
            to: child.source.id.clone(),
            is_ring: false,
            points,
        });
    }
    connectors
}

/// Closed ring through every node in flat order, ignoring hierarchy.
pub(crate) fn route_ring(
    tree: &LayoutTree<'_>,
    style: ConnectorStyle,
    geometry: &RadialGeometry,
) -> Vec<ConnectorLayout> {
    let count = tree.len();
    if count < 2 {
        return Vec::new();
    }
    let mut connectors = Vec::with_capacity(count);
    for idx in 0..count {
        let from = &tree.nodes[idx];
        let to = &tree.nodes[(idx + 1) % count];
        let start = center(from);
        let end = center(to);
        let path = match style {
            ConnectorStyle::Curved => arc_path(start, end, geometry.radius_x, geometry.radius_y),
            _ => polyline_path(&[start, end]),
        };
        connectors.push(ConnectorLayout {
            path,
            from: from.source.id.clone(),
            to: to.source.id.clone(),
            is_ring: true,
            points: vec![start, end],
        });
    }
    connectors
}

/// Control point off the chord midpoint, turned a quarter from the chord direction.
fn bend_control(start: Point, end: Point, offset: f32) -> Point {
    let mid = ((start.0 + end.0) / 2.0, (start.1 + end.1) / 2.0);
    let angle = (end.1 - start.1).atan2(end.0 - start.0) + FRAC_PI_2;
    (mid.0 + offset * angle.cos(), mid.1 + offset * angle.sin())
}

fn polyline_path(points: &[Point]) -> String {
    let mut d = String::new();
    for (idx, (x, y)) in points.iter().enumerate() {
        let cmd = if idx == 0 { "M" } else { " L" };
        let _ = write!(d, "{cmd} {} {}", fmt_num(*x), fmt_num(*y));
    }
    d
}

fn cubic_path(points: &[Point]) -> String {
    let [s, c1, c2, e] = [points[0], points[1], points[2], points[3]];
    format!(
        "M {} {} C {} {}, {} {}, {} {}",
        fmt_num(s.0),
        fmt_num(s.1),
        fmt_num(c1.0),
        fmt_num(c1.1),
        fmt_num(c2.0),
        fmt_num(c2.1),
        fmt_num(e.0),
        fmt_num(e.1)
    )
}

fn quadratic_path(points: &[Point]) -> String {
    let [s, c, e] = [points[0], points[1], points[2]];
    format!(
        "M {} {} Q {} {}, {} {}",
        fmt_num(s.0),
        fmt_num(s.1),
        fmt_num(c.0),
        fmt_num(c.1),
        fmt_num(e.0),
        fmt_num(e.1)
    )
}

fn arc_path(start: Point, end: Point, radius_x: f32, radius_y: f32) -> String {
    format!(
        "M {} {} A {} {} 0 0 1 {} {}",
        fmt_num(start.0),
        fmt_num(start.1),
        fmt_num(radius_x),
        fmt_num(radius_y),
        fmt_num(end.0),
        fmt_num(end.1)
    )
}

/// Two decimals at most, no trailing zeros, no negative zero.
pub(crate) fn fmt_num(value: f32) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let mut out = format!("{rounded:.2}");
    while out.ends_with('0') {
        out.pop();
    }
    if out.ends_with('.') {
        out.pop();
    }
    out
}
