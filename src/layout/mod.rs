mod error;
mod groups;
mod linear;
mod radial;
mod routing;
pub mod text;
mod tree;
pub(crate) mod types;
pub use error::LayoutError;
pub use radial::{min_radius, ring_geometry};
pub use types::*;
use groups::*;
use linear::*;
use radial::*;
use routing::*;
use tree::LayoutTree;

use crate::config::LayoutConfig;
use crate::ir::{Node, Orientation};
use tracing::debug;

/// Lays out a forest. The forest is only borrowed; every call builds its own
/// working copy and returns fresh records, so repeated calls on the same input
/// give identical results.
pub fn compute_layout(
    forest: &[Node],
    orientation: Orientation,
    config: &LayoutConfig,
) -> Result<Layout, LayoutError> {
    config.validate()?;
    let mut tree = LayoutTree::build(forest, config)?;
    if tree.is_empty() {
        return Ok(Layout::empty(orientation));
    }

    let gap = config.sibling_gap(orientation);
    tree.compute_subtree_sizes(orientation, gap);
    let style = config.connector_style();

    let (connectors, radial) = if orientation.is_radial() {
        let geometry = assign_radial(&mut tree, orientation, config);
        debug!(
            nodes = tree.len(),
            radius_x = geometry.radius_x,
            radius_y = geometry.radius_y,
            min_radius = geometry.min_radius,
            "radial placement"
        );
        let connectors = if orientation == Orientation::Cycle {
            route_ring(&tree, style, &geometry)
        } else {
            route_hierarchy(&tree, orientation, style, config.radial.curve_offset)
        };
        (connectors, Some(geometry))
    } else {
        assign_linear(&mut tree, orientation, config);
        debug!(nodes = tree.len(), roots = tree.roots.len(), gap, "linear placement");
        let connectors = route_hierarchy(&tree, orientation, style, config.radial.curve_offset);
        (connectors, None)
    };

    let nodes = tree.flatten();
    let mut groups = label_groups(&nodes, config);
    if config.show_zones {
        groups.extend(auto_zones(&nodes, config));
    }
    debug!(
        connectors = connectors.len(),
        groups = groups.len(),
        "layout complete"
    );

    Ok(Layout {
        orientation,
        nodes,
        connectors,
        groups,
        radial,
    })
}
