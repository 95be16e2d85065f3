use indexmap::{IndexMap, IndexSet};

use crate::config::LayoutConfig;

use super::text::first_line;
use super::types::{GroupKind, GroupLayout, NodeLayout};

struct LabelBucket {
    color: String,
    members: IndexSet<usize>,
}

/// Indices of `nodes[idx]` and every node whose path runs through it.
///
/// `nodes` is in pre-order, so the subtree is the run right after `idx`
/// while deeper nodes still carry this id at this node's depth.
fn subtree_members(nodes: &[NodeLayout], idx: usize) -> impl Iterator<Item = usize> + '_ {
    let owner = &nodes[idx];
    let depth = owner.depth;
    std::iter::once(idx).chain(
        nodes[idx + 1..]
            .iter()
            .enumerate()
            .take_while(move |(_, cand)| {
                cand.depth > depth && cand.path.get(depth) == Some(&owner.id)
            })
            .map(move |(offset, _)| idx + 1 + offset),
    )
}

fn padded_box(nodes: &[NodeLayout], members: &IndexSet<usize>, pad: f32) -> (f32, f32, f32, f32) {
    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for &idx in members {
        let node = &nodes[idx];
        min_x = min_x.min(node.x);
        min_y = min_y.min(node.y);
        max_x = max_x.max(node.right());
        max_y = max_y.max(node.bottom());
    }
    (
        min_x - pad,
        min_y - pad,
        max_x - min_x + pad * 2.0,
        max_y - min_y + pad * 2.0,
    )
}

/// Overlays for free-text group labels. Every node tagged with a label pulls
/// itself and its descendants into that label's bucket; the same label on
/// unrelated nodes yields one merged box.
pub(crate) fn label_groups(nodes: &[NodeLayout], config: &LayoutConfig) -> Vec<GroupLayout> {
    let mut buckets: IndexMap<&str, LabelBucket> = IndexMap::new();
    for (idx, node) in nodes.iter().enumerate() {
        let Some(label) = node.group_key() else {
            continue;
        };
        let bucket = buckets.entry(label).or_insert_with(|| LabelBucket {
            color: node
                .group_color
                .clone()
                .filter(|color| !color.is_empty())
                .unwrap_or_else(|| config.groups.default_color.clone()),
            members: IndexSet::new(),
        });
        bucket.members.extend(subtree_members(nodes, idx));
    }

    buckets
        .into_iter()
        .map(|(label, bucket)| {
            let (x, y, width, height) =
                padded_box(nodes, &bucket.members, config.groups.label_padding);
            GroupLayout {
                id: format!("group-{label}"),
                kind: GroupKind::Label,
                x,
                y,
                width,
                height,
                label: label.to_string(),
                color: bucket.color,
                is_zone: false,
                target_node_id: None,
                members: bucket.members.iter().map(|&i| nodes[i].id.clone()).collect(),
            }
        })
        .collect()
}

/// One zone per direct child of a root, in flat order.
pub(crate) fn auto_zones(nodes: &[NodeLayout], config: &LayoutConfig) -> Vec<GroupLayout> {
    let groups = &config.groups;
    let mut zones = Vec::new();
    for (idx, node) in nodes.iter().enumerate() {
        if node.depth != 1 {
            continue;
        }
        let zone_index = zones.len();
        let members: IndexSet<usize> = subtree_members(nodes, idx).collect();
        let (x, y, width, height) = padded_box(nodes, &members, groups.zone_padding);

        let default_label = if node.text.is_empty() {
            groups.zone_suffix.trim().to_string()
        } else {
            format!("{}{}", first_line(&node.text), groups.zone_suffix)
        };
        let default_color = if groups.zone_palette.is_empty() {
            config.groups.default_color.clone()
        } else {
            groups.zone_palette[zone_index % groups.zone_palette.len()].clone()
        };
        let overrides = config.zone_overrides.get(&node.id);
        let label = overrides
            .and_then(|o| o.label.clone())
            .filter(|label| !label.is_empty())
            .unwrap_or(default_label);
        let color = overrides
            .and_then(|o| o.color.clone())
            .filter(|color| !color.is_empty())
            .unwrap_or(default_color);

        zones.push(GroupLayout {
            id: format!("zone-{}", node.id),
            kind: GroupKind::Zone,
            x,
            y,
            width,
            height,
            label,
            color,
            is_zone: true,
            target_node_id: Some(node.id.clone()),
            members: members.iter().map(|&i| nodes[i].id.clone()).collect(),
        });
    }
    zones
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ZoneOverride;

    fn node(id: &str, path: &[&str], x: f32, y: f32) -> NodeLayout {
        NodeLayout {
            id: id.to_string(),
            text: format!("{id} title\\nsecond line"),
            color: None,
            text_color: None,
            font_size: None,
            font_weight: None,
            group_label: None,
            group_color: None,
            offset_x: None,
            offset_y: None,
            x,
            y,
            width: 100.0,
            height: 50.0,
            subtree_size: 100.0,
            depth: path.len() - 1,
            path: path.iter().map(|p| p.to_string()).collect(),
            children: Vec::new(),
        }
    }

    fn sample() -> Vec<NodeLayout> {
        vec![
            node("r", &["r"], 500.0, 0.0),
            node("a", &["r", "a"], 200.0, 200.0),
            node("a1", &["r", "a", "a1"], 100.0, 400.0),
            node("a2", &["r", "a", "a2"], 300.0, 400.0),
            node("b", &["r", "b"], 800.0, 200.0),
            node("b1", &["r", "b", "b1"], 800.0, 400.0),
        ]
    }

    #[test]
    fn label_group_covers_node_and_descendants() {
        let mut nodes = sample();
        nodes[1].group_label = Some(" Core ".to_string());
        nodes[1].group_color = Some("#FF0000".to_string());
        let groups = label_groups(&nodes, &LayoutConfig::default());
        assert_eq!(groups.len(), 1);
        let group = &groups[0];
        assert_eq!(group.id, "group-Core");
        assert_eq!(group.label, "Core");
        assert_eq!(group.color, "#FF0000");
        assert_eq!(group.members, vec!["a", "a1", "a2"]);
        assert_eq!((group.x, group.y), (100.0 - 25.0, 200.0 - 25.0));
        assert_eq!(group.width, (400.0 - 100.0) + 50.0);
        assert_eq!(group.height, (450.0 - 200.0) + 50.0);
    }

    #[test]
    fn shared_label_merges_disjoint_subtrees() {
        let mut nodes = sample();
        nodes[2].group_label = Some("A".to_string());
        nodes[5].group_label = Some("A".to_string());
        nodes[5].group_color = Some("#00FF00".to_string());
        let groups = label_groups(&nodes, &LayoutConfig::default());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members, vec!["a1", "b1"]);
        // first tagged node had no color
        assert_eq!(groups[0].color, "#CBD5E1");
        assert_eq!(groups[0].x, 75.0);
        assert_eq!(groups[0].width, 900.0 - 100.0 + 50.0);
    }

    #[test]
    fn blank_labels_form_no_group() {
        let mut nodes = sample();
        nodes[1].group_label = Some("   ".to_string());
        assert_eq!(nodes[1].group_key(), None);
        assert!(label_groups(&nodes, &LayoutConfig::default()).is_empty());
    }

    #[test]
    fn nested_labels_do_not_duplicate_members() {
        let mut nodes = sample();
        nodes[1].group_label = Some("X".to_string());
        nodes[2].group_label = Some("X".to_string());
        let groups = label_groups(&nodes, &LayoutConfig::default());
        assert_eq!(groups[0].members, vec!["a", "a1", "a2"]);
    }

    #[test]
    fn zones_cover_top_level_subtrees() {
        let nodes = sample();
        let mut config = LayoutConfig::default();
        config.show_zones = true;
        config.zone_overrides.insert(
            "b".to_string(),
            ZoneOverride {
                label: Some("Services".to_string()),
                color: Some(String::new()),
            },
        );
        let zones = auto_zones(&nodes, &config);
        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].id, "zone-a");
        assert_eq!(zones[0].label, "a title Zone");
        assert_eq!(zones[0].color, "#E0F2FE");
        assert_eq!(zones[0].x, 100.0 - 40.0);
        assert_eq!(zones[0].target_node_id.as_deref(), Some("a"));
        assert_eq!(zones[1].label, "Services");
        // blank override color falls back to the palette
        assert_eq!(zones[1].color, "#F0FDF4");
        assert_eq!(zones[1].members, vec!["b", "b1"]);
    }

    #[test]
    fn zone_for_untitled_node() {
        let mut nodes = sample();
        nodes[4].text.clear();
        let zones = auto_zones(&nodes, &LayoutConfig::default());
        assert_eq!(zones[1].label, "Zone");
    }
}
