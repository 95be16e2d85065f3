use serde::Serialize;

use crate::ir::{FontWeight, Orientation};

/// A positioned node. Carries the caller's styling fields through unchanged
/// so renderers and exporters need nothing but this record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeLayout {
    pub id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<f32>,
    pub x: f32,
    pub y: f32,
    #[serde(rename = "w")]
    pub width: f32,
    #[serde(rename = "h")]
    pub height: f32,
    pub subtree_size: f32,
    pub depth: usize,
    /// Ancestor ids from the root down to this node, inclusive.
    pub path: Vec<String>,
    /// Child ids in input order.
    pub children: Vec<String>,
}

impl NodeLayout {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Trimmed group label, `None` when unset or blank.
    pub fn group_key(&self) -> Option<&str> {
        self.group_label
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorLayout {
    /// SVG path data.
    pub path: String,
    pub from: String,
    pub to: String,
    pub is_ring: bool,
    /// Anchor and control points in path order.
    pub points: Vec<(f32, f32)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    Label,
    Zone,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupLayout {
    pub id: String,
    pub kind: GroupKind,
    pub x: f32,
    pub y: f32,
    #[serde(rename = "w")]
    pub width: f32,
    #[serde(rename = "h")]
    pub height: f32,
    pub label: String,
    pub color: String,
    pub is_zone: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_node_id: Option<String>,
    pub members: Vec<String>,
}

/// Ring geometry shared by radial placement and ring connectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadialGeometry {
    pub center_x: f32,
    pub center_y: f32,
    pub radius_x: f32,
    pub radius_y: f32,
    pub min_radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    fn include(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x + width);
        self.max_y = self.max_y.max(y + height);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub orientation: Orientation,
    pub nodes: Vec<NodeLayout>,
    pub connectors: Vec<ConnectorLayout>,
    pub groups: Vec<GroupLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radial: Option<RadialGeometry>,
}

impl Layout {
    pub fn empty(orientation: Orientation) -> Self {
        Self {
            orientation,
            nodes: Vec::new(),
            connectors: Vec::new(),
            groups: Vec::new(),
            radial: None,
        }
    }

    pub fn node(&self, id: &str) -> Option<&NodeLayout> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn group(&self, id: &str) -> Option<&GroupLayout> {
        self.groups.iter().find(|group| group.id == id)
    }

    /// Extents of every node and overlay; `None` for an empty layout.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut rects = self
            .nodes
            .iter()
            .map(|n| (n.x, n.y, n.width, n.height))
            .chain(self.groups.iter().map(|g| (g.x, g.y, g.width, g.height)));
        let (x, y, w, h) = rects.next()?;
        let mut bounds = Bounds {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        };
        for (x, y, w, h) in rects {
            bounds.include(x, y, w, h);
        }
        Some(bounds)
    }
}
