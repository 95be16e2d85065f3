use serde::{Deserialize, Serialize};

use crate::layout::LayoutError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
    Circular,
    Elliptical,
    Cycle,
}

impl Orientation {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "vertical" | "td" | "tb" => Some(Self::Vertical),
            "horizontal" | "lr" => Some(Self::Horizontal),
            "circular" | "circle" => Some(Self::Circular),
            "elliptical" | "ellipse" => Some(Self::Elliptical),
            "cycle" | "ring" => Some(Self::Cycle),
            _ => None,
        }
    }

    pub fn is_radial(self) -> bool {
        matches!(self, Self::Circular | Self::Elliptical | Self::Cycle)
    }

    /// Only the vertical orientation spreads siblings along the x axis.
    pub fn spreads_horizontally(self) -> bool {
        self == Self::Vertical
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorStyle {
    Straight,
    Curved,
    Orthogonal,
}

impl ConnectorStyle {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "straight" => Some(Self::Straight),
            "curved" | "curve" => Some(Self::Curved),
            "orthogonal" | "elbow" => Some(Self::Orthogonal),
            _ => None,
        }
    }
}

/// One box of the diagram as the editor models it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<f32>,
}

/// Editors write weights both as CSS keywords ("bold") and as numbers (500).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontWeight {
    Number(u16),
    Keyword(String),
}

impl Node {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            color: None,
            text_color: None,
            font_size: None,
            font_weight: None,
            children: Vec::new(),
            group_label: None,
            group_color: None,
            offset_x: None,
            offset_y: None,
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn with_group(mut self, label: impl Into<String>, color: Option<&str>) -> Self {
        self.group_label = Some(label.into());
        self.group_color = color.map(str::to_string);
        self
    }

    pub fn with_offset(mut self, dx: f32, dy: f32) -> Self {
        self.offset_x = Some(dx);
        self.offset_y = Some(dy);
        self
    }
}

/// Decodes a forest from JSON. The document root must be an array of nodes.
///
/// Nesting depth is unbounded: the recursion limit is lifted and deep
/// documents grow the stack on the heap instead.
pub fn parse_forest(input: &str) -> Result<Vec<Node>, LayoutError> {
    let mut de = serde_json::Deserializer::from_str(input);
    de.disable_recursion_limit();
    let value = serde_json::Value::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    if !value.is_array() {
        return Err(LayoutError::InvalidForest {
            found: json_kind(&value),
        });
    }
    Ok(Vec::<Node>::deserialize(serde_stacker::Deserializer::new(
        value,
    ))?)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
