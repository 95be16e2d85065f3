use serde::{Deserialize, Serialize};

use crate::ir::ConnectorStyle;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub background: String,
    pub canvas_background: String,
    pub node_background: String,
    pub node_border: String,
    pub text_color: String,
    pub line_color: String,
    pub root_color: String,
    pub highlight: String,
    pub font_family: String,
    pub connector_style: ConnectorStyle,
    pub dashed: bool,
}

impl Theme {
    pub fn modern_light() -> Self {
        Self {
            id: "default".to_string(),
            name: "Modern Light".to_string(),
            background: "#F1F5F9".to_string(),
            canvas_background: "#FFFFFF".to_string(),
            node_background: "#FFFFFF".to_string(),
            node_border: "#E2E8F0".to_string(),
            text_color: "#1E293B".to_string(),
            line_color: "#94A3B8".to_string(),
            root_color: "#2563EB".to_string(),
            highlight: "#3B82F6".to_string(),
            font_family: "sans-serif".to_string(),
            connector_style: ConnectorStyle::Curved,
            dashed: false,
        }
    }

    pub fn cyber_dark() -> Self {
        Self {
            id: "dark".to_string(),
            name: "Cyber Dark".to_string(),
            background: "#0F172A".to_string(),
            canvas_background: "#1E293B".to_string(),
            node_background: "#334155".to_string(),
            node_border: "#475569".to_string(),
            text_color: "#F8FAFC".to_string(),
            line_color: "#64748B".to_string(),
            root_color: "#3B82F6".to_string(),
            highlight: "#60A5FA".to_string(),
            font_family: "sans-serif".to_string(),
            connector_style: ConnectorStyle::Curved,
            dashed: false,
        }
    }

    pub fn blueprint() -> Self {
        Self {
            id: "blueprint".to_string(),
            name: "Blueprint".to_string(),
            background: "#19456B".to_string(),
            canvas_background: "#1E5085".to_string(),
            node_background: "transparent".to_string(),
            node_border: "#FFFFFF".to_string(),
            text_color: "#FFFFFF".to_string(),
            line_color: "#FFFFFF".to_string(),
            root_color: "#FFFFFF".to_string(),
            highlight: "#81D4FA".to_string(),
            font_family: "monospace".to_string(),
            connector_style: ConnectorStyle::Orthogonal,
            dashed: true,
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "default" | "modern" | "light" => Some(Self::modern_light()),
            "dark" => Some(Self::cyber_dark()),
            "blueprint" => Some(Self::blueprint()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::modern_light()
    }
}
