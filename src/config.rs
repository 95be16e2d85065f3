use crate::ir::{ConnectorStyle, Orientation};
use crate::layout::LayoutError;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

const ZONE_PALETTE: [&str; 6] = [
    "#E0F2FE", "#F0FDF4", "#FFF7ED", "#F3E8FF", "#FCE7F3", "#ECFEFF",
];

/// How circular and elliptical layouts distribute nodes around the center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadialPlacement {
    /// Each subtree owns an arc proportional to its size.
    #[default]
    Arc,
    /// Every node gets the same angular step, hierarchy ignored.
    Ring,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadialConfig {
    pub node_gap: f32,
    pub circle_radius: f32,
    pub ellipse_radius_x: f32,
    pub ellipse_radius_y: f32,
    pub ellipse_min_scale: f32,
    pub curve_offset: f32,
}

impl Default for RadialConfig {
    fn default() -> Self {
        Self {
            node_gap: 60.0,
            circle_radius: 450.0,
            ellipse_radius_x: 650.0,
            ellipse_radius_y: 350.0,
            ellipse_min_scale: 0.6,
            curve_offset: 80.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupConfig {
    pub label_padding: f32,
    pub zone_padding: f32,
    pub default_color: String,
    pub zone_palette: Vec<String>,
    pub zone_suffix: String,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            label_padding: 25.0,
            zone_padding: 40.0,
            default_color: "#CBD5E1".to_string(),
            zone_palette: ZONE_PALETTE.iter().map(|c| c.to_string()).collect(),
            zone_suffix: " Zone".to_string(),
        }
    }
}

/// Everything one layout call reads. Passed by shared reference through every pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub node_width: f32,
    pub base_node_height: f32,
    pub text_padding: f32,
    pub line_height: f32,
    pub horizontal_gap: f32,
    pub vertical_gap: f32,
    pub margin_top: f32,
    pub margin_left: f32,
    pub level_gap: f32,
    pub level_step: f32,
    pub sibling_spacing: Option<f32>,
    pub connector_style: Option<ConnectorStyle>,
    pub ellipse_ratio: f32,
    pub start_angle: f32,
    pub show_zones: bool,
    pub zone_overrides: BTreeMap<String, ZoneOverride>,
    pub level_radii: Vec<f32>,
    pub radial_placement: RadialPlacement,
    pub radial: RadialConfig,
    pub groups: GroupConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1920.0,
            canvas_height: 1080.0,
            node_width: 280.0,
            base_node_height: 120.0,
            text_padding: 40.0,
            line_height: 32.0,
            horizontal_gap: 60.0,
            vertical_gap: 100.0,
            margin_top: 100.0,
            margin_left: 100.0,
            level_gap: 100.0,
            level_step: 300.0,
            sibling_spacing: None,
            connector_style: None,
            ellipse_ratio: 0.0,
            start_angle: -std::f32::consts::FRAC_PI_2,
            show_zones: false,
            zone_overrides: BTreeMap::new(),
            level_radii: Vec::new(),
            radial_placement: RadialPlacement::Arc,
            radial: RadialConfig::default(),
            groups: GroupConfig::default(),
        }
    }
}

impl LayoutConfig {
    /// Gap between sibling spans along the spread axis.
    pub fn sibling_gap(&self, orientation: Orientation) -> f32 {
        self.sibling_spacing.unwrap_or(if orientation.spreads_horizontally() {
            self.horizontal_gap
        } else {
            self.vertical_gap
        })
    }

    pub fn connector_style(&self) -> ConnectorStyle {
        self.connector_style.unwrap_or(ConnectorStyle::Orthogonal)
    }

    /// Rejects values that would turn into NaN or overlapping geometry.
    /// Field names in errors use the camelCase option names callers write.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let non_negative = [
            ("canvasWidth", self.canvas_width),
            ("canvasHeight", self.canvas_height),
            ("nodeWidth", self.node_width),
            ("baseNodeHeight", self.base_node_height),
            ("textPadding", self.text_padding),
            ("lineHeight", self.line_height),
            ("horizontalGap", self.horizontal_gap),
            ("verticalGap", self.vertical_gap),
            ("levelGap", self.level_gap),
            ("levelStep", self.level_step),
            ("radial.nodeGap", self.radial.node_gap),
            ("radial.circleRadius", self.radial.circle_radius),
            ("radial.ellipseRadiusX", self.radial.ellipse_radius_x),
            ("radial.ellipseRadiusY", self.radial.ellipse_radius_y),
            ("radial.ellipseMinScale", self.radial.ellipse_min_scale),
            ("groups.labelPadding", self.groups.label_padding),
            ("groups.zonePadding", self.groups.zone_padding),
        ];
        for (field, value) in non_negative {
            check_finite(field, value)?;
            if value < 0.0 {
                return Err(LayoutError::OutOfRange { field, value });
            }
        }
        for (field, value) in [
            ("marginTop", self.margin_top),
            ("marginLeft", self.margin_left),
            ("startAngle", self.start_angle),
            ("radial.curveOffset", self.radial.curve_offset),
        ] {
            check_finite(field, value)?;
        }
        if let Some(spacing) = self.sibling_spacing {
            check_finite("siblingSpacing", spacing)?;
            if spacing < 0.0 {
                return Err(LayoutError::OutOfRange {
                    field: "siblingSpacing",
                    value: spacing,
                });
            }
        }
        check_finite("ellipseRatio", self.ellipse_ratio)?;
        if !(0.0..1.0).contains(&self.ellipse_ratio) {
            return Err(LayoutError::OutOfRange {
                field: "ellipseRatio",
                value: self.ellipse_ratio,
            });
        }
        for radius in &self.level_radii {
            check_finite("levelRadii", *radius)?;
            if *radius < 0.0 {
                return Err(LayoutError::OutOfRange {
                    field: "levelRadii",
                    value: *radius,
                });
            }
        }
        Ok(())
    }
}

fn check_finite(field: &'static str, value: f32) -> Result<(), LayoutError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(LayoutError::NonFiniteConfig { field })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub orientation: Orientation,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            layout: LayoutConfig::default(),
            orientation: Orientation::Vertical,
        }
    }
}

impl Config {
    /// Layout config with the theme's connector style filled in when none was chosen.
    pub fn resolved_layout(&self) -> LayoutConfig {
        let mut layout = self.layout.clone();
        if layout.connector_style.is_none() {
            layout.connector_style = Some(self.theme.connector_style);
        }
        layout
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    orientation: Option<String>,
    level_step: Option<f32>,
    sibling_spacing: Option<f32>,
    connector_style: Option<String>,
    ellipse_ratio: Option<f32>,
    start_angle: Option<f32>,
    show_zones: Option<bool>,
    zone_overrides: Option<BTreeMap<String, ZoneOverride>>,
    level_radii: Option<Vec<f32>>,
    radial_placement: Option<RadialPlacement>,
    canvas_width: Option<f32>,
    canvas_height: Option<f32>,
    node_width: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses a JSON5 config document and merges it onto the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = json5::from_str(contents)?;
    let mut config = Config::default();

    if let Some(theme_name) = parsed.theme.as_deref() {
        config.theme = Theme::by_name(theme_name)
            .ok_or_else(|| anyhow::anyhow!("unknown theme `{theme_name}`"))?;
    }
    if let Some(token) = parsed.orientation.as_deref() {
        config.orientation = Orientation::from_token(token)
            .ok_or_else(|| anyhow::anyhow!("unknown orientation `{token}`"))?;
    }
    if let Some(token) = parsed.connector_style.as_deref() {
        config.layout.connector_style = Some(
            ConnectorStyle::from_token(token)
                .ok_or_else(|| anyhow::anyhow!("unknown connector style `{token}`"))?,
        );
    }

    let layout = &mut config.layout;
    if let Some(v) = parsed.level_step {
        layout.level_step = v;
    }
    if let Some(v) = parsed.sibling_spacing {
        layout.sibling_spacing = Some(v);
    }
    if let Some(v) = parsed.ellipse_ratio {
        layout.ellipse_ratio = v;
    }
    if let Some(v) = parsed.start_angle {
        layout.start_angle = v;
    }
    if let Some(v) = parsed.show_zones {
        layout.show_zones = v;
    }
    if let Some(v) = parsed.zone_overrides {
        layout.zone_overrides = v;
    }
    if let Some(v) = parsed.level_radii {
        layout.level_radii = v;
    }
    if let Some(v) = parsed.radial_placement {
        layout.radial_placement = v;
    }
    if let Some(v) = parsed.canvas_width {
        layout.canvas_width = v;
    }
    if let Some(v) = parsed.canvas_height {
        layout.canvas_height = v;
    }
    if let Some(v) = parsed.node_width {
        layout.node_width = v;
    }

    config.layout.validate()?;
    Ok(config)
}
