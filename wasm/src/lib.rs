use std::collections::BTreeMap;

use serde::Deserialize;
use treeslide::{
    ConnectorStyle, LayoutConfig, Orientation, RadialPlacement, Theme, ZoneOverride,
    compute_layout, layout_to_json, parse_forest,
};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutOptions {
    orientation: Option<String>,
    theme: Option<String>,
    level_step: Option<f32>,
    sibling_spacing: Option<f32>,
    connector_style: Option<String>,
    ellipse_ratio: Option<f32>,
    start_angle: Option<f32>,
    show_zones: Option<bool>,
    zone_overrides: Option<BTreeMap<String, ZoneOverride>>,
    level_radii: Option<Vec<f32>>,
    radial_placement: Option<RadialPlacement>,
    pretty: Option<bool>,
}

fn build_layout_config(options: &LayoutOptions) -> Result<(Orientation, LayoutConfig), String> {
    let orientation = match options.orientation.as_deref() {
        Some(token) => Orientation::from_token(token)
            .ok_or_else(|| format!("unknown orientation `{token}`"))?,
        None => Orientation::default(),
    };

    let theme = match options.theme.as_deref() {
        Some(name) => Some(Theme::by_name(name).ok_or_else(|| format!("unknown theme `{name}`"))?),
        None => None,
    };

    let mut config = LayoutConfig::default();
    config.connector_style = match options.connector_style.as_deref() {
        Some(token) => Some(
            ConnectorStyle::from_token(token)
                .ok_or_else(|| format!("unknown connector style `{token}`"))?,
        ),
        None => theme.map(|theme| theme.connector_style),
    };
    if let Some(v) = options.level_step {
        config.level_step = v;
    }
    config.sibling_spacing = options.sibling_spacing;
    if let Some(v) = options.ellipse_ratio {
        config.ellipse_ratio = v;
    }
    if let Some(v) = options.start_angle {
        config.start_angle = v;
    }
    if let Some(v) = options.show_zones {
        config.show_zones = v;
    }
    if let Some(v) = &options.zone_overrides {
        config.zone_overrides = v.clone();
    }
    if let Some(v) = &options.level_radii {
        config.level_radii = v.clone();
    }
    if let Some(v) = options.radial_placement {
        config.radial_placement = v;
    }
    Ok((orientation, config))
}

fn layout_forest(forest_json: &str, options: &LayoutOptions) -> Result<String, String> {
    let (orientation, config) = build_layout_config(options)?;
    let forest = parse_forest(forest_json).map_err(|error| error.to_string())?;
    let layout = compute_layout(&forest, orientation, &config).map_err(|error| error.to_string())?;
    layout_to_json(&layout, options.pretty.unwrap_or(false)).map_err(|error| error.to_string())
}

#[wasm_bindgen]
pub fn layout_json(forest_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<LayoutOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        LayoutOptions::default()
    };

    layout_forest(forest_json, &options).map_err(|error| JsValue::from_str(&error))
}

#[cfg(test)]
mod tests {
    use crate::{LayoutOptions, build_layout_config, layout_forest};

    #[test]
    fn lays_out_cycle_with_editor_options() {
        let forest = r#"[
            { "id": "n0", "text": "Plan", "children": [
                { "id": "n1", "text": "Build" },
                { "id": "n2", "text": "Ship" }
            ] }
        ]"#;
        let options: LayoutOptions = serde_json::from_str(
            r#"{ "orientation": "cycle", "theme": "dark", "showZones": true }"#,
        )
        .unwrap();

        let json = layout_forest(forest, &options).expect("cycle layout should succeed");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["orientation"], "cycle");
        assert_eq!(value["connectors"].as_array().unwrap().len(), 3);
        assert!(value["connectors"][0]["path"].as_str().unwrap().contains(" A "));
        assert_eq!(value["groups"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn rejects_unknown_orientation() {
        let options: LayoutOptions =
            serde_json::from_str(r#"{ "orientation": "spiral" }"#).unwrap();
        let err = layout_forest("[]", &options).unwrap_err();
        assert!(err.contains("spiral"));
    }

    #[test]
    fn rejects_unknown_theme() {
        let options: LayoutOptions = serde_json::from_str(r#"{ "theme": "neon" }"#).unwrap();
        let err = layout_forest("[]", &options).unwrap_err();
        assert_eq!(err, "unknown theme `neon`");
    }

    #[test]
    fn known_theme_supplies_connector_style() {
        let options: LayoutOptions = serde_json::from_str(r#"{ "theme": "blueprint" }"#).unwrap();
        let (_, config) = build_layout_config(&options).unwrap();
        assert_eq!(config.connector_style, Some(treeslide::ConnectorStyle::Orthogonal));
    }
}
