use crate::layout::{Bounds, ConnectorLayout, GroupLayout, Layout, NodeLayout, RadialGeometry};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// The document handed to renderers and export encoders.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump<'a> {
    pub orientation: String,
    pub width: f32,
    pub height: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radial: Option<RadialGeometry>,
    pub nodes: &'a [NodeLayout],
    pub connectors: &'a [ConnectorLayout],
    pub groups: &'a [GroupLayout],
}

impl<'a> LayoutDump<'a> {
    pub fn from_layout(layout: &'a Layout) -> Self {
        let bounds = layout.bounds();
        LayoutDump {
            orientation: format!("{:?}", layout.orientation).to_lowercase(),
            width: bounds.map(|b| b.max_x.max(0.0)).unwrap_or(0.0),
            height: bounds.map(|b| b.max_y.max(0.0)).unwrap_or(0.0),
            bounds,
            radial: layout.radial,
            nodes: &layout.nodes,
            connectors: &layout.connectors,
            groups: &layout.groups,
        }
    }
}

pub fn layout_to_json(layout: &Layout, pretty: bool) -> serde_json::Result<String> {
    let dump = LayoutDump::from_layout(layout);
    if pretty {
        serde_json::to_string_pretty(&dump)
    } else {
        serde_json::to_string(&dump)
    }
}

pub fn write_layout_dump(path: Option<&Path>, layout: &Layout, pretty: bool) -> anyhow::Result<()> {
    let json = layout_to_json(layout, pretty)?;
    match path {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            writer.write_all(json.as_bytes())?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        None => println!("{json}"),
    }
    Ok(())
}
