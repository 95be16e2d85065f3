use crate::config::{Config, load_config};
use crate::ir::{ConnectorStyle, Orientation, parse_forest};
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::theme::Theme;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{EnvFilter, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "treeslide",
    version,
    about = "Lay out a tree diagram and print its geometry as JSON"
)]
pub struct Args {
    /// Input forest (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Layout orientation
    #[arg(short = 'O', long = "orientation", value_enum)]
    pub orientation: Option<OrientationArg>,

    /// Config file (JSON5) with layout options and theme name
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Theme preset: default, dark or blueprint
    #[arg(short = 't', long = "theme")]
    pub theme: Option<String>,

    /// Connector style, overriding config and theme
    #[arg(long = "connectorStyle", value_enum)]
    pub connector_style: Option<ConnectorStyleArg>,

    /// Draw an overlay zone around every top-level subtree
    #[arg(long = "showZones")]
    pub show_zones: bool,

    /// Single-line JSON instead of pretty-printed
    #[arg(long = "compact")]
    pub compact: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OrientationArg {
    Vertical,
    Horizontal,
    Circular,
    Elliptical,
    Cycle,
}

impl From<OrientationArg> for Orientation {
    fn from(value: OrientationArg) -> Self {
        match value {
            OrientationArg::Vertical => Orientation::Vertical,
            OrientationArg::Horizontal => Orientation::Horizontal,
            OrientationArg::Circular => Orientation::Circular,
            OrientationArg::Elliptical => Orientation::Elliptical,
            OrientationArg::Cycle => Orientation::Cycle,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ConnectorStyleArg {
    Straight,
    Curved,
    Orthogonal,
}

impl From<ConnectorStyleArg> for ConnectorStyle {
    fn from(value: ConnectorStyleArg) -> Self {
        match value {
            ConnectorStyleArg::Straight => ConnectorStyle::Straight,
            ConnectorStyleArg::Curved => ConnectorStyle::Curved,
            ConnectorStyleArg::Orthogonal => ConnectorStyle::Orthogonal,
        }
    }
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = apply_args(load_config(args.config.as_deref())?, &args)?;

    let input = read_input(args.input.as_deref())?;
    let forest = parse_forest(&input)?;
    debug!(roots = forest.len(), orientation = ?config.orientation, "read forest");

    let layout = compute_layout(&forest, config.orientation, &config.resolved_layout())?;
    write_layout_dump(args.output.as_deref(), &layout, !args.compact)
}

fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init();
}

/// Command-line flags win over the config file.
fn apply_args(mut config: Config, args: &Args) -> Result<Config> {
    if let Some(name) = args.theme.as_deref() {
        config.theme =
            Theme::by_name(name).ok_or_else(|| anyhow::anyhow!("unknown theme `{name}`"))?;
    }
    if let Some(orientation) = args.orientation {
        config.orientation = orientation.into();
    }
    if let Some(style) = args.connector_style {
        config.layout.connector_style = Some(style.into());
    }
    if args.show_zones {
        config.layout.show_zones = true;
    }
    Ok(config)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config_file() {
        let args = Args::parse_from([
            "treeslide",
            "-O",
            "elliptical",
            "--theme",
            "blueprint",
            "--connectorStyle",
            "straight",
            "--showZones",
        ]);
        let config = apply_args(Config::default(), &args).unwrap();
        assert_eq!(config.orientation, Orientation::Elliptical);
        assert_eq!(config.theme.id, "blueprint");
        assert!(config.layout.show_zones);
        assert_eq!(
            config.resolved_layout().connector_style(),
            ConnectorStyle::Straight
        );
    }

    #[test]
    fn theme_supplies_connector_style() {
        let args = Args::parse_from(["treeslide", "--theme", "dark"]);
        let config = apply_args(Config::default(), &args).unwrap();
        assert_eq!(
            config.resolved_layout().connector_style(),
            ConnectorStyle::Curved
        );
    }

    #[test]
    fn unknown_theme_is_an_error() {
        let args = Args::parse_from(["treeslide", "--theme", "neon"]);
        assert!(apply_args(Config::default(), &args).is_err());
    }
}
