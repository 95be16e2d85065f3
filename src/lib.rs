#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RadialPlacement, ZoneOverride, load_config};
pub use ir::{ConnectorStyle, Node, Orientation, parse_forest};
pub use layout::{Layout, LayoutError, compute_layout};
pub use layout_dump::{LayoutDump, layout_to_json, write_layout_dump};
pub use theme::Theme;
