use crate::config::LayoutConfig;

/// Escaped line break as editors store it inside node text.
pub const LINE_BREAK_MARKER: &str = "\\n";

pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .flat_map(|line| line.split(LINE_BREAK_MARKER))
        .collect()
}

pub fn line_count(text: &str) -> usize {
    1 + text.matches(LINE_BREAK_MARKER).count() + text.matches('\n').count()
}

pub fn first_line(text: &str) -> &str {
    split_lines(text).first().copied().unwrap_or_default()
}

/// Box size for a node's text. Width is fixed; height grows with the line count.
pub fn node_size(text: &str, config: &LayoutConfig) -> (f32, f32) {
    let lines = line_count(text) as f32;
    let height = config
        .base_node_height
        .max(config.text_padding + lines * config.line_height);
    (config.node_width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_lines_handles_markers_and_newlines() {
        assert_eq!(split_lines("a\\nb"), vec!["a", "b"]);
        assert_eq!(split_lines("a\nb\\nc"), vec!["a", "b", "c"]);
        assert_eq!(split_lines(""), vec![""]);
    }

    #[test]
    fn first_line_stops_at_marker() {
        assert_eq!(first_line("Data layer\\nsensors"), "Data layer");
        assert_eq!(first_line(""), "");
    }

    #[test]
    fn short_text_uses_base_height() {
        let config = LayoutConfig::default();
        assert_eq!(node_size("one", &config), (280.0, 120.0));
        // two lines: 40 + 64 = 104 stays under the base height
        assert_eq!(node_size("a\\nb", &config).1, 120.0);
    }

    #[test]
    fn height_grows_with_line_breaks() {
        let config = LayoutConfig::default();
        // three markers -> four lines
        assert_eq!(node_size("a\\nb\\nc\\nd", &config).1, 40.0 + 4.0 * 32.0);
        let mut tall = config.clone();
        tall.base_node_height = 400.0;
        assert_eq!(node_size("a\\nb\\nc\\nd", &tall).1, 400.0);
    }
}
