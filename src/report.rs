use std::path::PathBuf;

use anyhow::Result;

use crate::config::ReportConfig;
use crate::data::loader::load_groups;
use crate::render::chart::{render_group, ChartStyle};

// ---------------------------------------------------------------------------
// Report run
// ---------------------------------------------------------------------------

/// Load the input once, then render every group in slot order.
///
/// The first failing group aborts the run; charts written before it stay on
/// disk. Returns the paths written, in group order.
pub fn run(config: &ReportConfig) -> Result<Vec<PathBuf>> {
    let slots = config.slots()?;
    let samples = load_groups(&config.input, &slots, config.group_size)?;

    let style = ChartStyle {
        width: config.width,
        height: config.height,
        x_label: &config.x_label,
        y_label: &config.y_label,
    };

    let mut written = Vec::with_capacity(samples.groups.len());
    for group in &samples.groups {
        let path = render_group(group, &style, &config.output_dir)?;
        log::info!("Wrote {} ({} samples)", path.display(), group.len());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn config_in(dir: &Path) -> ReportConfig {
        ReportConfig {
            input: dir.join("data.txt"),
            output_dir: dir.to_path_buf(),
            ..ReportConfig::default()
        }
    }

    fn write_input(dir: &Path, lines: usize) {
        let text: String = (0..lines)
            .map(|i| format!("{:.6}\n", 0.00001 * (i % 13) as f64))
            .collect();
        std::fs::write(dir.join("data.txt"), text).unwrap();
    }

    fn chart_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|n| n.ends_with(".png"))
            .collect();
        names.sort();
        names
    }

    #[test]
    fn full_input_writes_six_charts() {
        let dir = tempfile::tempdir().unwrap();
        write_input(dir.path(), 600);

        let written = run(&config_in(dir.path())).unwrap();
        assert_eq!(written.len(), 6);
        assert_eq!(
            chart_names(dir.path()),
            vec![
                "graph_A.png",
                "graph_B.png",
                "graph_C.png",
                "graph_D.png",
                "graph_E.png",
                "graph_F.png",
            ]
        );
    }

    #[test]
    fn rerun_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        write_input(dir.path(), 600);
        let config = config_in(dir.path());

        run(&config).unwrap();
        let first = std::fs::read(dir.path().join("graph_C.png")).unwrap();
        run(&config).unwrap();
        let second = std::fs::read(dir.path().join("graph_C.png")).unwrap();
        assert!(first == second, "chart bytes changed between runs");
    }

    #[test]
    fn rerun_replaces_stale_charts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("graph_A.png"), b"stale").unwrap();
        write_input(dir.path(), 600);

        run(&config_in(dir.path())).unwrap();
        let img = image::open(dir.path().join("graph_A.png")).unwrap();
        assert_eq!((img.width(), img.height()), (640, 480));
    }

    #[test]
    fn short_input_stops_at_first_empty_group() {
        let dir = tempfile::tempdir().unwrap();
        write_input(dir.path(), 250);

        let err = run(&config_in(dir.path())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::EmptyGroup { label }) if label == "D"
        ));
        assert_eq!(
            chart_names(dir.path()),
            vec!["graph_A.png", "graph_B.png", "graph_C.png"]
        );
    }

    #[test]
    fn parse_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut text: String = (0..600).map(|i| format!("{i}\n")).collect();
        text.replace_range(0..1, "abc");
        std::fs::write(dir.path().join("data.txt"), text).unwrap();

        let err = run(&config_in(dir.path())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::Parse { line: 1, .. })
        ));
        assert!(chart_names(dir.path()).is_empty());
    }

    #[test]
    fn missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&config_in(dir.path())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::InputMissing { .. })
        ));
        assert!(chart_names(dir.path()).is_empty());
    }

    #[test]
    fn configured_layout_changes_group_count() {
        let dir = tempfile::tempdir().unwrap();
        write_input(dir.path(), 30);
        let config = ReportConfig {
            group_size: 10,
            groups: serde_json::from_str(
                r#"[{ "label": "x" }, { "label": "y" }, { "label": "z", "color": "k" }]"#,
            )
            .unwrap(),
            ..config_in(dir.path())
        };

        let written = run(&config).unwrap();
        assert_eq!(written.len(), 3);
        assert_eq!(
            chart_names(dir.path()),
            vec!["graph_x.png", "graph_y.png", "graph_z.png"]
        );
    }
}
