use gitviz::plotting::scene::{ElementKey, Layer, Shape};
use gitviz::plotting::{render_png, tooltip_visible};
use gitviz::types::DataIssue;
use gitviz::{load_dataset_async, Chart, ChartConfig, Dataset, TopView, ViewId, VizError};
use serde_json::json;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_single_commit_timeline() {
    let payload = json!({
        "authors": [{
            "email": "a@x",
            "commits": [{"time": "2020-01-01T10:00:00Z", "insertions": 10, "deletions": 2}]
        }],
        "time_extent": ["2020-01-01", "2020-01-02"],
        "line_stats": {"min": 0, "max": 10, "percentile_value": 10}
    });
    let dataset = Dataset::from_json_str(&payload.to_string()).unwrap();
    let chart = Chart::new(dataset, ChartConfig::without_transitions());

    let commits: Vec<_> = chart.scene().layer(Layer::Commits).collect();
    assert_eq!(commits.len(), 1);
    let (key, element) = commits[0];
    assert_eq!(key, &ElementKey::Commit(0));

    let scales = chart.context().scales.as_ref().unwrap();
    let (r0, r1) = scales.time.range();
    // ten hours into a one-day extent
    let expected_x = r0 + (r1 - r0) * 10.0 / 24.0;
    assert!((element.transform.translate.0 - expected_x).abs() < 1e-6);
    assert_eq!(element.transform.translate.1, scales.rows.position(0));

    let bandwidth = scales.rows.bandwidth();
    match &element.shape {
        Shape::Commit {
            insertion,
            deletion,
            ..
        } => {
            assert_eq!(insertion.height, bandwidth / 2.0);
            assert_eq!(insertion.color, scales.insertions.base());
            assert_eq!(deletion.color, scales.deletions.base());
            assert!(deletion.height < insertion.height);
        }
        other => panic!("unexpected shape {:?}", other),
    }
}

#[test]
fn test_load_fixture_and_walk_views() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let dataset = rt.block_on(load_dataset_async(fixture("sample.json"))).unwrap();

    assert_eq!(dataset.authors().len(), 3);
    assert_eq!(dataset.commits().count(), 4);
    assert_eq!(
        dataset.issues(),
        &[DataIssue::CommitIndexOutOfRange {
            file: "src/parser.rs".to_string(),
            index: 7
        }]
    );
    // the alias resolves to Bob's row
    let bob_commit = dataset.commit(1).unwrap();
    assert_eq!(dataset.email_for_commit(bob_commit), Some("b@x"));

    let mut chart = Chart::new(dataset, ChartConfig::without_transitions());
    assert_eq!(chart.scene().count(Layer::Commits), 4);

    assert!(chart.select(ViewId::RhythmHour));
    assert_eq!(chart.scene().count(Layer::Markers), 3 * 8);

    assert!(chart.select_top(TopView::Files));
    assert_eq!(chart.scene().count(Layer::Commits), 2);
    assert_eq!(chart.scene().count(Layer::Markers), 0);
    assert_eq!(chart.scene().count(Layer::TopAuthors), 2);

    // hovering the only file row focuses it and shows the nearest commit
    let scales = chart.context().scales.as_ref().unwrap();
    let x = scales.time.apply(chart.context().dataset.commit(1).unwrap().utc());
    let y = scales.rows.position(0) + 10.0;
    chart.pointer_move((x, y));
    assert!(tooltip_visible(chart.scene()));

    chart.pointer_leave(Some((x, -100.0)));
    assert!(!tooltip_visible(chart.scene()));
}

#[tokio::test]
async fn test_missing_payload_reports_path() {
    let result = load_dataset_async(fixture("missing.json")).await;
    match result {
        Err(VizError::Io { path, .. }) => assert!(path.ends_with("missing.json")),
        other => panic!("expected an io error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_malformed_payload_is_rejected() {
    let result = Dataset::from_json_str("{\"authors\": 3}");
    assert!(matches!(result, Err(VizError::Json(_))));
}

#[test]
fn test_config_file_overrides_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("gitviz.toml");
    std::fs::write(&path, "transition_ms = 0\ncells_per_row = 4\n").unwrap();

    let config = ChartConfig::resolve(Some(&path)).unwrap();
    assert_eq!(config.transition_ms, 0);
    assert_eq!(config.cells_per_row, 4);
    assert_eq!(config.outer_width, ChartConfig::default().outer_width);

    let missing = temp_dir.path().join("nope.toml");
    assert!(matches!(
        ChartConfig::resolve(Some(&missing)),
        Err(VizError::Io { .. })
    ));
}

#[test]
fn test_snapshot_of_every_view() {
    let temp_dir = TempDir::new().unwrap();
    let rt = tokio::runtime::Runtime::new().unwrap();
    let dataset = rt.block_on(load_dataset_async(fixture("sample.json"))).unwrap();
    let config = ChartConfig::without_transitions();
    let mut chart = Chart::new(dataset, config.clone());

    for view in [
        ViewId::Timeline,
        ViewId::RhythmHour,
        ViewId::RhythmWeek,
        ViewId::MostCommits,
    ] {
        chart.select(view);
        let path = temp_dir.path().join(format!("{}.png", view.name()));
        render_png(chart.scene(), &config, &path).unwrap();

        let image = image::open(&path).unwrap();
        assert!(image.width() > config.width() as u32);
        assert!(image.height() > config.height() as u32);
    }
}
