/// Benchmarks for the layout passes and pointer hit tests.
/// Uses a synthetic payload large enough to make reconciling noticeable.
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gitviz::plotting::scene::Scene;
use gitviz::plotting::{rhythm, timeline, ScaleRegistry};
use gitviz::types::RhythmKind;
use gitviz::{Chart, ChartConfig, Dataset, TopView, ViewId};
use serde_json::json;

/// Build a payload with `authors` authors committing `per_author` times each
fn synthetic_dataset(authors: usize, per_author: usize) -> Dataset {
    let mut commits = Vec::new();
    let mut author_list = Vec::new();
    for a in 0..authors {
        let email = format!("dev{}@example.com", a);
        let mut indices = Vec::new();
        for c in 0..per_author {
            indices.push(commits.len());
            let day = ((a * 7 + c * 3) % 365) as u32 + 1;
            let hour = (a + c * 5) % 24;
            let date = chrono::NaiveDate::from_yo_opt(2021, day).unwrap();
            commits.push(json!({
                "email": email,
                "name": format!("Developer {}", a),
                "time": format!("{}T{:02}:00:00Z", date.format("%Y-%m-%d"), hour),
                "message": format!("Change {}", c),
                "insertions": (c * 13) % 400,
                "deletions": (c * 7) % 150,
            }));
        }
        author_list.push(json!({
            "name": format!("Developer {}", a),
            "email": email,
            "commits": indices,
        }));
    }
    let files: Vec<_> = (0..10)
        .map(|f| {
            json!({
                "file": format!("src/module_{}.rs", f),
                "authors": [{"name": "Developer 0", "email": "dev0@example.com"}],
                "commits": (0..commits.len()).step_by(10 + f).map(|i| json!({
                    "commit_index": i, "insertions": 10, "deletions": 2
                })).collect::<Vec<_>>()
            })
        })
        .collect();
    let payload = json!({
        "authors": author_list,
        "commits": commits,
        "time_extent": ["2021-01-01T00:00:00Z", "2022-01-01T00:00:00Z"],
        "line_stats": {"min": 0, "max": 400, "percentile_value": 120},
        "files_with_max_commits": files,
        "filestats_line_stats": {"min": 0, "max": 10, "percentile_value": 8}
    });
    Dataset::from_json_str(&payload.to_string()).unwrap()
}

/// Benchmark the individual layout passes
fn bench_layouts(c: &mut Criterion) {
    let dataset = synthetic_dataset(12, 400);
    let config = ChartConfig::without_transitions();
    let extent = dataset.commits_view_extent().unwrap();
    let scales = ScaleRegistry::for_commits(&dataset, extent, &config);

    let mut group = c.benchmark_group("layout");
    group.sample_size(20);

    group.bench_function("timeline_fresh", |b| {
        b.iter(|| {
            let mut scene = Scene::new();
            timeline::render(&mut scene, black_box(&dataset), &scales, &config);
            scene
        })
    });

    group.bench_function("timeline_to_rhythm", |b| {
        let mut base = Scene::new();
        timeline::render(&mut base, &dataset, &scales, &config);
        b.iter(|| {
            let mut scene = base.clone();
            rhythm::render(
                &mut scene,
                black_box(&dataset),
                &scales,
                &config,
                RhythmKind::DayOfWeek,
            );
            scene
        })
    });

    group.finish();
}

/// Benchmark view switching and pointer routing through the chart
fn bench_interaction(c: &mut Criterion) {
    let dataset = synthetic_dataset(12, 400);
    let mut group = c.benchmark_group("interaction");
    group.sample_size(20);

    group.bench_function("switch_views", |b| {
        let mut chart = Chart::new(dataset.clone(), ChartConfig::without_transitions());
        b.iter(|| {
            chart.select(ViewId::RhythmHour);
            chart.select_top(TopView::Files);
            chart.select(ViewId::Timeline);
        })
    });

    group.bench_function("timeline_pointer_sweep", |b| {
        let mut chart = Chart::new(dataset.clone(), ChartConfig::without_transitions());
        b.iter(|| {
            for x in (0..1080).step_by(7) {
                chart.pointer_move(black_box((x as f64, 300.0)));
            }
            chart.pointer_leave(None);
        })
    });

    group.finish();
}

criterion_group!(benches, bench_layouts, bench_interaction);
criterion_main!(benches);
