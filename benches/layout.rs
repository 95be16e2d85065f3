use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use treeslide::config::LayoutConfig;
use treeslide::ir::{Node, Orientation, parse_forest};
use treeslide::layout::compute_layout;

/// A tree where every non-leaf node has `fanout` children.
fn wide_forest(fanout: usize, depth: usize) -> Vec<Node> {
    fn build(prefix: String, fanout: usize, depth: usize) -> Node {
        let mut node = Node::new(prefix.clone(), format!("Node {prefix}"));
        if depth > 0 {
            node.children = (0..fanout)
                .map(|i| build(format!("{prefix}.{i}"), fanout, depth - 1))
                .collect();
        }
        node
    }
    vec![build("r".to_string(), fanout, depth)]
}

/// A single chain, deep enough that recursive passes would be at risk.
fn deep_forest(length: usize) -> Vec<Node> {
    let mut node = Node::new(format!("n{length}"), "Leaf");
    for i in (0..length).rev() {
        node = Node::new(format!("n{i}"), format!("Step {i}\\ndetail")).with_children(vec![node]);
    }
    vec![node]
}

fn bench_orientations(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_orientations");
    let config = LayoutConfig::default();
    let forest = wide_forest(4, 4);
    for orientation in [
        Orientation::Vertical,
        Orientation::Horizontal,
        Orientation::Circular,
        Orientation::Elliptical,
        Orientation::Cycle,
    ] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{orientation:?}").to_lowercase()),
            &forest,
            |b, forest| {
                b.iter(|| {
                    let layout = compute_layout(black_box(forest), orientation, &config)
                        .expect("layout failed");
                    black_box(layout.nodes.len());
                });
            },
        );
    }
    group.finish();
}

fn bench_forest_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_forest_shapes");
    let mut config = LayoutConfig::default();
    config.show_zones = true;
    let shapes = [
        ("wide_8x3", wide_forest(8, 3)),
        ("wide_3x7", wide_forest(3, 7)),
        ("deep_500", deep_forest(500)),
    ];
    for (name, forest) in &shapes {
        group.bench_with_input(BenchmarkId::from_parameter(name), forest, |b, forest| {
            b.iter(|| {
                let layout = compute_layout(black_box(forest), Orientation::Vertical, &config)
                    .expect("layout failed");
                black_box(layout.groups.len());
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let input = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/system_overview.json"
    ));
    let config = LayoutConfig::default();
    c.bench_function("parse_and_layout_fixture", |b| {
        b.iter(|| {
            let forest = parse_forest(black_box(input)).expect("parse failed");
            let layout =
                compute_layout(&forest, Orientation::Vertical, &config).expect("layout failed");
            black_box(layout.connectors.len());
        });
    });
}

criterion_group!(
    benches,
    bench_orientations,
    bench_forest_shapes,
    bench_end_to_end
);
criterion_main!(benches);
