//! Benchmarks for the filter pass and a full render cycle.
//!
//! Run with: cargo bench -p vista-core
//! Results are saved to target/criterion/

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use serde_json::{Value, json};
use vista_core::config::Config;
use vista_core::search::{FilterOptions, FuzzyScorer, filter_sections};
use vista_core::{Child, ListItem, Notification, Section, ViewSession, parse};

const NAMES: [(&str, &str, &[&str]); 8] = [
    ("firefox", "Firefox", &["browser", "web"]),
    ("vscode", "Visual Studio Code", &["editor", "ide"]),
    ("terminal", "Terminal", &["console", "shell"]),
    ("files", "Files", &["file manager"]),
    ("spotify", "Spotify", &["music", "audio"]),
    ("gimp", "GIMP", &["image", "graphics"]),
    ("obs", "OBS Studio", &["recording", "video"]),
    ("steam", "Steam", &["games"]),
];

fn generate_children(count: usize, per_section: usize) -> Vec<Child<ListItem>> {
    let items: Vec<ListItem> = (0..count)
        .map(|i| {
            let (id, title, keywords) = NAMES[i % NAMES.len()];
            ListItem {
                id: format!("{id}_{i}"),
                title: title.to_string(),
                subtitle: format!("Entry {i}"),
                keywords: keywords.iter().map(ToString::to_string).collect(),
                ..Default::default()
            }
        })
        .collect();

    items
        .chunks(per_section)
        .enumerate()
        .map(|(n, chunk)| {
            Child::Section(Section {
                title: format!("Section {n}"),
                children: chunk.to_vec(),
                ..Default::default()
            })
        })
        .collect()
}

fn list_document(count: usize) -> Value {
    let children: Vec<Value> = (0..count)
        .map(|i| {
            let (id, title, _) = NAMES[i % NAMES.len()];
            json!({"type": "list-item", "props": {"id": format!("{id}_{i}"), "title": title}})
        })
        .collect();
    json!({"type": "list", "props": {"onSelectionChange": "sel"}, "children": children})
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_sections");

    for count in [100, 1_000, 10_000] {
        let children = generate_children(count, 50);
        let mut scorer = FuzzyScorer::default();
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("query", count), &children, |b, children| {
            b.iter(|| {
                filter_sections(
                    black_box(children),
                    black_box("stu"),
                    &mut scorer,
                    FilterOptions::default(),
                )
            });
        });

        group.bench_with_input(BenchmarkId::new("no_query", count), &children, |b, children| {
            b.iter(|| {
                filter_sections(black_box(children), "", &mut scorer, FilterOptions::default())
            });
        });
    }

    group.finish();
}

fn bench_render_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_cycle");

    for count in [100, 1_000] {
        let document = list_document(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &document, |b, document| {
            let mut session = ViewSession::new(Config::default(), Vec::<Notification>::new());
            b.iter(|| {
                session.notifier_mut().clear();
                session.render(parse(black_box(document)))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filter, bench_render_cycle);
criterion_main!(benches);
