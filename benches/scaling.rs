use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use egui_text_scaling::{
    Settings, SettingsStyle, SimpleScene, StyleCatalog, StyledNode, StylesheetBacking,
    TextScaling, DEFAULT_CLASS_PREFIX,
};
use std::cell::RefCell;
use std::hint::black_box;
use std::rc::Rc;
use std::time::Duration;

fn make_session(num_scenes: usize) -> (TextScaling, Vec<Rc<RefCell<SimpleScene>>>) {
    let style = SettingsStyle::default().with_backing(StylesheetBacking::InMemory);
    let mut scaling = TextScaling::new(&Settings::default().with_style(style)).unwrap();
    let scenes: Vec<_> = (0..num_scenes)
        .map(|i| {
            Rc::new(RefCell::new(SimpleScene::new(Some(StyledNode::new(
                format!("scene-{i}"),
            )))))
        })
        .collect();
    for scene in &scenes {
        scaling.init_scene(scene);
    }
    (scaling, scenes)
}

fn bench_stylesheet(c: &mut Criterion) {
    let catalog = StyleCatalog::new(DEFAULT_CLASS_PREFIX);
    c.bench_function("stylesheet_generate", |b| {
        b.iter(|| black_box(catalog.stylesheet()));
    });
}

fn bench_scale_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("scale_churn");
    group.sample_size(20);
    group.measurement_time(Duration::from_millis(800));
    group.warm_up_time(Duration::from_millis(200));

    group.bench_function("scenes1_steps1000", |b| {
        b.iter_batched(
            || make_session(1),
            |(scaling, scenes)| {
                // sweep up to the maximum and back down
                for i in 0..1000 {
                    if (i / 40) % 2 == 0 {
                        scaling.controller().scale_up();
                    } else {
                        scaling.controller().scale_down();
                    }
                }
                black_box(scenes);
                black_box(scaling);
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("scenes50_set_current100", |b| {
        b.iter_batched(
            || make_session(50),
            |(scaling, scenes)| {
                for size in 0..100 {
                    scaling.scale().set_current(size % 45);
                }
                black_box(scenes);
                black_box(scaling);
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default().configure_from_args();
    targets = bench_stylesheet, bench_scale_churn
}
criterion_main!(benches);
