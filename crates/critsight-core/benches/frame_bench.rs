use criterion::{black_box, criterion_group, criterion_main, Criterion};
use critsight_core::entity::{MovementFlags, TargetEntity, Viewer};
use critsight_core::hud::{DrawList, ReticleHook};
use critsight_core::resolver::ReadinessClassifier;
use critsight_core::scene::Scene;
use critsight_core::world_view::WorldView;
use glam::DVec3;

/// A falling player surrounded by a ring of mobs, one of them in front.
fn crowded_scene(ring: usize) -> Scene {
    let mut viewer = Viewer::standing_at(DVec3::ZERO, DVec3::Z);
    viewer.movement = MovementFlags::empty();
    viewer.velocity.y = -0.3;

    let mut scene = Scene::new();
    scene.set_viewer(viewer);
    scene.spawn(TargetEntity::mob(DVec3::new(0.0, 0.0, 2.0), 0.6, 1.95));
    for i in 0..ring {
        let angle = i as f64 / ring as f64 * std::f64::consts::TAU;
        let feet = DVec3::new(angle.cos() * 2.5, 0.0, angle.sin() * 2.5);
        scene.spawn(TargetEntity::mob(feet, 0.6, 1.95));
    }
    scene
}

fn bench_classify(c: &mut Criterion) {
    let scene = crowded_scene(8);
    let classifier = ReadinessClassifier::new();

    c.bench_function("classify", |b| {
        b.iter(|| classifier.classify(black_box(WorldView::new(&scene))))
    });
}

fn bench_render_frame(c: &mut Criterion) {
    let scene = crowded_scene(8);
    let hook = ReticleHook::default();
    let mut painter = DrawList::new();

    c.bench_function("render_frame", |b| {
        b.iter(|| {
            painter.clear();
            hook.on_render_reticle(black_box(WorldView::new(&scene)), &mut painter, 854, 480)
        })
    });
}

fn bench_render_frame_crowded(c: &mut Criterion) {
    // Many nearby entities all inside the search volume
    let scene = crowded_scene(64);
    let hook = ReticleHook::default();
    let mut painter = DrawList::new();

    c.bench_function("render_frame_crowded", |b| {
        b.iter(|| {
            painter.clear();
            hook.on_render_reticle(black_box(WorldView::new(&scene)), &mut painter, 854, 480)
        })
    });
}

criterion_group!(benches, bench_classify, bench_render_frame, bench_render_frame_crowded);
criterion_main!(benches);
