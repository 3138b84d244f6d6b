//! Runs with progress logging enabled under a real subscriber.

use tracing_subscriber::EnvFilter;
use zeno_engine::{run_scene, NullSink, SceneRegistry, SimConfig, Sinks};
use zeno_test_utils::RecordingMetricsSink;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("zeno_engine=debug"))
        .with_test_writer()
        .try_init();
}

#[test]
fn rti_run_with_progress_lines() {
    init_tracing();
    let config = SimConfig {
        grid_size: 16,
        total_steps: 20,
        progress_interval: 5,
        show_progress: true,
        seed: 1,
        ..SimConfig::default()
    };
    let mut metrics = RecordingMetricsSink::new();
    let summary = run_scene(
        config,
        &SceneRegistry::standard(),
        NullSink,
        &mut Sinks::new().metrics(&mut metrics),
    )
    .unwrap();

    assert_eq!(summary.steps, 20);
    assert_eq!(summary.variant.name(), "pgns");
    let records = metrics.last().unwrap();
    assert_eq!(records.len(), 20);
    // The first step's terms come from the seeded initial field.
    assert!(records[0].curvature_energy > 0.0);
    assert!(summary.to_string().starts_with("pgns: 20 steps"));
}

#[test]
fn pulse_3d_never_renders_but_still_records() {
    init_tracing();
    let config = SimConfig {
        dimension: 3,
        grid_size: 6,
        total_steps: 3,
        scene: "Pulse_3D".into(),
        operator: "rehte".into(),
        ..SimConfig::default()
    };
    let mut frames = zeno_engine::FrameCollector::new();
    let summary = run_scene(config, &SceneRegistry::standard(), &mut frames, &mut Sinks::new())
        .unwrap();
    assert!(frames.is_empty());
    assert_eq!(summary.last.map(|r| r.step), Some(3));
}
