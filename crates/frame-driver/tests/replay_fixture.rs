use std::path::PathBuf;
use std::time::Duration;

use floatfx_common::config::FloatOptions;
use floatfx_core::{HeadlessSurface, Lifecycle, OrientationSupport};
use floatfx_driver::backends::{ChannelBackend, ReplayBackend};
use floatfx_driver::FloatLoop;
use floatfx_scene_model::{InputEvent, Scene};

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("sample-scene")
}

fn fixture_loop() -> FloatLoop<HeadlessSurface> {
    let dir = fixture_dir();
    let scene = Scene::load(dir.join("scene.json")).expect("fixture scene should load");
    let backend =
        ReplayBackend::from_file(&dir.join("events.jsonl")).expect("fixture events should load");
    FloatLoop::new(
        FloatOptions::default(),
        HeadlessSurface::new(scene),
        Box::new(backend),
        60,
    )
    .expect("loop should build")
}

#[test]
fn fixture_replay_counts() {
    let mut floop = fixture_loop();
    let summary = floop.run_frames(120).unwrap();

    assert_eq!(summary.ticks, 120);
    assert_eq!(summary.frames_rendered, 120);
    // probe, ready, pointer, resize
    assert_eq!(summary.events_applied, 4);
    // motion after a null probe
    assert_eq!(summary.events_ignored, 1);
    assert!(floop.input_exhausted());
    assert_eq!(floop.state().orientation(), OrientationSupport::Unsupported);
    assert_eq!(floop.state().lifecycle(), Lifecycle::Running);
}

#[test]
fn fixture_offsets_follow_resized_center() {
    let mut floop = fixture_loop();
    floop.run_frames(120).unwrap();

    let ids: Vec<&str> = floop
        .engine()
        .elements()
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(ids, vec!["background", "midground", "foreground", "ghost"]);

    let background = floop.engine().offset(0).unwrap();
    let foreground = floop.engine().offset(2).unwrap();

    // Target after the resize: (1280 - 960) * -1 * (2 * 0.2) = -128.
    assert!(foreground.x < -128.0 && foreground.x > -135.0, "{}", foreground.x);
    assert!(foreground.y.abs() < 1e-9);

    // Offsets scale linearly with the marker value.
    assert!((foreground.x / background.x - 4.0).abs() < 1e-9);
}

#[test]
fn fixture_transforms_on_surface() {
    let mut floop = fixture_loop();
    floop.run_frames(120).unwrap();

    let surface = floop.surface();
    assert_eq!(
        surface.transform("ghost"),
        Some("translate3d(NaNpx, NaNpx, 0)")
    );
    assert_eq!(surface.transform("caption"), None);

    let foreground = surface.transform("foreground").unwrap();
    assert!(foreground.starts_with("translate3d(-13"));
    assert!(foreground.ends_with("px, 0.00px, 0)"));
    assert_eq!(surface.writes(), 120 * 4);
}

#[test]
fn fixture_frames_are_recorded() {
    let out_dir = std::env::temp_dir().join("floatfx_test_fixture_frames");
    let _ = std::fs::remove_dir_all(&out_dir);
    let path = out_dir.join("frames.jsonl");

    {
        let mut floop = fixture_loop();
        floop.record_to(path.clone()).unwrap();
        floop.run_frames(30).unwrap();
    }

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 31);
    assert!(lines[0].starts_with("# "));

    let last: serde_json::Value = serde_json::from_str(lines[30]).unwrap();
    assert_eq!(last["frame"], 29);
    assert_eq!(last["transforms"].as_array().unwrap().len(), 4);

    std::fs::remove_dir_all(&out_dir).ok();
}

#[tokio::test]
async fn live_loop_renders_until_stopped() {
    let scene = Scene::load(fixture_dir().join("scene.json")).unwrap();
    let (sender, backend) = ChannelBackend::channel();
    let mut floop = FloatLoop::new(
        FloatOptions::default(),
        HeadlessSurface::new(scene),
        Box::new(backend),
        200,
    )
    .unwrap();

    sender.send(InputEvent::ready(0)).unwrap();
    sender.send(InputEvent::pointer(0, 1280.0, 360.0)).unwrap();

    let stop = floop.stop_handle();
    let stopper = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        stop.stop();
    });

    let summary = tokio::time::timeout(Duration::from_secs(5), floop.run())
        .await
        .expect("loop should stop within the timeout")
        .unwrap();
    stopper.await.unwrap();

    assert!(summary.frames_rendered >= 1);
    assert!(floop.engine().offset(2).unwrap().x < 0.0);
    assert_eq!(floop.state().lifecycle(), Lifecycle::Stopped);
    assert!(sender.send(InputEvent::ready(0)).is_ok());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn live_loop_survives_extreme_frame_rate() {
    let scene = Scene::load(fixture_dir().join("scene.json")).unwrap();
    let backend = ReplayBackend::new(vec![InputEvent::ready(0)]);
    let mut floop = FloatLoop::new(
        FloatOptions::default(),
        HeadlessSurface::new(scene),
        Box::new(backend),
        2_000_000_000,
    )
    .unwrap();

    let stop = floop.stop_handle();
    let stopper = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        stop.stop();
    });

    let summary = tokio::time::timeout(Duration::from_secs(5), floop.run())
        .await
        .expect("loop should stop within the timeout")
        .unwrap();
    stopper.await.unwrap();

    assert!(summary.ticks >= 1);
    assert_eq!(floop.state().lifecycle(), Lifecycle::Stopped);
}
