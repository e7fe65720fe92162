//! Replay recorded events against a scene, frame by frame.

use std::path::PathBuf;

use floatfx_common::clock::FrameClock;
use floatfx_common::config::AppConfig;
use floatfx_core::HeadlessSurface;
use floatfx_driver::backends::ReplayBackend;
use floatfx_driver::{FloatLoop, LoopSummary};
use floatfx_scene_model::Scene;

pub fn run(
    scene_path: PathBuf,
    events_path: PathBuf,
    frames: u64,
    output: Option<PathBuf>,
    config: AppConfig,
) -> anyhow::Result<()> {
    let scene =
        Scene::load(&scene_path).map_err(|e| anyhow::anyhow!("Failed to load scene: {e}"))?;
    let backend = ReplayBackend::from_file(&events_path)?;
    let fps = config.frames.fps;

    println!("Simulating {frames} frames at {fps} fps");
    println!("  Scene: {}", scene_path.display());
    println!("  Events: {} ({} queued)", events_path.display(), backend.remaining());

    let mut floop = FloatLoop::new(
        config.float,
        HeadlessSurface::new(scene),
        Box::new(backend),
        fps,
    )?;

    if let Some(path) = &output {
        floop.record_to(path.clone())?;
        println!("  Output: {}", path.display());
    }

    let summary = floop.run_frames(frames)?;
    print_summary(&summary, frames, fps);

    if summary.frames_rendered == 0 {
        println!("\nNo frames rendered. Does the event file contain a document_ready event?");
        return Ok(());
    }

    println!("\nFinal transforms:");
    for t in floop.engine().transforms() {
        println!("  {:<20} {}", t.id, t.transform);
    }

    Ok(())
}

fn print_summary(summary: &LoopSummary, frames: u64, fps: u32) {
    let interval_ns = floatfx_common::clock::frame_interval_ns(fps);
    let span = FrameClock::ns_to_secs(frames.saturating_sub(1) * interval_ns);
    println!();
    println!("  Timeline: {span:.3}s");
    println!("  Ticks: {}", summary.ticks);
    println!("  Frames rendered: {}", summary.frames_rendered);
    println!(
        "  Events: {} applied, {} ignored",
        summary.events_applied, summary.events_ignored
    );
}
