//! Run the float loop in real time.

use std::path::PathBuf;

use floatfx_common::config::AppConfig;
use floatfx_core::HeadlessSurface;
use floatfx_driver::backends::ReplayBackend;
use floatfx_driver::FloatLoop;
use floatfx_scene_model::{InputEvent, Scene};

pub async fn run(
    scene_path: PathBuf,
    events_path: Option<PathBuf>,
    output: Option<PathBuf>,
    config: AppConfig,
) -> anyhow::Result<()> {
    let scene =
        Scene::load(&scene_path).map_err(|e| anyhow::anyhow!("Failed to load scene: {e}"))?;

    // Without an event file the document is ready immediately.
    let backend = match &events_path {
        Some(path) => ReplayBackend::from_file(path)?,
        None => ReplayBackend::new(vec![InputEvent::ready(0)]),
    };

    let fps = config.frames.fps;
    let mut floop = FloatLoop::new(
        config.float,
        HeadlessSurface::new(scene),
        Box::new(backend),
        fps,
    )?;
    if let Some(path) = output {
        floop.record_to(path)?;
    }

    println!("Running float loop at {fps} fps: {}", scene_path.display());
    println!("Press Ctrl+C to stop...");

    let stop = floop.stop_handle();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => stop.stop(),
            Err(e) => tracing::warn!(error = %e, "Failed to listen for Ctrl+C"),
        }
    });

    let summary = floop.run().await?;

    println!();
    println!(
        "Stopped after {} frames ({} events applied).",
        summary.frames_rendered, summary.events_applied
    );
    for t in floop.engine().transforms() {
        println!("  {:<20} {}", t.id, t.transform);
    }

    Ok(())
}
