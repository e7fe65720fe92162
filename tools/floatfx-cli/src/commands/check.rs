//! List the elements a scene would track.

use std::path::PathBuf;

use floatfx_common::config::AppConfig;
use floatfx_core::normalize::{normalize_deceleration, normalize_strength};
use floatfx_core::{FloatEngine, HeadlessSurface};
use floatfx_scene_model::Scene;

pub fn run(scene_path: PathBuf, config: AppConfig) -> anyhow::Result<()> {
    let scene =
        Scene::load(&scene_path).map_err(|e| anyhow::anyhow!("Failed to load scene: {e}"))?;
    let options = config.float;

    println!("floatfx scene check: {}", scene_path.display());
    println!("{}", "=".repeat(50));
    println!("Viewport: {}x{}", scene.viewport.width, scene.viewport.height);
    println!("Attribute: {}", options.attribute);
    println!(
        "Deceleration: {} (normalized {:.4})",
        options.deceleration,
        normalize_deceleration(options.deceleration)
    );
    println!(
        "Strength: {}  Direction: {}  Precision: {}",
        options.strength, options.direction, options.precision
    );
    println!();

    let untracked = scene.elements.len() - scene.marked(&options.attribute).count();
    let surface = HeadlessSurface::new(scene);
    let engine = FloatEngine::attach(options.clone(), &surface)
        .map_err(|e| anyhow::anyhow!("Scene rejected: {e}"))?;

    let mut broken = 0;
    for element in engine.elements() {
        let marker = element.marker.as_deref().unwrap_or("<none>");
        if element.has_numeric_marker() {
            println!(
                "[OK]   {:<20} marker={:<8} strength={:.4}",
                element.id,
                marker,
                normalize_strength(element.raw_strength, options.strength)
            );
        } else {
            broken += 1;
            println!(
                "[WARN] {:<20} marker={:<8} not a number; offset will be NaN",
                element.id, marker
            );
        }
    }

    println!();
    println!(
        "{} tracked, {} untracked, {} with non-numeric markers.",
        engine.elements().len(),
        untracked,
        broken
    );

    Ok(())
}
