//! Write a sample scene and event file.

use std::path::PathBuf;

use floatfx_scene_model::{serialize_events, InputEvent, Scene};

/// Pointer sweep used by the sample event file: ready, then the pointer
/// walks the four corners of a 1280x720 viewport every half second.
fn sample_events() -> Vec<InputEvent> {
    let second = 1_000_000_000u64;
    let mut events = vec![InputEvent::ready(0)];
    let corners = [(160.0, 90.0), (1120.0, 90.0), (1120.0, 630.0), (160.0, 630.0)];
    for (i, (x, y)) in corners.iter().enumerate() {
        events.push(InputEvent::pointer((i as u64 + 1) * second / 2, *x, *y));
    }
    events.push(InputEvent::pointer(3 * second, 640.0, 360.0));
    events
}

pub fn run(output: PathBuf) -> anyhow::Result<()> {
    std::fs::create_dir_all(&output)?;

    let scene_path = output.join("scene.json");
    let events_path = output.join("events.jsonl");

    Scene::sample()
        .save(&scene_path)
        .map_err(|e| anyhow::anyhow!("Failed to write scene: {e}"))?;

    let mut jsonl = String::from("# floatfx sample events\n");
    jsonl.push_str(&serialize_events(&sample_events())?);
    std::fs::write(&events_path, jsonl)?;

    println!("Sample written to {}", output.display());
    println!("  {}", scene_path.display());
    println!("  {}", events_path.display());
    println!();
    println!("Try:");
    println!(
        "  floatfx simulate {} --events {}",
        scene_path.display(),
        events_path.display()
    );

    Ok(())
}
