//! sim-recorder CLI - Render recorded scenes to video or GIF.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use sim_recorder::{
    demo::CircularRoad,
    recorder::FrameRecorder,
    schema::SceneFile,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--example" {
        print_example_scene();
        return;
    }

    if args.len() > 2 && args[1] == "--demo" {
        let steps: u32 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(300);
        let scene = CircularRoad::default().scene(steps, 6);
        render(&scene, PathBuf::from(&args[2]), scene.fps);
        return;
    }

    if args.len() < 3 {
        eprintln!("Usage: {} <scene.json> <output> [fps]", args[0]);
        eprintln!("       {} --demo <output> [steps]", args[0]);
        eprintln!("       {} --example", args[0]);
        eprintln!();
        eprintln!("Render per-step entity snapshots into a video or GIF.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  scene.json  Scene file (config + one entity list per step)");
        eprintln!("  output      Output path; .gif is encoded directly, anything");
        eprintln!("              else is handed to the configured video encoder");
        eprintln!("  fps         Frames per second (default: from scene file)");
        std::process::exit(1);
    }

    let scene_path = PathBuf::from(&args[1]);
    let scene_str = fs::read_to_string(&scene_path).unwrap_or_else(|e| {
        eprintln!("Error reading scene file: {}", e);
        std::process::exit(1);
    });
    let scene: SceneFile = serde_json::from_str(&scene_str).unwrap_or_else(|e| {
        eprintln!("Error parsing scene: {}", e);
        std::process::exit(1);
    });

    let fps: u32 = args
        .get(3)
        .and_then(|s| s.parse().ok())
        .unwrap_or(scene.fps);
    render(&scene, PathBuf::from(&args[2]), fps);
}

fn render(scene: &SceneFile, output: PathBuf, fps: u32) {
    let mut recorder = FrameRecorder::new(scene.config.clone()).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    recorder.create_window(&scene.config.background);

    let (width, height) = recorder.frame_dimensions();
    let steps = scene.steps.len();
    println!("sim-recorder");
    println!("============");
    println!(
        "World: {}x{} m at {} px/m ({}x{} px)",
        scene.config.width, scene.config.height, scene.config.ppm, width, height
    );
    println!("Steps: {}", steps);
    println!("Output: {} @ {} fps", output.display(), fps);
    println!();

    let start = Instant::now();
    for i in 0..steps {
        let entities = scene.step_entities(i).unwrap_or_default();
        if let Err(e) = recorder.update_agents(&entities) {
            eprintln!("Error capturing step {}: {}", i, e);
            std::process::exit(1);
        }

        // Print progress every 10%
        if (i + 1) % (steps / 10).max(1) == 0 {
            println!("  Frame {}/{}", i + 1, steps);
        }
    }
    let capture_time = start.elapsed();

    println!();
    println!(
        "Captured {} frames in {:.2}s ({:.1} MiB buffered)",
        recorder.frame_count(),
        capture_time.as_secs_f32(),
        recorder.memory_bytes() as f64 / (1024.0 * 1024.0)
    );

    match recorder.save_video(&output, fps) {
        Ok(Some(stats)) => println!("Saved {}", stats),
        Ok(None) => println!("No frames to save!"),
        Err(e) => {
            eprintln!("Error saving {}: {}", output.display(), e);
            std::process::exit(1);
        }
    }
    recorder.close();
}

fn print_example_scene() {
    let scene = CircularRoad::default().scene(3, 6);

    println!("Example scene (scene.json):");
    match serde_json::to_string_pretty(&scene) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing example: {}", e),
    }
}
