use crate::io::config::Config;
use crate::io::vertex_dump::export_models;
use crate::scene::context::SceneContext;
use crate::scene::loader::init_scene;
use crate::scene::model::Model;
use crate::ui::input::InputScript;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// What a headless run produced.
pub struct RunOutcome {
    pub context: SceneContext,
    pub exported: Vec<PathBuf>,
    pub frames: usize,
}

/// Runs the scene without a window: builds every model, optionally exports
/// the vertex buffers, then replays `script` one key per frame.
pub fn run_cli(config: &Config, script: &InputScript) -> Result<RunOutcome, String> {
    info!("Starting headless run...");
    let start_time = Instant::now();

    let mut context = init_scene(config).map_err(|e| format!("Scene loading failed: {e}"))?;
    info!("Scene loaded in {:.2?}", start_time.elapsed());

    let exported = if config.output.export_buffers {
        export_scene(&context, Path::new(&config.output.dir))?
    } else {
        Vec::new()
    };

    let frame_time = config.input.frame_time;
    for (frame, key) in script.frames().iter().enumerate() {
        if let Some(key) = key {
            context.on_key(*key, frame as f32 * frame_time);
        }

        let draws = context.frame_uniforms();
        let vertices: usize = draws
            .iter()
            .map(|(object, _)| object.model.vertex_count())
            .sum();
        debug!(
            "Frame {}: key {:?}, {} draws, {} vertices, player at {:?}",
            frame,
            key,
            draws.len(),
            vertices,
            context.player.position()
        );
    }

    log_final_state(&context);
    info!("Done in {:.2?}", start_time.elapsed());

    Ok(RunOutcome {
        context,
        exported,
        frames: script.len(),
    })
}

fn export_scene(context: &SceneContext, out_dir: &Path) -> Result<Vec<PathBuf>, String> {
    // Objects loaded from the same file share one model; export it once.
    let mut models: Vec<&Model> = Vec::new();
    let objects = std::iter::once(&context.player.object).chain(&context.enemies);
    for object in objects {
        if !models.iter().any(|m| std::ptr::eq(*m, &*object.model)) {
            models.push(&object.model);
        }
    }

    export_models(&models, out_dir)
        .map_err(|e| format!("Export to '{}' failed: {e}", out_dir.display()))
}

fn log_final_state(context: &SceneContext) {
    let player = &context.player;
    let light = player.light();
    info!(
        "Player: position {:?}, yaw {:.1} deg, front {:?}",
        player.position(),
        player.object.transform.rotation.y,
        player.front()
    );
    info!(
        "Headlight: {:?} (intensity {}), at {:?}",
        player.intensity_level(),
        light.intensity,
        light.position
    );
    info!(
        "Camera ({}): eye {:?}, target {:?}",
        context.camera.mode(),
        context.camera.eye(),
        context.camera.look().target
    );
}
