use abyss::app::run_cli;
use abyss::io::config::Config;
use abyss::scene::camera::CameraMode;
use abyss::ui::input::InputScript;
use clap::Parser;
use log::{error, info};

/// Headless submarine scene: builds tangent-space vertex buffers for every
/// model and replays a key script against the player and camera.
#[derive(Parser, Debug)]
#[command(name = "abyss", version)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Player model, overriding `player.path`
    #[arg(long, value_name = "FILE")]
    obj: Option<String>,

    /// Camera mode: top_down, first_person or third_person
    #[arg(long)]
    camera: Option<CameraMode>,

    /// Key script, one key (WASDQEF) or '.' per frame
    #[arg(short, long)]
    keys: Option<String>,

    /// Directory for exported vertex buffers
    #[arg(long, value_name = "DIR")]
    out_dir: Option<String>,

    /// Skip vertex buffer export
    #[arg(long)]
    no_export: bool,
}

impl Cli {
    fn into_config(self) -> Result<Config, String> {
        let mut config = match &self.config {
            Some(path) => {
                info!("Loading configuration from '{path}'");
                Config::load(path).map_err(|e| format!("Failed to load '{path}': {e}"))?
            }
            None => {
                info!("No config file given, using defaults");
                Config::default()
            }
        };

        if let Some(obj) = self.obj {
            config.player.path = obj;
        }
        if let Some(mode) = self.camera {
            config.camera.mode = mode;
        }
        if let Some(keys) = self.keys {
            config.input.script = keys;
        }
        if let Some(dir) = self.out_dir {
            config.output.dir = dir;
        }
        if self.no_export {
            config.output.export_buffers = false;
        }

        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_level(true)
        .init();

    let config = Cli::parse().into_config()?;
    let script: InputScript = config.input.script.parse().map_err(|e| {
        error!("Invalid key script: {e}");
        format!("Invalid key script: {e}")
    })?;

    let outcome = run_cli(&config, &script).inspect_err(|e| error!("{e}"))?;
    info!(
        "Replayed {} frames, exported {} buffers",
        outcome.frames,
        outcome.exported.len()
    );
    Ok(())
}
