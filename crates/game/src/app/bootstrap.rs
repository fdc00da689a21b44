use grid_engine::{CanvasError, Level, LoopConfig, Scene};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::config::{ConfigError, SimConfig};
use super::gameplay;

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
    pub(crate) level: Level,
}

#[derive(Debug, Error)]
pub(crate) enum BootstrapError {
    #[error("load configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("build creature sprites: {0}")]
    Sprites(#[from] CanvasError),
}

pub(crate) fn build_app() -> Result<AppWiring, BootstrapError> {
    init_tracing();
    info!(version = env!("CARGO_PKG_VERSION"), "=== flockgrid startup ===");

    let sim = SimConfig::load_from_env()?;
    let scene = gameplay::build_scene(&sim)?;
    let level = gameplay::build_level(&sim);
    let config = loop_config(&sim);

    Ok(AppWiring {
        config,
        scene: Box::new(scene),
        level,
    })
}

fn loop_config(sim: &SimConfig) -> LoopConfig {
    LoopConfig {
        window_title: "flockgrid".to_string(),
        target_fps: sim.target_fps,
        ..LoopConfig::default()
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_config_takes_fps_from_simulation_config() {
        let sim = SimConfig {
            target_fps: 30,
            ..SimConfig::default()
        };
        let config = loop_config(&sim);
        assert_eq!(config.target_fps, 30);
        assert_eq!(config.window_title, "flockgrid");
        assert_eq!(config.columns, LoopConfig::default().columns);
    }

    #[test]
    fn config_errors_convert_into_bootstrap_errors() {
        let err: BootstrapError = SimConfig::parse(r#"{ "target_fps": 0 }"#)
            .expect_err("invalid")
            .into();
        assert!(err.to_string().starts_with("load configuration: validation failed"));
    }
}
