use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use grid_engine::{Color, Point};
use serde::Deserialize;
use thiserror::Error;

use super::gameplay::Attributes;

pub(crate) const CONFIG_ENV_VAR: &str = "FLOCKGRID_CONFIG";
const MAX_OBSTACLE_SIDE: u32 = 4096;
const MAX_MOVE_SPEED: i32 = 1024;

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("FLOCKGRID_CONFIG is not valid unicode")]
    EnvVar,
    #[error("read config '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config json at {field}: {source}")]
    Parse {
        field: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("validation failed at {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ObstacleConfig {
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) color: Color,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            x: 10,
            y: 10,
            width: 50,
            height: 20,
            color: Color::Blue,
        }
    }
}

/// Simulation settings. Every field is optional in the file; missing ones
/// keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SimConfig {
    pub(crate) tick_interval_ms: u64,
    pub(crate) target_fps: u32,
    pub(crate) rng_seed: Option<u64>,
    pub(crate) creature_color: Color,
    pub(crate) background: Color,
    pub(crate) obstacle: ObstacleConfig,
    pub(crate) creatures: Vec<Point>,
    pub(crate) attributes: Attributes,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 800,
            target_fps: 60,
            rng_seed: None,
            creature_color: Color::Cyan,
            background: Color::Green,
            obstacle: ObstacleConfig::default(),
            creatures: vec![Point::new(4, 4), Point::new(4, 8), Point::new(4, 12)],
            attributes: Attributes::default(),
        }
    }
}

impl SimConfig {
    /// Loads from the file named by [`CONFIG_ENV_VAR`], or the defaults when
    /// it is unset.
    pub(crate) fn load_from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            None => Ok(Self::default()),
            Some(raw) if raw.is_empty() => Ok(Self::default()),
            Some(raw) => match raw.into_string() {
                Ok(path) => Self::load_from_path(Path::new(&path)),
                Err(_) => Err(ConfigError::EnvVar),
            },
        }
    }

    pub(crate) fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw)
    }

    pub(crate) fn parse(raw: &str) -> Result<Self, ConfigError> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        let config = serde_path_to_error::deserialize::<_, SimConfig>(&mut deserializer)
            .map_err(|error| {
                let path = error.path().to_string();
                let field = if path.is_empty() { ".".to_string() } else { path };
                ConfigError::Parse {
                    field,
                    source: error.into_inner(),
                }
            })?;
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(invalid("tick_interval_ms", "must be greater than zero"));
        }
        if self.target_fps == 0 {
            return Err(invalid("target_fps", "must be greater than zero"));
        }
        validate_obstacle_side("obstacle.width", self.obstacle.width)?;
        validate_obstacle_side("obstacle.height", self.obstacle.height)?;
        let speed = self.attributes.move_speed;
        if speed < 1 {
            return Err(invalid(
                "attributes.move_speed",
                format!("expected at least 1, got {speed}"),
            ));
        }
        if speed > MAX_MOVE_SPEED {
            return Err(invalid(
                "attributes.move_speed",
                format!("expected at most {MAX_MOVE_SPEED}, got {speed}"),
            ));
        }
        Ok(())
    }

    pub(crate) fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

fn validate_obstacle_side(field: &'static str, side: u32) -> Result<(), ConfigError> {
    if side == 0 {
        return Err(invalid(field, "must be greater than zero"));
    }
    if side > MAX_OBSTACLE_SIDE {
        return Err(invalid(
            field,
            format!("expected at most {MAX_OBSTACLE_SIDE}, got {side}"),
        ));
    }
    Ok(())
}

fn invalid(field: &'static str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        message: message.into(),
    }
}
