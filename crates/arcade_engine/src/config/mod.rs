//! Configuration system
//!
//! Typed, serializable configuration for the engine core. Config files may
//! be TOML or RON; the format is chosen by file extension.

pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// # Physics Configuration
///
/// Tuning parameters for the continuous-collision physics system. The
/// defaults reproduce the engine's reference behavior; games mostly tweak
/// `max_bounces` and `max_dt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Upper bound on the simulation step in seconds. Larger host frame
    /// gaps are clamped so a single sweep never covers a pathological
    /// distance.
    pub max_dt: f32,

    /// Maximum number of collision bounces resolved per body per frame.
    /// A body that exhausts the budget stops resolving until next frame.
    pub max_bounces: u32,

    /// Distance a body is nudged along the contact normal after a bounce
    /// to avoid re-penetration on the next step.
    pub push_out: f32,

    /// Bodies slower than this (units per second) skip collision sweeps.
    pub min_speed: f32,
}

impl PhysicsConfig {
    /// Create a physics configuration with the reference defaults
    pub fn new() -> Self {
        Self {
            max_dt: 0.05,
            max_bounces: 5,
            push_out: 0.01,
            min_speed: 1e-4,
        }
    }

    /// Set the simulation step clamp
    pub fn with_max_dt(mut self, max_dt: f32) -> Self {
        self.max_dt = max_dt;
        self
    }

    /// Set the per-frame bounce budget
    pub fn with_max_bounces(mut self, max_bounces: u32) -> Self {
        self.max_bounces = max_bounces;
        self
    }

    /// Set the post-collision push-out distance
    pub fn with_push_out(mut self, push_out: f32) -> Self {
        self.push_out = push_out;
        self
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for PhysicsConfig {}

/// # Engine Configuration
///
/// Core engine behavior configuration: logging and frame stepping hints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Log level for the engine
    pub log_level: String,
    /// Whether to enable debug features
    pub debug_mode: bool,
    /// Target FPS hint for the host loop driver
    pub target_fps: Option<u32>,
    /// Physics tuning
    pub physics: PhysicsConfig,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            debug_mode: cfg!(debug_assertions),
            target_fps: None,
            physics: PhysicsConfig::default(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set target FPS
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = Some(fps);
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for EngineConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physics_defaults_match_reference() {
        let config = PhysicsConfig::default();
        assert_eq!(config.max_bounces, 5);
        assert!((config.max_dt - 0.05).abs() < 1e-9);
        assert!((config.push_out - 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_physics_config_toml_roundtrip() {
        let config = PhysicsConfig::new().with_max_dt(0.1).with_max_bounces(3);
        let text = toml::to_string_pretty(&config).unwrap();
        let restored: PhysicsConfig = toml::from_str(&text).unwrap();
        assert_eq!(restored.max_bounces, 3);
        assert!((restored.max_dt - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_unsupported_format_rejected() {
        let result = PhysicsConfig::load_from_file("physics.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
