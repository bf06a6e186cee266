//! World configuration
//!
//! The typed structure through which entity placement data enters the core.
//! Map parsing lives outside the crate; whatever reads a map file produces a
//! [`WorldConfig`], and the same structure round-trips through TOML or RON
//! for hand-authored arenas.

use crate::foundation::math::Vec3;
use crate::world::entities::PowerUpKind;
use serde::{Deserialize, Serialize};

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

/// Placement of one power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpSpawn {
    /// Spawn position
    pub position: Vec3,
    /// What the pickup grants
    pub kind: PowerUpKind,
}

/// Ground slab and boundary-wall dimensions.
///
/// The four walls are derived from the ground: each sits flush against one
/// edge of the slab, centered `wall_half_height` above the ground's top
/// face.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Center of the ground slab
    pub ground_position: Vec3,
    /// Half-extents of the ground slab
    pub ground_half_extents: Vec3,
    /// Half-height of the boundary walls
    pub wall_half_height: f32,
    /// Half-thickness of the boundary walls
    pub wall_half_thickness: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            ground_position: Vec3::new(-1.0, -1.0, -1.0),
            ground_half_extents: Vec3::new(50.0, 1.0, 10.0),
            wall_half_height: 5.0,
            wall_half_thickness: 1.0,
        }
    }
}

/// Everything needed to build a [`crate::world::World`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Downward acceleration applied to every movable entity
    pub gravity: f32,
    /// Seed for the world-owned random source (enemy hops, pellet spread)
    pub rng_seed: u64,
    /// Half-extent of an obstacle cube
    pub obstacle_half_extent: f32,
    /// Player spawn position
    pub player_spawn: Vec3,
    /// Obstacle cube centers
    pub obstacles: Vec<Vec3>,
    /// Enemy spawn positions
    pub enemies: Vec<Vec3>,
    /// Arena geometry
    pub arena: ArenaConfig,
    /// Power-up placements
    pub power_ups: Vec<PowerUpSpawn>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: 50.0,
            rng_seed: 0x5eed_0001,
            obstacle_half_extent: 1.0,
            player_spawn: Vec3::new(0.0, 1.0, 0.0),
            obstacles: vec![
                // Arch over the eastern lane.
                Vec3::new(10.0, 1.0, 0.0),
                Vec3::new(12.0, 3.0, 0.0),
                Vec3::new(14.0, 5.0, 0.0),
                Vec3::new(16.0, 5.0, 0.0),
                Vec3::new(18.0, 5.0, 0.0),
                Vec3::new(20.0, 3.0, 0.0),
                Vec3::new(22.0, 1.0, 0.0),
                // Western stair.
                Vec3::new(-10.0, 1.0, 4.0),
                Vec3::new(-12.0, 3.0, 2.0),
                Vec3::new(-14.0, 5.0, 0.0),
                Vec3::new(-14.0, 5.0, -2.0),
                Vec3::new(-12.0, 3.0, -4.0),
            ],
            enemies: vec![
                Vec3::new(10.0, 1.0, 4.0),
                Vec3::new(18.0, 1.0, -4.0),
                Vec3::new(-16.0, 1.0, 2.0),
                Vec3::new(26.0, 1.0, 6.0),
            ],
            arena: ArenaConfig::default(),
            power_ups: vec![
                PowerUpSpawn {
                    position: Vec3::new(-6.0, 2.0, 4.0),
                    kind: PowerUpKind::Health,
                },
                PowerUpSpawn {
                    position: Vec3::new(6.0, 2.0, -4.0),
                    kind: PowerUpKind::Ammo,
                },
            ],
        }
    }
}

impl WorldConfig {
    /// Load configuration from a `.toml` or `.ron` file
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to a `.toml` or `.ron` file
    pub fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
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
