// src/scenery/settings.rs
//! Configuration surface for the streamer, plus validation.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::core::{MotionProfile, SceneryError};

/// All plain settings for the streamer. Treated as immutable while a run is
/// live; `max_active` is the one value read live each spawn tick so that an
/// externally lowered cap still converges.
#[derive(Resource, Clone, Debug, Serialize, Deserialize)]
pub struct ScenerySettings {
    /// Where the template registry manifest lives (under `assets/`).
    pub registry_path: String,
    /// Seed for template picks and lateral offsets.
    pub seed: u64,
    /// Center of the spawn line.
    pub base_position: Vec3,
    /// Width of the spawn line along X; lateral offsets are drawn uniformly
    /// from `[-width/2, +width/2]`.
    pub spawn_area_width: f32,
    /// Lift applied to every spawn position.
    pub y_offset: f32,
    /// Movement direction; normalized at initialize.
    pub direction: Vec3,
    /// Movement speed in m/s.
    pub speed: f32,
    /// Real-time seconds between spawns.
    pub spawn_interval_secs: f32,
    /// Trees strictly farther than this from the observer are destroyed.
    /// A tree at exactly this distance survives.
    pub destroy_distance: f32,
    /// Population cap; oldest trees are evicted past it.
    pub max_active: usize,
}

impl Default for ScenerySettings {
    fn default() -> Self {
        Self {
            registry_path: "scenery/trees.scenery.ron".to_string(),
            seed: 1337,
            base_position: Vec3::new(0.0, 0.0, -60.0),
            spawn_area_width: 5.0,
            y_offset: 0.0,
            // Toward the camera (which looks down -Z).
            direction: Vec3::Z,
            speed: 5.0,
            spawn_interval_secs: 1.0,
            destroy_distance: 80.0,
            max_active: 20,
        }
    }
}

impl ScenerySettings {
    /// Validate the numeric surface and normalize `direction` into a
    /// [`MotionProfile`]. Zero/negative values are rejected up front rather
    /// than left to misbehave at runtime.
    pub fn validate(&self) -> Result<MotionProfile, SceneryError> {
        check_finite("base_position.x", self.base_position.x)?;
        check_finite("base_position.y", self.base_position.y)?;
        check_finite("base_position.z", self.base_position.z)?;
        check_finite("y_offset", self.y_offset)?;

        if !self.spawn_area_width.is_finite() || self.spawn_area_width < 0.0 {
            return Err(SceneryError::InvalidSetting {
                name: "spawn_area_width",
                value: self.spawn_area_width,
            });
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(SceneryError::InvalidSetting { name: "speed", value: self.speed });
        }
        if !self.spawn_interval_secs.is_finite() || self.spawn_interval_secs <= 0.0 {
            return Err(SceneryError::InvalidSetting {
                name: "spawn_interval_secs",
                value: self.spawn_interval_secs,
            });
        }
        if !self.destroy_distance.is_finite() || self.destroy_distance <= 0.0 {
            return Err(SceneryError::InvalidSetting {
                name: "destroy_distance",
                value: self.destroy_distance,
            });
        }
        if self.max_active == 0 {
            return Err(SceneryError::InvalidSetting { name: "max_active", value: 0.0 });
        }

        let direction = self
            .direction
            .try_normalize()
            .ok_or(SceneryError::DegenerateDirection)?;

        Ok(MotionProfile { direction, speed: self.speed })
    }
}

fn check_finite(name: &'static str, value: f32) -> Result<(), SceneryError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SceneryError::InvalidSetting { name, value })
    }
}
