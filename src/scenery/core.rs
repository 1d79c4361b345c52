// src/scenery/core.rs
//! Core types for the tree lifecycle: components, motion profile, spawn RNG,
//! and the configuration error taxonomy.
//! Keep this file dependency-light; it should compile before any system impls.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

// ---------- Seeding & randomness ----------

/// Seed for all spawn randomness; changing this reshuffles template picks
/// and lateral offsets.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScenerySeed(pub u64);

/// The spawn randomness stream (template pick + lateral offset).
/// Seeded, so identical runs place identical trees.
#[derive(Resource)]
pub struct SceneryRng(pub ChaCha8Rng);

impl SceneryRng {
    pub fn from_seed(seed: ScenerySeed) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed.0))
    }
}

// ---------- Identity ----------

/// Index of a template in the pool (stable during a session).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreeTemplateId(pub u32);

/// Monotonic spawn sequence number; smaller = older.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpawnSeq(pub u64);

// ---------- Components ----------

/// Marker for every tree the streamer owns. The ledger holds the only
/// authoritative reference to these entities.
#[derive(Component)]
pub struct SceneryTree {
    pub template: TreeTemplateId,
}

/// Per-tree motion, latched from the manager's profile at spawn time.
/// `direction` is unit length; per-frame displacement is
/// `direction * speed * dt`.
#[derive(Component, Clone, Copy, Debug)]
pub struct Drift {
    pub direction: Vec3,
    pub speed: f32,
}

// ---------- Motion profile ----------

/// Validated movement configuration shared by every spawn.
/// `direction` has already been normalized.
#[derive(Resource, Clone, Copy, Debug)]
pub struct MotionProfile {
    pub direction: Vec3,
    pub speed: f32,
}

impl MotionProfile {
    pub fn drift(&self) -> Drift {
        Drift { direction: self.direction, speed: self.speed }
    }
}

// ---------- Errors ----------

/// Unusable setup. Reported once; the affected cadence halts and is never
/// retried automatically.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SceneryError {
    #[error("no observer registered; cannot compute culling distance")]
    MissingObserver,
    #[error("tree template pool is empty; nothing to spawn")]
    EmptyTemplatePool,
    #[error("movement direction has zero length and cannot be normalized")]
    DegenerateDirection,
    #[error("setting `{name}` is out of range: {value}")]
    InvalidSetting { name: &'static str, value: f32 },
}
