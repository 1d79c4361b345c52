// src/scenery/plugin.rs
//! Scenery plugin wiring (glue).
//! - Registry asset/loader
//! - Observer handle + status gate + spawn timer
//! - Spawn cadence -> advance/cull -> visuals -> teardown, in that order

use bevy::prelude::*;

use super::core::{SceneryError, SceneryRng, ScenerySeed};
use super::ledger::SceneryLedger;
use super::lifecycle::{advance_and_cull, clear_on_event};
use super::registry::{TreeRegistry, TreeRegistryAssetPlugin};
use super::settings::ScenerySettings;
use super::spawner::{spawn_trees, sync_template_pool};
use super::visuals::attach_tree_visuals;

/// The observer (camera/player) whose position drives culling. The host
/// registers it explicitly at setup; there is no tag lookup.
#[derive(Resource, Clone, Copy, Debug)]
pub struct SceneryObserver(pub Entity);

/// Lifecycle gate for the subsystem's two cadences.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SceneryStatus {
    #[default]
    Running,
    /// Spawning halted (unusable template pool); live trees are still
    /// advanced and culled.
    SpawningHalted,
    /// Nothing runs (no usable observer or invalid settings).
    Disabled,
}

impl SceneryStatus {
    pub fn spawning(&self) -> bool {
        matches!(self, SceneryStatus::Running)
    }

    pub fn ticking(&self) -> bool {
        !matches!(self, SceneryStatus::Disabled)
    }
}

/// Repeating real-time spawn cadence.
#[derive(Resource)]
pub struct SpawnTimer(pub Timer);

/// Handle to the loaded template registry asset.
#[derive(Resource, Default)]
pub struct TreeRegistryHandle(pub Handle<TreeRegistry>);

/// Teardown request: despawn every owned tree and re-arm the cadence.
#[derive(Event, Clone, Copy, Default)]
pub struct SceneryCleared;

pub struct SceneryPlugin;

impl Plugin for SceneryPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(TreeRegistryAssetPlugin)
            .init_resource::<ScenerySettings>()
            .init_resource::<TreeRegistryHandle>()
            .init_resource::<SceneryLedger>()
            .init_resource::<SceneryStatus>()
            .add_event::<SceneryCleared>()
            .add_systems(Startup, load_registry)
            // Host setup (observer registration) happens in Startup; validate after.
            .add_systems(PostStartup, initialize_scenery)
            .add_systems(
                Update,
                (
                    sync_template_pool,
                    spawn_trees.after(sync_template_pool),
                    advance_and_cull.after(spawn_trees),
                    attach_tree_visuals.after(advance_and_cull),
                    clear_on_event.after(attach_tree_visuals),
                ),
            );
    }
}

/// Startup: request loading the template registry, store the handle.
fn load_registry(
    mut handle_res: ResMut<TreeRegistryHandle>,
    settings: Res<ScenerySettings>,
    assets: Res<AssetServer>,
) {
    if handle_res.0.is_strong() {
        return;
    }
    handle_res.0 = assets.load(settings.registry_path.as_str());
    info!("Scenery: loading template registry from '{}'", settings.registry_path);
}

/// PostStartup: validate settings, seed the RNG, arm the spawn timer.
/// Failures disable the subsystem and are reported exactly once, here.
pub(crate) fn initialize_scenery(
    mut commands: Commands,
    settings: Res<ScenerySettings>,
    observer: Option<Res<SceneryObserver>>,
    mut status: ResMut<SceneryStatus>,
) {
    if observer.is_none() {
        error!("Scenery: {}", SceneryError::MissingObserver);
        *status = SceneryStatus::Disabled;
        return;
    }

    let profile = match settings.validate() {
        Ok(p) => p,
        Err(err) => {
            error!("Scenery: {err}");
            *status = SceneryStatus::Disabled;
            return;
        }
    };

    commands.insert_resource(profile);
    commands.insert_resource(SceneryRng::from_seed(ScenerySeed(settings.seed)));
    commands.insert_resource(SpawnTimer(Timer::from_seconds(
        settings.spawn_interval_secs,
        TimerMode::Repeating,
    )));
    info!(
        "Scenery: initialized (interval={}s, cap={}, cull>{}m, seed={})",
        settings.spawn_interval_secs, settings.max_active, settings.destroy_distance, settings.seed
    );
}
