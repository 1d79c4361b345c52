// src/scenery/spawner.rs
//! Spawn cadence: pick a template, drop it on the spawn line, keep the
//! population under the cap.

use bevy::asset::LoadState;
use bevy::prelude::*;
use rand::Rng;

use super::core::{MotionProfile, SceneryError, SceneryRng, SceneryTree, TreeTemplateId};
use super::ledger::SceneryLedger;
use super::plugin::{SceneryStatus, SpawnTimer, TreeRegistryHandle};
use super::registry::{RenderRef, TreeRegistry};
use super::settings::ScenerySettings;

/// Snapshot of the loaded registry that the spawn path actually needs.
/// Synced once when the asset arrives; spawn ticks never touch `Assets`.
#[derive(Resource, Clone, Debug)]
pub struct TemplatePool {
    pub templates: Vec<TemplateSlot>,
}

#[derive(Clone, Debug)]
pub struct TemplateSlot {
    pub id: TreeTemplateId,
    pub name: String,
    pub render: RenderRef,
}

/// Update: copy the registry asset into the pool once it finishes loading.
/// A registry that fails to load means no pool is configured at all; that is
/// reported once and the spawn cadence halts.
pub fn sync_template_pool(
    mut commands: Commands,
    pool: Option<Res<TemplatePool>>,
    handle: Res<TreeRegistryHandle>,
    registries: Res<Assets<TreeRegistry>>,
    assets: Res<AssetServer>,
    mut status: ResMut<SceneryStatus>,
) {
    if pool.is_some() || !status.spawning() {
        return;
    }

    let Some(reg) = registries.get(&handle.0) else {
        if let Some(LoadState::Failed(err)) = assets.get_load_state(handle.0.id()) {
            error!("Scenery: template registry failed to load: {err}");
            *status = SceneryStatus::SpawningHalted;
        }
        return;
    };

    let templates: Vec<TemplateSlot> = reg
        .templates
        .iter()
        .enumerate()
        .map(|(i, def)| TemplateSlot {
            id: TreeTemplateId(i as u32),
            name: def.name.clone(),
            render: def.render.clone(),
        })
        .collect();

    info!("Scenery: template pool ready ({} templates)", templates.len());
    commands.insert_resource(TemplatePool { templates });
}

/// Update: the spawn cadence. Ticks the repeating timer on real time and
/// spawns one tree per elapsed interval; a long frame fires the timer more
/// than once and every missed interval is made up within the same tick.
/// After each batch the over-cap eviction loop removes oldest entries until
/// the ledger is back under `max_active`.
pub fn spawn_trees(
    mut commands: Commands,
    time: Res<Time>,
    settings: Res<ScenerySettings>,
    mut status: ResMut<SceneryStatus>,
    profile: Option<Res<MotionProfile>>,
    timer: Option<ResMut<SpawnTimer>>,
    rng: Option<ResMut<SceneryRng>>,
    pool: Option<Res<TemplatePool>>,
    mut ledger: ResMut<SceneryLedger>,
) {
    if !status.spawning() {
        return;
    }
    // Not initialized (disabled at startup before these existed).
    let (Some(profile), Some(mut timer), Some(mut rng)) = (profile, timer, rng) else {
        return;
    };

    timer.0.tick(time.delta());
    let fired = timer.0.times_finished_this_tick();
    if fired == 0 {
        return;
    }

    // Registry asset still loading: skip this interval, not an error.
    let Some(pool) = pool else { return };

    if pool.templates.is_empty() {
        error!("Scenery: {}", SceneryError::EmptyTemplatePool);
        *status = SceneryStatus::SpawningHalted;
        return;
    }

    for _ in 0..fired {
        let pick = rng.0.random_range(0..pool.templates.len());
        let slot = &pool.templates[pick];

        let half = settings.spawn_area_width / 2.0;
        let lateral = rng.0.random_range(-half..=half);
        let position = settings.base_position + Vec3::new(lateral, settings.y_offset, 0.0);

        let entity = commands
            .spawn((
                Transform::from_translation(position),
                GlobalTransform::IDENTITY,
                Visibility::Visible,
                InheritedVisibility::VISIBLE,
                ViewVisibility::default(),
                SceneryTree { template: slot.id },
                profile.drift(),
            ))
            .id();

        let seq = ledger.push(entity);
        debug!("Scenery: spawned '{}' seq={} at {:?}", slot.name, seq.0, position);
    }

    // Cap is read live so an externally lowered value still converges.
    for evicted in ledger.evict_over_cap(settings.max_active) {
        // The entry may already be gone if something external destroyed it.
        if let Ok(mut e) = commands.get_entity(evicted) {
            e.despawn();
        }
    }
}
