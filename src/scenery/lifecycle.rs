// src/scenery/lifecycle.rs
//! Per-frame advance-and-cull scan over the ledger, plus teardown.

use bevy::prelude::*;

use super::core::{Drift, SceneryError, SceneryTree};
use super::ledger::SceneryLedger;
use super::plugin::{SceneryCleared, SceneryObserver, SceneryStatus, SpawnTimer};
use super::settings::ScenerySettings;

/// Update: move every live tree, then cull what drifted out of range.
///
/// The scan walks the ledger back to front so entries removed mid-scan never
/// shift anything still unvisited: every element is processed exactly once.
/// The observer position is snapshotted once per tick, and movement happens
/// before the distance check, so culling always sees the post-move position.
/// A tree at exactly `destroy_distance` survives.
pub fn advance_and_cull(
    mut commands: Commands,
    time: Res<Time>,
    settings: Res<ScenerySettings>,
    mut status: ResMut<SceneryStatus>,
    observer: Option<Res<SceneryObserver>>,
    transforms: Query<&Transform, Without<SceneryTree>>,
    mut trees: Query<(&mut Transform, &Drift), With<SceneryTree>>,
    mut ledger: ResMut<SceneryLedger>,
) {
    if !status.ticking() {
        return;
    }

    let observer_pos = observer
        .and_then(|o| transforms.get(o.0).ok())
        .map(|tf| tf.translation);
    let Some(observer_pos) = observer_pos else {
        // The observer entity went away mid-run; same contract as at
        // initialize: report once, stop ticking.
        error!("Scenery: {}", SceneryError::MissingObserver);
        *status = SceneryStatus::Disabled;
        return;
    };

    let dt = time.delta_secs();

    for i in (0..ledger.len()).rev() {
        let Some(entry) = ledger.get(i) else { continue };

        // Externally destroyed: heal the ledger, touch nothing else.
        let Ok((mut tf, drift)) = trees.get_mut(entry.entity) else {
            ledger.remove(i);
            continue;
        };

        tf.translation += drift.direction * drift.speed * dt;

        if tf.translation.distance(observer_pos) > settings.destroy_distance {
            commands.entity(entry.entity).despawn();
            ledger.remove(i);
        }
    }
}

/// Update: teardown path. Releases every owned tree and re-arms the cadence,
/// so destroying the streamer leaks no renderable.
pub fn clear_on_event(
    mut commands: Commands,
    mut evr: EventReader<SceneryCleared>,
    mut ledger: ResMut<SceneryLedger>,
    mut timer: Option<ResMut<SpawnTimer>>,
) {
    if evr.is_empty() {
        return;
    }
    evr.clear();

    let released = ledger.len();
    for entry in ledger.drain_all() {
        if let Ok(mut e) = commands.get_entity(entry.entity) {
            e.despawn();
        }
    }
    if let Some(timer) = timer.as_mut() {
        timer.0.reset();
    }
    info!("Scenery: cleared ({} trees released)", released);
}
