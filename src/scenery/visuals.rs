// src/scenery/visuals.rs
//! Attach a template's render representation to freshly spawned trees.
//! Gameplay spawning stays renderer-free; this is the only system that
//! touches the asset server.

use bevy::pbr::MeshMaterial3d;
use bevy::prelude::*;

use super::core::SceneryTree;
use super::spawner::TemplatePool;
use super::registry::RenderRef;

/// Update: give every new tree its visual (scene or mesh+material).
pub fn attach_tree_visuals(
    mut commands: Commands,
    assets: Res<AssetServer>,
    pool: Option<Res<TemplatePool>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    fresh: Query<(Entity, &SceneryTree), Added<SceneryTree>>,
) {
    let Some(pool) = pool else { return };

    for (entity, tree) in fresh.iter() {
        let Some(slot) = pool.templates.get(tree.template.0 as usize) else {
            warn!("Scenery: no template slot for {:?}; leaving tree bare", tree.template);
            continue;
        };

        match &slot.render {
            RenderRef::Scene { path } => {
                let scene: Handle<Scene> = assets.load(path.as_str());
                commands.entity(entity).insert(SceneRoot(scene));
            }
            RenderRef::MeshMaterial { mesh, material } => {
                let mesh_h: Handle<Mesh> = assets.load(mesh.as_str());
                let mat_h: Handle<StandardMaterial> = match material {
                    Some(m) => assets.load(m.as_str()),
                    None => materials.add(StandardMaterial::default()),
                };
                commands.entity(entity).insert((Mesh3d(mesh_h), MeshMaterial3d(mat_h)));
            }
        }
    }
}
