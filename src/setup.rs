use bevy::prelude::*;

use crate::scenery::SceneryObserver;

pub fn setup(mut commands: Commands) {
    // 1) Light
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // 2) Observer camera. Trees spawn ahead of it and drift past; the
    //    streamer gets the reference explicitly instead of hunting for a tag.
    let observer = commands
        .spawn((
            Camera3d::default(),
            Transform::from_xyz(0.0, 3.0, 10.0).looking_at(Vec3::new(0.0, 1.0, -40.0), Vec3::Y),
        ))
        .id();
    commands.insert_resource(SceneryObserver(observer));
}
