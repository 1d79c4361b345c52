use bevy::prelude::*;

mod scenery;
mod setup;

use scenery::SceneryPlugin;

fn main() {
    App::new()
        // core engine plugins
        .add_plugins(DefaultPlugins)
        // domain plugin: tree spawn / drift / cull lifecycle
        .add_plugins(SceneryPlugin)
        // light + observer camera (registered with the scenery subsystem)
        .add_systems(Startup, setup::setup)
        .run();
}
