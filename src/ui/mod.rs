//! UI module that visualizes the simulation state using Bevy
//!
//! This module is purely for visualization - all simulation logic is in the `simulation` module.
//! The UI reads state from `SimWorld` and renders it using Bevy's 3D graphics.

mod camera;
mod components;
mod input;
pub mod spawner;
mod sync;
mod world;

use bevy::prelude::*;

pub use components::{EntityMappings, PlayerInput, SimWorldResource};

use camera::update_camera;
use components::CameraSettings;
use input::{collect_drive_input, handle_input};
use spawner::{spawn_hud, spawn_layout_visuals, spawn_player, spawn_waypoint_beacon};
use sync::{
    animate_limbs, poll_player_model, sync_pedestrians, sync_player, sync_traffic,
    tick_simulation, update_hud_text, update_waypoint_beacon,
};
use world::setup_world;

/// Plugin to register all UI systems
pub struct CorridorSimUIPlugin;

impl Plugin for CorridorSimUIPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimWorldResource>()
            .init_resource::<EntityMappings>()
            .init_resource::<PlayerInput>()
            .init_resource::<CameraSettings>()
            .add_systems(
                Startup,
                (
                    setup_world,
                    spawn_layout_visuals.after(setup_world),
                    spawn_player,
                    spawn_waypoint_beacon,
                    spawn_hud,
                ),
            )
            .add_systems(FixedUpdate, tick_simulation)
            .add_systems(
                Update,
                (
                    (collect_drive_input, handle_input),
                    (
                        sync_player,
                        sync_traffic,
                        sync_pedestrians,
                        animate_limbs,
                        update_waypoint_beacon,
                        update_hud_text,
                    ),
                    update_camera,
                )
                    .chain(),
            )
            .add_systems(Update, poll_player_model);
    }
}
