//! Camera rigs: an orbit around the showroom vehicle and a chase camera
//! behind it while driving

use bevy::prelude::*;

use super::components::{CameraSettings, MainCamera, SimWorldResource};
use crate::simulation::DriveMode;

pub fn update_camera(
    time: Res<Time>,
    sim_world: Res<SimWorldResource>,
    mut settings: ResMut<CameraSettings>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };
    let state = sim_world.0.vehicle.state();
    let target = Vec3::new(state.position.x as f32, 1.0, state.position.z as f32);

    match sim_world.0.mode() {
        DriveMode::Showroom => {
            settings.orbit_angle += settings.orbit_speed * time.delta_secs();
            let angle = settings.orbit_angle;
            transform.translation = target
                + Vec3::new(
                    angle.sin() * settings.orbit_distance,
                    settings.orbit_height,
                    angle.cos() * settings.orbit_distance,
                );
        }
        DriveMode::Drive => {
            let heading = state.heading as f32;
            let forward = Vec3::new(heading.sin(), 0.0, heading.cos());
            let desired =
                target - forward * settings.chase_distance + Vec3::Y * settings.chase_height;
            transform.translation = transform.translation.lerp(desired, settings.chase_follow);
        }
    }
    transform.look_at(target, Vec3::Y);
}
