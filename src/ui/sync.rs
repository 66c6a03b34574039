//! Systems for syncing Bevy entities with simulation state

use bevy::asset::RecursiveDependencyLoadState;
use bevy::prelude::*;
use std::collections::HashSet;

use super::components::{
    EntityMappings, HudText, Limb, LimbKind, PedestrianLink, PendingModel, PlayerInput,
    PlayerPlaceholder, PlayerVehicle, SimWorldResource, TrafficLink, WaypointBeacon,
};
use super::spawner::{spawn_pedestrian_visual, spawn_traffic_visual, BEACON_HEIGHT};
use crate::simulation::{DriveMode, PedestrianId, TrafficAgentId};

/// Largest step handed to the simulation after a stall
const MAX_DELTA: f64 = 1.0 / 30.0;

/// System to run simulation tick
pub fn tick_simulation(
    time: Res<Time>,
    input: Res<PlayerInput>,
    mut sim_world: ResMut<SimWorldResource>,
) {
    let delta = time.delta_secs_f64().min(MAX_DELTA);
    sim_world.0.tick(delta, input.0);
}

fn heading_rotation(heading: f64) -> Quat {
    Quat::from_rotation_y(heading as f32)
}

/// Place the player's vehicle at the simulated pose
pub fn sync_player(
    sim_world: Res<SimWorldResource>,
    mut player_query: Query<&mut Transform, With<PlayerVehicle>>,
) {
    let state = sim_world.0.vehicle.state();
    for mut transform in player_query.iter_mut() {
        transform.translation = Vec3::new(state.position.x as f32, 0.0, state.position.z as f32);
        transform.rotation = heading_rotation(state.heading);
    }
}

/// Swap the placeholder for the loaded model. On failure the placeholder
/// simply stays.
pub fn poll_player_model(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    player_query: Query<(Entity, &PendingModel), With<PlayerVehicle>>,
    placeholder_query: Query<Entity, With<PlayerPlaceholder>>,
) {
    for (player, pending) in player_query.iter() {
        match asset_server.recursive_dependency_load_state(pending.0.id()) {
            RecursiveDependencyLoadState::Loaded => {
                for placeholder in placeholder_query.iter() {
                    commands.entity(placeholder).despawn();
                }
                let model = pending.0.clone();
                commands
                    .entity(player)
                    .remove::<PendingModel>()
                    .with_child(SceneRoot(model));
                info!("Vehicle model loaded");
            }
            RecursiveDependencyLoadState::Failed(error) => {
                warn!("Vehicle model failed to load, keeping placeholder: {}", error);
                commands.entity(player).remove::<PendingModel>();
            }
            RecursiveDependencyLoadState::NotLoaded | RecursiveDependencyLoadState::Loading => {}
        }
    }
}

/// System to sync traffic visuals from simulation state
pub fn sync_traffic(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sim_world: Res<SimWorldResource>,
    mut mappings: ResMut<EntityMappings>,
    mut traffic_query: Query<(Entity, &TrafficLink, &mut Transform)>,
) {
    let traffic = &sim_world.0.traffic;
    let mut existing: HashSet<TrafficAgentId> = HashSet::new();

    for (entity, link, mut transform) in traffic_query.iter_mut() {
        if let Some(agent) = traffic.get(link.0) {
            existing.insert(link.0);
            let position = agent.position();
            transform.translation = Vec3::new(position.x as f32, 0.0, position.z as f32);
        } else {
            // Agent left the corridor
            commands.entity(entity).despawn();
            mappings.traffic.remove(&link.0);
        }
    }

    for agent in traffic.agents() {
        if !existing.contains(&agent.id) {
            spawn_traffic_visual(&mut commands, &mut meshes, &mut materials, agent, &mut mappings);
        }
    }
}

/// System to sync pedestrian visuals from simulation state
pub fn sync_pedestrians(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sim_world: Res<SimWorldResource>,
    mut mappings: ResMut<EntityMappings>,
    mut walker_query: Query<(Entity, &PedestrianLink, &mut Transform)>,
) {
    let pedestrians = &sim_world.0.pedestrians;
    let mut existing: HashSet<PedestrianId> = HashSet::new();

    for (entity, link, mut transform) in walker_query.iter_mut() {
        if let Some(walker) = pedestrians.get(link.0) {
            existing.insert(link.0);
            let position = walker.position();
            let bob = walker.gait().bob as f32;
            transform.translation = Vec3::new(position.x as f32, bob, position.z as f32);
        } else {
            commands.entity(entity).despawn();
            mappings.pedestrians.remove(&link.0);
        }
    }

    for walker in pedestrians.agents() {
        if !existing.contains(&walker.id) {
            spawn_pedestrian_visual(&mut commands, &mut meshes, &mut materials, walker, &mut mappings);
        }
    }
}

/// Swing legs and arms from each walker's gait
pub fn animate_limbs(sim_world: Res<SimWorldResource>, mut limb_query: Query<(&Limb, &mut Transform)>) {
    for (limb, mut transform) in limb_query.iter_mut() {
        let Some(walker) = sim_world.0.pedestrians.get(limb.owner) else {
            continue;
        };
        let gait = walker.gait();
        let (pitch, tilt) = match limb.kind {
            LimbKind::LeftLeg => (gait.leg_swing, 0.0),
            LimbKind::RightLeg => (-gait.leg_swing, 0.0),
            LimbKind::LeftArm => (-gait.arm_swing, 0.3),
            LimbKind::RightArm => (gait.arm_swing, -0.3),
        };
        transform.rotation = Quat::from_euler(EulerRot::XYZ, pitch as f32, 0.0, tilt);
    }
}

/// Show the beacon over the active waypoint, spinning and bobbing
pub fn update_waypoint_beacon(
    time: Res<Time>,
    sim_world: Res<SimWorldResource>,
    mut beacon_query: Query<(&mut Transform, &mut Visibility), With<WaypointBeacon>>,
) {
    let waypoint = sim_world.0.navigation.active_waypoint();
    let elapsed = time.elapsed_secs();

    for (mut transform, mut visibility) in beacon_query.iter_mut() {
        let Some(waypoint) = waypoint else {
            *visibility = Visibility::Hidden;
            continue;
        };
        *visibility = Visibility::Visible;

        let position = waypoint.landmark.position;
        let bob = (elapsed * 2.0).sin() * 0.5;
        let pulse = 1.0 + (elapsed * 3.0).sin() * 0.1;
        transform.translation = Vec3::new(
            position.x as f32,
            BEACON_HEIGHT / 2.0 + bob,
            position.z as f32,
        );
        transform.rotate_y(time.delta_secs() * 1.2);
        transform.scale = Vec3::new(pulse, 1.0, pulse);
    }
}

/// Refresh the HUD lines
pub fn update_hud_text(sim_world: Res<SimWorldResource>, mut text_query: Query<(&HudText, &mut Text)>) {
    let world = &sim_world.0;
    let state = world.vehicle.state();

    for (marker, mut text) in text_query.iter_mut() {
        match marker {
            HudText::Mode => {
                **text = match world.mode() {
                    DriveMode::Showroom => "SHOWROOM  [Tab] drive".to_string(),
                    DriveMode::Drive => "DRIVE  [Tab] showroom".to_string(),
                };
            }
            HudText::Dashboard => {
                **text = if world.mode() == DriveMode::Drive {
                    world.dashboard().to_string()
                } else {
                    String::new()
                };
            }
            HudText::Navigation => {
                **text = match (
                    world.navigation.active_waypoint(),
                    world.navigation.relative_bearing(&state.position, state.heading),
                    world.navigation.distance_to(&state.position),
                ) {
                    (Some(waypoint), Some(relative), Some(info)) => format!(
                        "{}: {:.2} mi, {:.0}° {}",
                        waypoint.landmark.name,
                        info.distance_miles,
                        relative.abs().to_degrees(),
                        if relative >= 0.0 { "left" } else { "right" }
                    ),
                    _ => "[1-5] pick a destination".to_string(),
                };
            }
            HudText::Session => {
                let stats = &world.stats;
                **text = format!(
                    "Traffic {} | Pedestrians {} | Bumps {} | Arrivals {}",
                    world.traffic.len(),
                    world.pedestrians.len(),
                    stats.obstacle_bumps + stats.traffic_hits,
                    stats.arrivals
                );
            }
        }
    }
}
