//! Systems for spawning visual entities from simulation state

use bevy::prelude::*;

use super::components::{
    EntityMappings, HudText, Limb, LimbKind, PedestrianLink, PendingModel, PlayerPlaceholder,
    PlayerVehicle, SimSynced, SimWorldResource, TrafficLink, WaypointBeacon,
};
use crate::simulation::{
    Building, BuildingStyle, PedestrianAgent, Prop, PropKind, Surface, SurfaceKind, TrafficAgent,
};

/// Path of the player's vehicle model, relative to the assets folder
pub const VEHICLE_MODEL_PATH: &str = "models/truck.glb";

/// Height of the waypoint beacon column
pub const BEACON_HEIGHT: f32 = 15.0;

const TRAFFIC_COLORS: [Color; 6] = [
    Color::srgb(0.8, 0.1, 0.1),
    Color::srgb(0.1, 0.3, 0.8),
    Color::srgb(0.9, 0.9, 0.9),
    Color::srgb(0.15, 0.15, 0.15),
    Color::srgb(0.6, 0.6, 0.65),
    Color::srgb(0.1, 0.5, 0.2),
];

const CLOTHING_COLORS: [Color; 10] = [
    Color::srgb(0.10, 0.37, 0.71),
    Color::srgb(0.15, 0.64, 0.41),
    Color::srgb(0.88, 0.11, 0.14),
    Color::srgb(0.96, 0.83, 0.18),
    Color::srgb(0.57, 0.25, 0.67),
    Color::srgb(1.00, 0.47, 0.00),
    Color::srgb(0.24, 0.22, 0.27),
    Color::srgb(0.75, 0.75, 0.74),
    Color::srgb(0.53, 0.37, 0.24),
    Color::srgb(0.18, 0.76, 0.49),
];

/// System to create the static corridor from the world layout
pub fn spawn_layout_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sim_world: Res<SimWorldResource>,
) {
    let layout = &sim_world.0.layout;

    for surface in &layout.surfaces {
        spawn_surface(&mut commands, &mut meshes, &mut materials, surface);
    }
    for building in &layout.buildings {
        spawn_building(&mut commands, &mut meshes, &mut materials, building);
    }
    for prop in &layout.props {
        spawn_prop(&mut commands, &mut meshes, &mut materials, prop);
    }
}

fn spawn_surface(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    surface: &Surface,
) {
    // Stacked slightly so overlapping surfaces don't z-fight
    let (color, y) = match surface.kind {
        SurfaceKind::ParkingLot => (Color::srgb(0.25, 0.25, 0.27), 0.01),
        SurfaceKind::Road => (Color::srgb(0.2, 0.2, 0.2), 0.02),
        SurfaceKind::CrossStreet => (Color::srgb(0.22, 0.22, 0.22), 0.03),
        SurfaceKind::Sidewalk => (Color::srgb(0.6, 0.6, 0.6), 0.15),
    };
    let thickness = 0.02;
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(
            surface.width as f32,
            thickness,
            surface.length as f32,
        ))),
        MeshMaterial3d(materials.add(color)),
        Transform::from_xyz(surface.center.x as f32, y, surface.center.z as f32),
    ));
}

fn building_color(style: BuildingStyle) -> Color {
    match style {
        BuildingStyle::Walmart => Color::srgb(0.1, 0.31, 0.6),
        BuildingStyle::Starbucks => Color::srgb(0.0, 0.46, 0.29),
        BuildingStyle::Generic => Color::srgb(0.7, 0.65, 0.55),
        BuildingStyle::Target => Color::srgb(0.8, 0.0, 0.0),
        BuildingStyle::BestBuy => Color::srgb(0.0, 0.27, 0.55),
        BuildingStyle::Kohls => Color::srgb(0.35, 0.35, 0.35),
        BuildingStyle::Canopy => Color::srgb(0.9, 0.9, 0.9),
        BuildingStyle::McDonalds => Color::srgb(0.85, 0.15, 0.1),
        BuildingStyle::Wendys => Color::srgb(0.8, 0.2, 0.25),
        BuildingStyle::ChickFilA => Color::srgb(0.9, 0.85, 0.8),
    }
}

fn spawn_building(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    building: &Building,
) {
    let height = building.height as f32;
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(
            building.width as f32,
            height,
            building.depth as f32,
        ))),
        MeshMaterial3d(materials.add(building_color(building.style))),
        Transform::from_xyz(
            building.center.x as f32,
            building.elevation as f32 + height / 2.0,
            building.center.z as f32,
        ),
    ));
}

fn spawn_prop(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    prop: &Prop,
) {
    let (mesh, color, height) = match prop.kind {
        PropKind::StreetLight => (Cylinder::new(0.15, 8.0), Color::srgb(0.3, 0.3, 0.3), 8.0),
        PropKind::PowerPole => (Cylinder::new(0.2, 10.0), Color::srgb(0.4, 0.3, 0.2), 10.0),
        PropKind::Tree => (Cylinder::new(1.5, 6.0), Color::srgb(0.15, 0.45, 0.15), 6.0),
        PropKind::TrafficLight => (Cylinder::new(0.2, 6.0), Color::srgb(0.2, 0.2, 0.1), 6.0),
    };
    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(color)),
        Transform::from_xyz(prop.position.x as f32, height / 2.0, prop.position.z as f32),
    ));
}

/// Spawn the player's vehicle with a placeholder body and start loading
/// the real model. The placeholder is usable immediately.
pub fn spawn_player(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
) {
    let model = asset_server.load(GltfAssetLabel::Scene(0).from_asset(VEHICLE_MODEL_PATH));

    commands
        .spawn((
            PlayerVehicle,
            PendingModel(model),
            Transform::default(),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                PlayerPlaceholder,
                Mesh3d(meshes.add(Cuboid::new(2.4, 1.5, 5.0))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgb(0.75, 0.76, 0.78),
                    metallic: 0.9,
                    perceptual_roughness: 0.3,
                    ..default()
                })),
                Transform::from_xyz(0.0, 0.75, 0.0),
            ));
        });
}

/// Spawn the (initially hidden) waypoint beacon
pub fn spawn_waypoint_beacon(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let green = Color::srgb(0.0, 1.0, 0.0);
    commands
        .spawn((
            WaypointBeacon,
            Mesh3d(meshes.add(Cylinder::new(0.75, BEACON_HEIGHT))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: green.with_alpha(0.6),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            })),
            Transform::from_xyz(0.0, BEACON_HEIGHT / 2.0, 0.0),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(meshes.add(Sphere::new(1.5))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: green,
                    unlit: true,
                    ..default()
                })),
                Transform::from_xyz(0.0, BEACON_HEIGHT / 2.0, 0.0),
            ));
        });
}

/// Spawn the HUD text panel
pub fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Auto,
                height: Val::Auto,
                position_type: PositionType::Absolute,
                bottom: Val::Px(10.0),
                left: Val::Px(10.0),
                padding: UiRect::all(Val::Px(10.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(5.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ))
        .with_children(|parent| {
            for (marker, size, color) in [
                (HudText::Mode, 18.0, Color::srgb(1.0, 1.0, 0.5)),
                (HudText::Dashboard, 16.0, Color::srgb(0.2, 1.0, 0.2)),
                (HudText::Navigation, 14.0, Color::srgb(0.9, 0.9, 0.9)),
                (HudText::Session, 14.0, Color::srgb(0.9, 0.9, 0.9)),
            ] {
                parent.spawn((
                    Text::new(""),
                    TextFont {
                        font_size: size,
                        ..default()
                    },
                    TextColor(color),
                    marker,
                ));
            }
        });
}

/// Spawn a single traffic vehicle visual
pub fn spawn_traffic_visual(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    agent: &TrafficAgent,
    mappings: &mut ResMut<EntityMappings>,
) {
    let color = TRAFFIC_COLORS[agent.id.0 .0 % TRAFFIC_COLORS.len()];
    let position = agent.position();

    let entity = commands
        .spawn((
            SimSynced,
            TrafficLink(agent.id),
            Transform::from_xyz(position.x as f32, 0.0, position.z as f32)
                .with_rotation(Quat::from_rotation_y(agent.heading() as f32)),
            Visibility::default(),
        ))
        .with_children(|parent| {
            // Body
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::new(2.0, 1.2, 4.0))),
                MeshMaterial3d(materials.add(color)),
                Transform::from_xyz(0.0, 0.8, 0.0),
            ));
            // Cabin
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::new(1.8, 0.7, 2.0))),
                MeshMaterial3d(materials.add(Color::srgb(0.1, 0.1, 0.15))),
                Transform::from_xyz(0.0, 1.75, -0.3),
            ));
        })
        .id();
    mappings.traffic.insert(agent.id, entity);
}

/// Spawn a single pedestrian with animated limbs
pub fn spawn_pedestrian_visual(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    walker: &PedestrianAgent,
    mappings: &mut ResMut<EntityMappings>,
) {
    let clothing = materials.add(CLOTHING_COLORS[walker.id.0 .0 % CLOTHING_COLORS.len()]);
    let skin = materials.add(Color::srgb(0.99, 0.74, 0.71));
    let trousers = materials.add(Color::srgb(0.16, 0.16, 0.23));
    let leg = meshes.add(Capsule3d::new(0.12, 0.6));
    let arm = meshes.add(Capsule3d::new(0.08, 0.5));
    let position = walker.position();
    let owner = walker.id;

    let entity = commands
        .spawn((
            SimSynced,
            PedestrianLink(walker.id),
            Transform::from_xyz(position.x as f32, 0.0, position.z as f32)
                .with_rotation(Quat::from_rotation_y(walker.heading() as f32)),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(meshes.add(Capsule3d::new(0.3, 0.8))),
                MeshMaterial3d(clothing.clone()),
                Transform::from_xyz(0.0, 1.2, 0.0),
            ));
            parent.spawn((
                Mesh3d(meshes.add(Sphere::new(0.25))),
                MeshMaterial3d(skin.clone()),
                Transform::from_xyz(0.0, 1.9, 0.0),
            ));
            for (kind, x) in [(LimbKind::LeftLeg, -0.15), (LimbKind::RightLeg, 0.15)] {
                parent.spawn((
                    Limb { owner, kind },
                    Mesh3d(leg.clone()),
                    MeshMaterial3d(trousers.clone()),
                    Transform::from_xyz(x, 0.5, 0.0),
                ));
            }
            for (kind, x, tilt) in [
                (LimbKind::LeftArm, -0.4, 0.3),
                (LimbKind::RightArm, 0.4, -0.3),
            ] {
                parent.spawn((
                    Limb { owner, kind },
                    Mesh3d(arm.clone()),
                    MeshMaterial3d(clothing.clone()),
                    Transform::from_xyz(x, 1.2, 0.0).with_rotation(Quat::from_rotation_z(tilt)),
                ));
            }
        })
        .id();
    mappings.pedestrians.insert(walker.id, entity);
}
