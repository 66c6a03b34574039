//! Input handling systems

use bevy::prelude::*;

use super::components::{PlayerInput, SimWorldResource};
use crate::simulation::DriveInput;

/// Destinations bound to the number row, in key order
pub const DESTINATION_KEYS: [(KeyCode, &str); 5] = [
    (KeyCode::Digit1, "Walmart"),
    (KeyCode::Digit2, "Starbucks"),
    (KeyCode::Digit3, "City Center"),
    (KeyCode::Digit4, "Gas"),
    (KeyCode::Digit5, "Fast Food"),
];

/// Poll the driving keys into the shared input state
pub fn collect_drive_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<PlayerInput>) {
    let held = |keys: &[KeyCode]| keys.iter().any(|key| keyboard.pressed(*key));
    input.0 = DriveInput {
        forward: held(&[KeyCode::KeyW, KeyCode::ArrowUp]),
        backward: held(&[KeyCode::KeyS, KeyCode::ArrowDown]),
        left: held(&[KeyCode::KeyA, KeyCode::ArrowLeft]),
        right: held(&[KeyCode::KeyD, KeyCode::ArrowRight]),
        brake: held(&[KeyCode::Space, KeyCode::ShiftLeft, KeyCode::ShiftRight]),
    };
}

/// Mode toggle, destination picking and exit
pub fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut sim_world: ResMut<SimWorldResource>,
    mut exit: MessageWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }

    if keyboard.just_pressed(KeyCode::Tab) {
        let mode = sim_world.0.toggle_mode();
        info!("Switched to {:?} mode", mode);
    }

    for (key, name) in DESTINATION_KEYS {
        if keyboard.just_pressed(key) {
            sim_world.0.set_destination(name);
        }
    }
    if keyboard.just_pressed(KeyCode::Digit0) {
        sim_world.0.clear_destination();
    }
}
