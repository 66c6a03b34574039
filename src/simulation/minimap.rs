//! Player-centred top-down projection for the minimap

use super::types::Position;

/// Projects world positions onto a square map centred on the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapProjector {
    /// Side length of the map in map units
    pub size: f64,
    /// World units per map unit
    pub scale: f64,
}

impl Default for MinimapProjector {
    fn default() -> Self {
        Self {
            size: 200.0,
            scale: 2.5,
        }
    }
}

impl MinimapProjector {
    pub fn new(size: f64, scale: f64) -> Self {
        debug_assert!(scale > 0.0, "minimap scale must be positive");
        Self { size, scale }
    }

    /// Map coordinates `(x, y)` of `world`, with `center` at the middle.
    /// World +Z maps to map +y.
    pub fn world_to_minimap(&self, world: &Position, center: &Position) -> (f64, f64) {
        let half = self.size / 2.0;
        (
            half + (world.x - center.x) / self.scale,
            half + (world.z - center.z) / self.scale,
        )
    }

    /// Whether a box of the given size centred at `(x, y)` touches the map
    pub fn is_visible(&self, x: f64, y: f64, width: f64, height: f64) -> bool {
        !(x + width / 2.0 < 0.0
            || x - width / 2.0 > self.size
            || y + height / 2.0 < 0.0
            || y - height / 2.0 > self.size)
    }
}
