//! Grid collision: axis-separated slide against `TileMap::is_solid`.

use glam::Vec2;

use crate::world::TileMap;

/// Collision half-extent of the player in map units.
pub const PLAYER_RADIUS: f32 = 0.2;

/// What the caller gets back.
pub struct MoveResult {
    pub pos: Vec2,      // final XY
    pub hit_wall: bool, // touched anything solid
}

/// Does a square of half-size `radius` at `p` overlap a solid cell?
#[inline]
pub fn blocked(map: &TileMap, p: Vec2, radius: f32) -> bool {
    [
        Vec2::new(-radius, -radius),
        Vec2::new(radius, -radius),
        Vec2::new(-radius, radius),
        Vec2::new(radius, radius),
    ]
    .iter()
    .any(|&o| map.is_solid(p + o))
}

/// Move by `delta`, sliding along walls instead of stopping dead.
pub fn slide_move(map: &TileMap, mut pos: Vec2, delta: Vec2, radius: f32) -> MoveResult {
    const SLICE_COUNT: i32 = 4; // quarter steps so fast moves cannot tunnel
    let slice = delta / SLICE_COUNT as f32;
    let mut touched = false;

    for _ in 0..SLICE_COUNT {
        let along_x = Vec2::new(pos.x + slice.x, pos.y);
        if slice.x != 0.0 {
            if blocked(map, along_x, radius) {
                touched = true;
            } else {
                pos = along_x;
            }
        }
        let along_y = Vec2::new(pos.x, pos.y + slice.y);
        if slice.y != 0.0 {
            if blocked(map, along_y, radius) {
                touched = true;
            } else {
                pos = along_y;
            }
        }
    }

    MoveResult {
        pos,
        hit_wall: touched,
    }
}
