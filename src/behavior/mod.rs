//! State behavior implementations for the two entity kinds, plus the
//! sprite-sheet helpers they share.

pub mod npc;
pub mod player;

pub use npc::Npc;
pub use player::Player;

use glam::Vec2;

use crate::animation::FrameRect;
use crate::events::Direction;

/// Cut `count` cells of `cell`x`cell` pixels out of the sheet row at
/// pixel offset `y`, left to right.
pub(crate) fn sheet_row(y: f32, count: usize, cell: f32) -> Vec<FrameRect> {
    (0..count)
        .map(|i| FrameRect {
            x: i as f32 * cell,
            y,
            w: cell,
            h: cell,
        })
        .collect()
}

/// Collapse a velocity into one of the four sheet facings. Vertical wins
/// over horizontal so diagonal movement shows the up/down rows; a zero
/// velocity faces the camera.
pub(crate) fn facing(velocity: Vec2) -> Direction {
    if velocity.y < 0.0 {
        Direction::Up
    } else if velocity.y > 0.0 {
        Direction::Down
    } else if velocity.x < 0.0 {
        Direction::Left
    } else if velocity.x > 0.0 {
        Direction::Right
    } else {
        Direction::Down
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_row_steps_by_cell_width() {
        let frames = sheet_row(512.0, 3, 64.0);
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].x, 0.0);
        assert_eq!(frames[2].x, 128.0);
        assert!(frames.iter().all(|f| f.y == 512.0 && f.w == 64.0 && f.h == 64.0));
    }

    #[test]
    fn facing_prefers_vertical_axis() {
        let d = std::f32::consts::FRAC_1_SQRT_2;
        assert_eq!(facing(Vec2::new(-d, -d)), Direction::Up);
        assert_eq!(facing(Vec2::new(d, d)), Direction::Down);
        assert_eq!(facing(Vec2::new(-1.0, 0.0)), Direction::Left);
        assert_eq!(facing(Vec2::ZERO), Direction::Down);
    }
}
