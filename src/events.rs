use glam::Vec2;

/// Eight-way movement direction carried by move commands and events.
///
/// Screen coordinates: +y points down, so `Up` is `(0, -1)`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// Unit-length movement vector for this direction (diagonals normalized).
    pub fn unit_vector(self) -> Vec2 {
        const DIAG: f32 = std::f32::consts::FRAC_1_SQRT_2;
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::UpLeft => Vec2::new(-DIAG, -DIAG),
            Direction::UpRight => Vec2::new(DIAG, -DIAG),
            Direction::DownLeft => Vec2::new(-DIAG, DIAG),
            Direction::DownRight => Vec2::new(DIAG, DIAG),
        }
    }

    /// Collapse diagonals to a cardinal direction, vertical axis first.
    /// Used by the NPC, whose Moving states are cardinal-only.
    pub fn cardinal(self) -> Direction {
        match self {
            Direction::UpLeft | Direction::UpRight => Direction::Up,
            Direction::DownLeft | Direction::DownRight => Direction::Down,
            other => other,
        }
    }
}

/// Semantic trigger fed into an entity's state machine.
///
/// Produced only by the mediator (from commands) and the collision step in
/// the game loop; state behaviors signal self-generated transitions by
/// returning a target state, never by constructing events.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Event {
    None,
    Move(Direction),
    Attack,
    Defend,
    Die,
    Respawn,
    CollisionStart,
    CollisionEnd,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_vectors_are_unit_length() {
        for dir in [
            Direction::UpLeft,
            Direction::UpRight,
            Direction::DownLeft,
            Direction::DownRight,
        ] {
            assert!((dir.unit_vector().length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn diagonals_collapse_to_vertical_cardinal() {
        assert_eq!(Direction::UpLeft.cardinal(), Direction::Up);
        assert_eq!(Direction::UpRight.cardinal(), Direction::Up);
        assert_eq!(Direction::DownLeft.cardinal(), Direction::Down);
        assert_eq!(Direction::DownRight.cardinal(), Direction::Down);
        assert_eq!(Direction::Left.cardinal(), Direction::Left);
    }
}
