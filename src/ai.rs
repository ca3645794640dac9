//! Command policies for computer-controlled entities. A policy only
//! produces [`Command`]s; the game loop decides when to poll it and the
//! mediator turns the result into state-machine events.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::command::Command;
use crate::entity::Body;
use crate::events::Direction;

/// Distance under which the chase policy reacts to its target at all.
pub const CHASE_RANGE: f32 = 300.0;

pub trait CommandSource {
    /// Decide the next command given this entity's body and the body it
    /// is reacting to.
    fn poll(&mut self, own: &Body, other: &Body) -> Command;
}

/// Closes the gap to the target one axis at a time, vertical first.
/// Outside [`CHASE_RANGE`] it goes passive rather than wandering.
pub struct ChasePolicy;

impl CommandSource for ChasePolicy {
    fn poll(&mut self, own: &Body, other: &Body) -> Command {
        let delta = other.position - own.position;
        if delta.length() > CHASE_RANGE {
            return Command::None;
        }
        let command = if delta.y < 0.0 {
            Command::Move(Direction::Up)
        } else if delta.y > 0.0 {
            Command::Move(Direction::Down)
        } else if delta.x < 0.0 {
            Command::Move(Direction::Left)
        } else if delta.x > 0.0 {
            Command::Move(Direction::Right)
        } else {
            Command::None
        };
        trace!(?command, "chase policy decision");
        command
    }
}

/// Uniformly random pick over the basic command pool. Seeded, so demo
/// runs are reproducible.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

const RANDOM_POOL: [Command; 7] = [
    Command::None,
    Command::Move(Direction::Up),
    Command::Move(Direction::Down),
    Command::Move(Direction::Left),
    Command::Move(Direction::Right),
    Command::Attack,
    Command::Defend,
];

impl CommandSource for RandomPolicy {
    fn poll(&mut self, _own: &Body, _other: &Body) -> Command {
        RANDOM_POOL[self.rng.gen_range(0..RANDOM_POOL.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Color;
    use glam::Vec2;

    fn body_at(position: Vec2) -> Body {
        Body::new("b", position, 10.0, Color::GREEN)
    }

    #[test]
    fn chase_prefers_vertical_axis() {
        let mut policy = ChasePolicy;
        let own = body_at(Vec2::new(400.0, 300.0));

        let above = body_at(Vec2::new(350.0, 200.0));
        assert_eq!(policy.poll(&own, &above), Command::Move(Direction::Up));

        let level_left = body_at(Vec2::new(350.0, 300.0));
        assert_eq!(policy.poll(&own, &level_left), Command::Move(Direction::Left));
    }

    #[test]
    fn chase_goes_passive_out_of_range() {
        let mut policy = ChasePolicy;
        let own = body_at(Vec2::ZERO);
        let far = body_at(Vec2::new(0.0, CHASE_RANGE + 1.0));
        assert_eq!(policy.poll(&own, &far), Command::None);
    }

    #[test]
    fn random_policy_is_reproducible() {
        let own = body_at(Vec2::ZERO);
        let other = body_at(Vec2::ONE);
        let mut a = RandomPolicy::new(42);
        let mut b = RandomPolicy::new(42);
        for _ in 0..32 {
            assert_eq!(a.poll(&own, &other), b.poll(&own, &other));
        }
    }
}
