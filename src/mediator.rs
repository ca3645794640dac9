//! Command-to-event mediation.
//!
//! Input producers (the demo's command script, the AI policies) speak
//! [`Command`]; state machines speak [`Event`]. The mediator owns the
//! mapping and is bound to a single entity by name, so a command routed
//! to the wrong entity is dropped instead of misfiring.

use tracing::warn;

use crate::command::Command;
use crate::entity::Entity;
use crate::events::Event;

/// Translate one command into the event the state machines consume.
/// Collision commands carry gameplay meaning here: touching an enemy is
/// lethal contact, separating permits respawn.
pub fn translate(command: Command) -> Event {
    match command {
        Command::None => Event::None,
        Command::Move(direction) => Event::Move(direction),
        Command::Attack => Event::Attack,
        Command::Defend => Event::Defend,
        Command::CollisionStart => Event::Die,
        Command::CollisionEnd => Event::Respawn,
    }
}

pub struct Mediator {
    bound: String,
}

impl Mediator {
    /// Bind to `entity` by name; the binding outlives borrows of the entity.
    pub fn bind(entity: &Entity) -> Self {
        Self {
            bound: entity.body.name.clone(),
        }
    }

    /// Translate and dispatch `command` to `entity`, provided it is the
    /// bound one.
    pub fn execute(&self, command: Command, entity: &mut Entity) {
        if entity.body.name != self.bound {
            warn!(
                bound = %self.bound,
                got = %entity.body.name,
                "command routed to unbound entity, dropping"
            );
            return;
        }
        entity.dispatch(translate(command));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::Player;
    use crate::events::Direction;
    use crate::fsm::State;

    #[test]
    fn command_event_mapping() {
        assert_eq!(translate(Command::None), Event::None);
        assert_eq!(
            translate(Command::Move(Direction::Left)),
            Event::Move(Direction::Left)
        );
        assert_eq!(translate(Command::Attack), Event::Attack);
        assert_eq!(translate(Command::Defend), Event::Defend);
        assert_eq!(translate(Command::CollisionStart), Event::Die);
        assert_eq!(translate(Command::CollisionEnd), Event::Respawn);
    }

    #[test]
    fn unbound_entity_is_left_untouched() {
        let bound = Player::spawn("hero", 1).expect("table");
        let mut other = Player::spawn("impostor", 2).expect("table");
        let mediator = Mediator::bind(&bound.entity);

        mediator.execute(Command::Attack, &mut other.entity);
        assert_eq!(other.entity.fsm.current(), State::Idle);
    }

    #[test]
    fn bound_entity_receives_translated_event() {
        let mut p = Player::spawn("hero", 1).expect("table");
        let mediator = Mediator::bind(&p.entity);

        mediator.execute(Command::Move(Direction::Down), &mut p.entity);
        assert_eq!(p.entity.fsm.current(), State::Walking);
    }
}
