use crate::events::Direction;

/// Raw intent produced by an input device or an AI policy.
///
/// Commands say *what happened*; the mediator translates them into [`Event`]s
/// so that input and AI code never touch the state machines directly.
///
/// [`Event`]: crate::events::Event
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    None,
    Move(Direction),
    Attack,
    Defend,
    CollisionStart,
    CollisionEnd,
}
