//! Generic state-table interpreter.
//!
//! Each entity owns a [`StateMachine`]: a table with one [`StateConfig`] slot
//! per [`State`], plus previous/current bookkeeping. Event handling and
//! per-tick updates are delegated to the active state's [`StateBehavior`];
//! behaviors *return* the transition they want instead of mutating the
//! machine re-entrantly, so transition validation stays in exactly one place
//! ([`StateMachine::request_transition`]) and a handler can never recurse
//! into the state it is leaving.

use thiserror::Error;
use tracing::{debug, warn};

use crate::entity::Body;
use crate::events::Event;

/// All discrete states an entity can be in. The set is closed per build;
/// which states a given entity kind actually implements is decided by its
/// state table (unimplemented slots are explicit [`StateConfig::Empty`]
/// placeholders).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum State {
    Idle,
    Walking,
    Attacking,
    Shield,
    Dead,
    Respawn,
    Collision,
    MovingUp,
    MovingDown,
    MovingLeft,
    MovingRight,
}

impl State {
    /// Table-size bound; not a state.
    pub const COUNT: usize = 11;

    pub const ALL: [State; State::COUNT] = [
        State::Idle,
        State::Walking,
        State::Attacking,
        State::Shield,
        State::Dead,
        State::Respawn,
        State::Collision,
        State::MovingUp,
        State::MovingDown,
        State::MovingLeft,
        State::MovingRight,
    ];
}

/// Per-state game logic for one (entity kind, state) pair.
///
/// Every method has a no-op default, preserving "missing callback = no-op":
/// an implementation only overrides the hooks its state actually uses.
/// `handle_event` and `on_update` request a transition by returning the
/// target state; `on_enter`/`on_exit` may mutate the body (select an
/// animation, reset a timer) but cannot transition.
pub trait StateBehavior {
    /// React to an event; may request a transition as its tail action.
    fn handle_event(&mut self, body: &mut Body, event: Event) -> Option<State> {
        let _ = (body, event);
        None
    }

    /// Called once when the machine enters this state.
    fn on_enter(&mut self, body: &mut Body) {
        let _ = body;
    }

    /// Per-tick simulation: position integration, animation advance,
    /// self-triggered transitions.
    fn on_update(&mut self, body: &mut Body, dt: f32) -> Option<State> {
        let _ = (body, dt);
        None
    }

    /// Called once when the machine leaves this state.
    fn on_exit(&mut self, body: &mut Body) {
        let _ = body;
    }
}

/// One slot of a state table.
///
/// The two-variant shape makes the "partially filled config" defect
/// unrepresentable: a slot is either fully defined (name, behavior,
/// transition whitelist) or an explicit inert placeholder.
pub enum StateConfig {
    /// Declared but unimplemented. Dispatch and tick on this state are
    /// no-ops by design, not errors.
    Empty,
    Defined {
        name: &'static str,
        behavior: Box<dyn StateBehavior>,
        /// States reachable from this one. Membership only; order carries
        /// no meaning. Never contains the state itself — staying put is
        /// simply "no transition requested".
        next_states: Box<[State]>,
    },
}

/// Rejected at table-construction time. An entity cannot exist without a
/// valid table, so callers treat this as fatal.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    #[error("state {0:?} lists itself as a transition target")]
    SelfTransition(State),
    #[error("state {0:?} defined twice")]
    Redefined(State),
    #[error("state {from:?} whitelists {to:?}, which is an empty placeholder")]
    UndefinedTarget { from: State, to: State },
}

/// A transition request that is not on the current state's whitelist.
/// Recoverable: the machine is left untouched and the caller proceeds.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("no transition from {from:?} to {to:?}")]
pub struct TransitionError {
    pub from: State,
    pub to: State,
}

/// Owned array of state configurations, one per [`State`]. Each entity owns
/// its own table instance even when two entities share identical rules, so
/// future divergence stays cheap.
pub struct StateTable {
    configs: [StateConfig; State::COUNT],
}

impl StateTable {
    pub fn builder() -> StateTableBuilder {
        StateTableBuilder {
            configs: std::array::from_fn(|_| StateConfig::Empty),
        }
    }
}

/// Builds a [`StateTable`] slot by slot; anything not defined stays an
/// explicit empty placeholder.
pub struct StateTableBuilder {
    configs: [StateConfig; State::COUNT],
}

impl StateTableBuilder {
    pub fn define(
        mut self,
        state: State,
        name: &'static str,
        behavior: Box<dyn StateBehavior>,
        next_states: &[State],
    ) -> Result<Self, TableError> {
        if next_states.contains(&state) {
            return Err(TableError::SelfTransition(state));
        }
        if !matches!(self.configs[state as usize], StateConfig::Empty) {
            return Err(TableError::Redefined(state));
        }
        self.configs[state as usize] = StateConfig::Defined {
            name,
            behavior,
            next_states: next_states.into(),
        };
        Ok(self)
    }

    /// Finish the table, checking that every whitelisted target is itself a
    /// defined state: a transition into an empty placeholder would strand
    /// the machine in a state that cannot react to anything.
    pub fn build(self) -> Result<StateTable, TableError> {
        for state in State::ALL {
            if let StateConfig::Defined { next_states, .. } = &self.configs[state as usize] {
                for &target in next_states.iter() {
                    if matches!(self.configs[target as usize], StateConfig::Empty) {
                        return Err(TableError::UndefinedTarget { from: state, to: target });
                    }
                }
            }
        }
        Ok(StateTable {
            configs: self.configs,
        })
    }
}

/// The FSM engine: current/previous state plus the owning entity's table.
///
/// `previous` starts as `None` (the construction sentinel), so the very
/// first entry into the initial state is always detectable as a real change
/// by behaviors that compare previous against current.
pub struct StateMachine {
    table: StateTable,
    current: State,
    previous: Option<State>,
}

impl StateMachine {
    /// Create a machine forced into `initial`, bypassing transition
    /// validation. The initial state's Entry callback is *not* run here —
    /// call [`start`](Self::start) once the body exists, since the normal
    /// transition path only fires on real transitions.
    pub fn new(table: StateTable, initial: State) -> Self {
        Self {
            table,
            current: initial,
            previous: None,
        }
    }

    /// Run the initial state's Entry callback. Called exactly once, by the
    /// entity constructor.
    pub fn start(&mut self, body: &mut Body) {
        if let StateConfig::Defined { name, behavior, .. } =
            &mut self.table.configs[self.current as usize]
        {
            debug!(state = *name, "initial state entered");
            behavior.on_enter(body);
        }
    }

    pub fn current(&self) -> State {
        self.current
    }

    pub fn previous(&self) -> Option<State> {
        self.previous
    }

    /// Display name of the current state, if it is defined.
    pub fn current_name(&self) -> Option<&'static str> {
        match &self.table.configs[self.current as usize] {
            StateConfig::Empty => None,
            StateConfig::Defined { name, .. } => Some(name),
        }
    }

    /// True iff `target` is on the current state's transition whitelist.
    pub fn can_transition(&self, target: State) -> bool {
        match &self.table.configs[self.current as usize] {
            StateConfig::Empty => false,
            StateConfig::Defined { next_states, .. } => next_states.contains(&target),
        }
    }

    /// Forward an event to the active state's handler, then perform any
    /// transition the handler requested. A no-op on empty placeholder
    /// states.
    pub fn dispatch(&mut self, body: &mut Body, event: Event) {
        let requested = match &mut self.table.configs[self.current as usize] {
            StateConfig::Empty => return,
            StateConfig::Defined { behavior, .. } => behavior.handle_event(body, event),
        };
        if let Some(target) = requested {
            // Already reported inside request_transition; the event is
            // simply ignored in that case.
            let _ = self.request_transition(body, target);
        }
    }

    /// Run the active state's Update callback, then perform any
    /// self-triggered transition it requested (e.g. Dead auto-advancing).
    pub fn tick(&mut self, body: &mut Body, dt: f32) {
        let requested = match &mut self.table.configs[self.current as usize] {
            StateConfig::Empty => return,
            StateConfig::Defined { behavior, .. } => behavior.on_update(body, dt),
        };
        if let Some(target) = requested {
            let _ = self.request_transition(body, target);
        }
    }

    /// The only state-mutating primitive. On success: Exit(current),
    /// previous = current, current = target, Entry(target), in that order.
    /// On failure the machine and body are untouched and the error has
    /// already been reported.
    pub fn request_transition(
        &mut self,
        body: &mut Body,
        target: State,
    ) -> Result<(), TransitionError> {
        if !self.can_transition(target) {
            let err = TransitionError {
                from: self.current,
                to: target,
            };
            warn!(from = ?err.from, to = ?err.to, "rejected state transition");
            return Err(err);
        }

        if let StateConfig::Defined { behavior, .. } =
            &mut self.table.configs[self.current as usize]
        {
            behavior.on_exit(body);
        }
        self.previous = Some(self.current);
        self.current = target;
        if let StateConfig::Defined { name, behavior, .. } =
            &mut self.table.configs[self.current as usize]
        {
            debug!(state = *name, "entering state");
            behavior.on_enter(body);
        }
        Ok(())
    }
}
