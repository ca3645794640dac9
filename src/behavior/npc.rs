//! NPC state behaviors and table. The NPC splits movement into four
//! cardinal states rather than one parameterized Walking state, and its
//! death skips the Respawn state entirely: leaving Dead restores the body.

use glam::Vec2;
use tracing::trace;

use crate::behavior::sheet_row;
use crate::entity::{Body, Color, Entity, EntityKind, MAX_HEALTH};
use crate::events::{Direction, Event};
use crate::fsm::{State, StateBehavior, StateTable, TableError};

pub const NPC_SPAWN: Vec2 = Vec2::new(400.0, 100.0);
/// Where the NPC comes back after dying; offset from spawn so the fight
/// does not immediately restart on top of the player.
pub const NPC_RESPAWN: Vec2 = Vec2::new(450.0, 450.0);
const COLLIDER_RADIUS: f32 = 10.0;

const SPRITE_CELL: f32 = 64.0;
const ATTACK_CELL: f32 = 192.0;

const IDLE_ROW: f32 = 128.0;
const IDLE_FRAMES: usize = 6;
const IDLE_FRAME_DURATION: f32 = 0.2;
const WALK_FRAMES: usize = 9;
const WALK_FRAME_DURATION: f32 = 0.1;
const ATTACK_FRAMES: usize = 6;
const ATTACK_FRAME_DURATION: f32 = 0.1;

fn walk_row(direction: Direction) -> f32 {
    match direction {
        Direction::Up => 512.0,
        Direction::Left => 576.0,
        Direction::Down => 640.0,
        Direction::Right => 704.0,
        Direction::UpLeft | Direction::UpRight => 512.0,
        Direction::DownLeft | Direction::DownRight => 640.0,
    }
}

fn attack_row(direction: Direction) -> f32 {
    match direction {
        Direction::Up | Direction::UpLeft | Direction::UpRight => 2952.0,
        Direction::Left => 3144.0,
        Direction::Down | Direction::DownLeft | Direction::DownRight => 3336.0,
        Direction::Right => 3528.0,
    }
}

/// Map a movement direction to the cardinal movement state handling it.
fn moving_state(direction: Direction) -> State {
    match direction.cardinal() {
        Direction::Up => State::MovingUp,
        Direction::Down => State::MovingDown,
        Direction::Left => State::MovingLeft,
        _ => State::MovingRight,
    }
}

struct NpcIdle;

impl StateBehavior for NpcIdle {
    fn on_enter(&mut self, body: &mut Body) {
        body.animation
            .play(sheet_row(IDLE_ROW, IDLE_FRAMES, SPRITE_CELL), IDLE_FRAME_DURATION, true);
    }

    fn on_update(&mut self, body: &mut Body, dt: f32) -> Option<State> {
        body.animation.advance(dt);
        None
    }

    fn handle_event(&mut self, _body: &mut Body, event: Event) -> Option<State> {
        match event {
            Event::Move(direction) => Some(moving_state(direction)),
            Event::Attack => Some(State::Attacking),
            Event::Defend => Some(State::Shield),
            Event::Die => Some(State::Dead),
            _ => None,
        }
    }
}

/// One behavior instance per cardinal movement state; `direction` decides
/// the heading and the sheet row.
struct NpcMoving {
    direction: Direction,
}

impl StateBehavior for NpcMoving {
    fn on_enter(&mut self, body: &mut Body) {
        body.velocity = self.direction.unit_vector();
        body.animation.play(
            sheet_row(walk_row(self.direction), WALK_FRAMES, SPRITE_CELL),
            WALK_FRAME_DURATION,
            true,
        );
    }

    fn on_update(&mut self, body: &mut Body, dt: f32) -> Option<State> {
        let step = body.velocity;
        body.translate(step);
        body.animation.advance(dt);
        None
    }

    fn handle_event(&mut self, _body: &mut Body, event: Event) -> Option<State> {
        match event {
            Event::None => Some(State::Idle),
            Event::Move(direction) => {
                let target = moving_state(direction);
                if target == moving_state(self.direction) {
                    // Same heading: keep going, no transition to request.
                    None
                } else {
                    Some(target)
                }
            }
            Event::Attack => Some(State::Attacking),
            Event::Defend => Some(State::Shield),
            Event::Die => Some(State::Dead),
            _ => None,
        }
    }
}

struct NpcAttacking;

impl StateBehavior for NpcAttacking {
    fn on_enter(&mut self, body: &mut Body) {
        let row = attack_row(crate::behavior::facing(body.velocity));
        body.animation
            .play(sheet_row(row, ATTACK_FRAMES, ATTACK_CELL), ATTACK_FRAME_DURATION, false);
    }

    fn on_update(&mut self, body: &mut Body, dt: f32) -> Option<State> {
        body.animation.advance(dt);
        None
    }

    fn handle_event(&mut self, _body: &mut Body, event: Event) -> Option<State> {
        match event {
            Event::None => Some(State::Idle),
            Event::Move(direction) => Some(moving_state(direction)),
            Event::Defend => Some(State::Shield),
            Event::Die => Some(State::Dead),
            _ => None,
        }
    }
}

struct NpcShield;

impl StateBehavior for NpcShield {
    fn on_enter(&mut self, body: &mut Body) {
        // Guard with the idle loop rather than whatever the previous
        // state left playing.
        body.animation
            .play(sheet_row(IDLE_ROW, IDLE_FRAMES, SPRITE_CELL), IDLE_FRAME_DURATION, true);
    }

    fn on_update(&mut self, body: &mut Body, dt: f32) -> Option<State> {
        body.animation.advance(dt);
        None
    }

    fn handle_event(&mut self, _body: &mut Body, event: Event) -> Option<State> {
        match event {
            Event::None => Some(State::Idle),
            Event::Die => Some(State::Dead),
            _ => None,
        }
    }
}

/// Dead lasts one tick, then Idle is requested; the restore happens in
/// Exit so it runs exactly once on the way out, whatever comes next.
struct NpcDead;

impl StateBehavior for NpcDead {
    fn on_update(&mut self, _body: &mut Body, _dt: f32) -> Option<State> {
        Some(State::Idle)
    }

    fn on_exit(&mut self, body: &mut Body) {
        body.health = MAX_HEALTH;
        body.place_at(NPC_RESPAWN);
        trace!(name = %body.name, "respawned at fallback point");
    }
}

const MOVING_STATES: [State; 4] = [
    State::MovingUp,
    State::MovingDown,
    State::MovingLeft,
    State::MovingRight,
];

fn moving_whitelist(own: State) -> Vec<State> {
    let mut targets = vec![State::Idle, State::Attacking, State::Shield, State::Dead];
    targets.extend(MOVING_STATES.iter().copied().filter(|&s| s != own));
    targets
}

pub fn npc_table() -> Result<StateTable, TableError> {
    let mut builder = StateTable::builder()
        .define(
            State::Idle,
            "NPC_Idle",
            Box::new(NpcIdle),
            &[
                State::Attacking,
                State::MovingUp,
                State::MovingDown,
                State::MovingLeft,
                State::MovingRight,
                State::Shield,
                State::Dead,
            ],
        )?
        .define(
            State::Attacking,
            "NPC_Attacking",
            Box::new(NpcAttacking),
            &[
                State::Idle,
                State::MovingUp,
                State::MovingDown,
                State::MovingLeft,
                State::MovingRight,
                State::Shield,
                State::Dead,
            ],
        )?
        .define(State::Shield, "NPC_Shield", Box::new(NpcShield), &[State::Idle, State::Dead])?
        .define(State::Dead, "NPC_Dead", Box::new(NpcDead), &[State::Idle])?;

    for (state, direction, name) in [
        (State::MovingUp, Direction::Up, "NPC_Moving_Up"),
        (State::MovingDown, Direction::Down, "NPC_Moving_Down"),
        (State::MovingLeft, Direction::Left, "NPC_Moving_Left"),
        (State::MovingRight, Direction::Right, "NPC_Moving_Right"),
    ] {
        builder = builder.define(
            state,
            name,
            Box::new(NpcMoving { direction }),
            &moving_whitelist(state),
        )?;
    }

    builder.build()
}

/// The computer-controlled entity; `aggression` is a tuning knob read by
/// command policies.
pub struct Npc {
    pub entity: Entity,
    pub aggression: i32,
}

impl Npc {
    pub fn spawn(name: &str) -> Result<Npc, TableError> {
        let table = npc_table()?;
        let entity = Entity::new(
            name,
            EntityKind::Npc,
            NPC_SPAWN,
            COLLIDER_RADIUS,
            Color::GREEN,
            table,
            State::Idle,
        );
        Ok(Npc {
            entity,
            aggression: 50,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn npc() -> Npc {
        Npc::spawn("grunt").expect("npc table")
    }

    #[test]
    fn death_restores_body_and_returns_to_idle() {
        let mut n = npc();
        n.entity.body.health = 5;
        n.entity.body.place_at(Vec2::new(100.0, 200.0));

        n.entity.dispatch(Event::Die);
        assert_eq!(n.entity.fsm.current(), State::Dead);
        // The restore runs on exit, not on entry.
        assert_eq!(n.entity.body.health, 5);

        n.entity.tick(1.0 / 60.0);
        assert_eq!(n.entity.fsm.current(), State::Idle);
        assert_eq!(n.entity.fsm.previous(), Some(State::Dead));
        assert_eq!(n.entity.body.health, MAX_HEALTH);
        assert_eq!(n.entity.body.position, NPC_RESPAWN);
        assert_eq!(n.entity.body.collider.center, NPC_RESPAWN);
    }

    #[test]
    fn diagonal_move_picks_vertical_state() {
        let mut n = npc();
        n.entity.dispatch(Event::Move(Direction::UpLeft));
        assert_eq!(n.entity.fsm.current(), State::MovingUp);
    }

    #[test]
    fn repeated_heading_keeps_moving() {
        let mut n = npc();
        n.entity.dispatch(Event::Move(Direction::Left));
        assert_eq!(n.entity.fsm.current(), State::MovingLeft);

        let before = n.entity.body.position;
        n.entity.dispatch(Event::Move(Direction::Left));
        assert_eq!(n.entity.fsm.current(), State::MovingLeft);

        n.entity.tick(1.0 / 60.0);
        assert_eq!(n.entity.body.position, before + Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn moving_states_switch_between_each_other() {
        let mut n = npc();
        n.entity.dispatch(Event::Move(Direction::Up));
        n.entity.dispatch(Event::Move(Direction::Right));
        assert_eq!(n.entity.fsm.current(), State::MovingRight);
        assert_eq!(n.entity.fsm.previous(), Some(State::MovingUp));
        assert_eq!(n.entity.body.velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn shield_replaces_previous_animation() {
        let mut n = npc();
        n.entity.dispatch(Event::Attack);
        let rect = n.entity.body.animation.current_rect().expect("attack frames");
        assert_eq!(rect.h, ATTACK_CELL);

        n.entity.dispatch(Event::Defend);
        assert_eq!(n.entity.fsm.current(), State::Shield);
        let rect = n.entity.body.animation.current_rect().expect("guard frames");
        assert_eq!(rect.y, IDLE_ROW);
        assert_eq!(rect.h, SPRITE_CELL);
    }

    #[test]
    fn shield_blocks_everything_but_release_and_death() {
        let mut n = npc();
        n.entity.dispatch(Event::Defend);
        assert_eq!(n.entity.fsm.current(), State::Shield);
        n.entity.dispatch(Event::Attack);
        n.entity.dispatch(Event::Move(Direction::Down));
        assert_eq!(n.entity.fsm.current(), State::Shield);
        n.entity.dispatch(Event::None);
        assert_eq!(n.entity.fsm.current(), State::Idle);
    }
}
