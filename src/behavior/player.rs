//! Player state behaviors and the table wiring them together.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::behavior::{facing, sheet_row};
use crate::entity::{Body, Color, Entity, EntityKind, MAX_HEALTH};
use crate::events::{Direction, Event};
use crate::fsm::{State, StateBehavior, StateTable, TableError};

pub const PLAYER_SPAWN: Vec2 = Vec2::new(400.0, 300.0);
const COLLIDER_RADIUS: f32 = 10.0;

/// Seconds an attack locks the player before dropping back to idle.
const ATTACK_DURATION: f32 = 0.6;

const IDLE_FRAME_DURATION: f32 = 0.2;
const WALK_FRAME_DURATION: f32 = 0.1;
const ATTACK_FRAME_DURATION: f32 = 0.1;

const SPRITE_CELL: f32 = 64.0;
const ATTACK_CELL: f32 = 192.0;

/// Row offsets of the seven idle loops on the player sheet.
const IDLE_ROWS: [f32; 7] = [320.0, 384.0, 448.0, 1024.0, 1088.0, 1152.0, 1216.0];
const IDLE_FRAMES: usize = 8;
const WALK_FRAMES: usize = 9;
const ATTACK_FRAMES: usize = 6;

fn walk_row(direction: Direction) -> f32 {
    match direction {
        Direction::Up => 512.0,
        Direction::Left => 576.0,
        Direction::Down => 640.0,
        Direction::Right => 704.0,
        // Diagonals reuse the vertical rows.
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

fn play_walk(body: &mut Body) {
    let row = walk_row(facing(body.velocity));
    body.animation
        .play(sheet_row(row, WALK_FRAMES, SPRITE_CELL), WALK_FRAME_DURATION, true);
}

/// Stands around cycling through one of several idle loops, re-rolling a
/// new one each time the current loop completes.
struct PlayerIdle {
    rng: StdRng,
}

impl PlayerIdle {
    fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn roll_idle(&mut self, body: &mut Body) {
        let row = IDLE_ROWS[self.rng.gen_range(0..IDLE_ROWS.len())];
        body.animation
            .play(sheet_row(row, IDLE_FRAMES, SPRITE_CELL), IDLE_FRAME_DURATION, true);
    }
}

impl StateBehavior for PlayerIdle {
    fn on_enter(&mut self, body: &mut Body) {
        self.roll_idle(body);
    }

    fn on_update(&mut self, body: &mut Body, dt: f32) -> Option<State> {
        body.animation.advance(dt);
        if body.animation.on_final_frame() {
            self.roll_idle(body);
        }
        None
    }

    fn handle_event(&mut self, body: &mut Body, event: Event) -> Option<State> {
        match event {
            Event::Move(direction) => {
                body.velocity = direction.unit_vector();
                Some(State::Walking)
            }
            Event::Attack => Some(State::Attacking),
            Event::Defend => Some(State::Shield),
            Event::Die => Some(State::Dead),
            _ => None,
        }
    }
}

/// Moves one unit step per tick along the held direction.
struct PlayerWalking;

impl StateBehavior for PlayerWalking {
    fn on_enter(&mut self, body: &mut Body) {
        play_walk(body);
    }

    fn on_update(&mut self, body: &mut Body, dt: f32) -> Option<State> {
        let step = body.velocity;
        body.translate(step);
        body.animation.advance(dt);
        None
    }

    fn handle_event(&mut self, body: &mut Body, event: Event) -> Option<State> {
        match event {
            Event::None => Some(State::Idle),
            Event::Move(direction) => {
                let v = direction.unit_vector();
                if v != body.velocity {
                    // Re-aim in place rather than bouncing through Idle.
                    body.velocity = v;
                    play_walk(body);
                }
                None
            }
            Event::Attack => Some(State::Attacking),
            Event::Die => Some(State::Dead),
            _ => None,
        }
    }
}

/// Plays the directional swing, ignoring input until the timer runs out.
struct PlayerAttacking {
    timer: f32,
}

impl StateBehavior for PlayerAttacking {
    fn on_enter(&mut self, body: &mut Body) {
        self.timer = 0.0;
        let row = attack_row(facing(body.velocity));
        body.animation
            .play(sheet_row(row, ATTACK_FRAMES, ATTACK_CELL), ATTACK_FRAME_DURATION, false);
    }

    fn on_update(&mut self, body: &mut Body, dt: f32) -> Option<State> {
        body.animation.advance(dt);
        self.timer += dt;
        if self.timer >= ATTACK_DURATION {
            trace!(name = %body.name, "attack finished");
            Some(State::Idle)
        } else {
            None
        }
    }

    fn handle_event(&mut self, _body: &mut Body, event: Event) -> Option<State> {
        match event {
            Event::Die => Some(State::Dead),
            _ => None,
        }
    }
}

/// Holds a guard pose until the defend input is released.
struct PlayerShield;

impl StateBehavior for PlayerShield {
    fn on_enter(&mut self, body: &mut Body) {
        // Neutral stance while guarding; the sheet has no dedicated
        // shield row, so the first idle loop stands in.
        body.animation
            .play(sheet_row(IDLE_ROWS[0], IDLE_FRAMES, SPRITE_CELL), IDLE_FRAME_DURATION, true);
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

/// Terminal for this life; the next tick requests a respawn.
struct PlayerDead;

impl StateBehavior for PlayerDead {
    fn on_update(&mut self, _body: &mut Body, _dt: f32) -> Option<State> {
        Some(State::Respawn)
    }
}

/// Resets health and teleports back to the spawn point, then hands
/// control straight back to idle.
struct PlayerRespawn;

impl StateBehavior for PlayerRespawn {
    fn on_enter(&mut self, body: &mut Body) {
        body.health = MAX_HEALTH;
        body.place_at(PLAYER_SPAWN);
    }

    fn on_update(&mut self, _body: &mut Body, _dt: f32) -> Option<State> {
        Some(State::Idle)
    }
}

/// Build the player's state table. `seed` drives the idle-variant RNG so
/// runs can be reproduced.
pub fn player_table(seed: u64) -> Result<StateTable, TableError> {
    StateTable::builder()
        .define(
            State::Idle,
            "Player_Idle",
            Box::new(PlayerIdle::new(seed)),
            &[State::Walking, State::Attacking, State::Shield, State::Dead],
        )?
        .define(
            State::Walking,
            "Player_Walking",
            Box::new(PlayerWalking),
            &[State::Idle, State::Attacking, State::Dead],
        )?
        .define(
            State::Attacking,
            "Player_Attacking",
            Box::new(PlayerAttacking { timer: 0.0 }),
            &[State::Idle, State::Dead],
        )?
        .define(
            State::Shield,
            "Player_Shield",
            Box::new(PlayerShield),
            &[State::Idle, State::Dead],
        )?
        .define(State::Dead, "Player_Dead", Box::new(PlayerDead), &[State::Respawn])?
        .define(State::Respawn, "Player_Respawn", Box::new(PlayerRespawn), &[State::Idle])?
        .build()
}

/// The player-controlled entity plus the resource pools the HUD shows.
pub struct Player {
    pub entity: Entity,
    pub stamina: f32,
    pub mana: f32,
}

impl Player {
    pub fn spawn(name: &str, seed: u64) -> Result<Player, TableError> {
        let table = player_table(seed)?;
        let entity = Entity::new(
            name,
            EntityKind::Player,
            PLAYER_SPAWN,
            COLLIDER_RADIUS,
            Color::GREEN,
            table,
            State::Idle,
        );
        Ok(Player {
            entity,
            stamina: 100.0,
            mana: 100.0,
        })
    }
}
