use glam::{Vec2, Vec3};
use tracing::debug;

use crate::animation::{AnimationData, FrameRect};
use crate::collision::CircleCollider;
use crate::events::Event;
use crate::fsm::{State, StateMachine, StateTable};

/// Full health for both entity kinds; health bars draw `health / 100`.
pub const MAX_HEALTH: i32 = 100;

/// RGB color applied to an entity for rendering.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color(pub Vec3);

impl Color {
    pub const GREEN: Color = Color(Vec3::new(0.0, 0.6, 0.2));
    pub const RED: Color = Color(Vec3::new(0.9, 0.1, 0.1));
}

/// Which behavior table an entity was built with.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EntityKind {
    Player,
    Npc,
}

/// Everything about an entity except its state machine: the data state
/// behaviors read and mutate.
pub struct Body {
    pub name: String,
    pub position: Vec2,
    /// Current movement direction; unit length while moving, zero at spawn.
    /// Also doubles as the facing used to pick directional animations.
    pub velocity: Vec2,
    pub color: Color,
    pub collider: CircleCollider,
    pub animation: AnimationData,
    pub health: i32,
}

impl Body {
    pub fn new(name: &str, position: Vec2, collider_radius: f32, color: Color) -> Self {
        Self {
            name: name.to_owned(),
            position,
            velocity: Vec2::ZERO,
            color,
            collider: CircleCollider {
                center: position,
                radius: collider_radius,
            },
            animation: AnimationData::empty(),
            health: MAX_HEALTH,
        }
    }

    /// Move by `step` and carry the collider center along in the same call.
    /// Collision checks run later in the same tick, so position and collider
    /// must never be observable out of sync.
    pub fn translate(&mut self, step: Vec2) {
        self.position += step;
        self.collider.center = self.position;
    }

    /// Teleport to `position`, collider included. Used by respawn logic.
    pub fn place_at(&mut self, position: Vec2) {
        self.position = position;
        self.collider.center = position;
    }

    /// Health as a [0, 1] fraction for the rendering collaborator.
    pub fn health_fraction(&self) -> f32 {
        (self.health as f32 / MAX_HEALTH as f32).clamp(0.0, 1.0)
    }
}

/// A game object: body plus the state machine driving it.
pub struct Entity {
    pub kind: EntityKind,
    pub body: Body,
    pub fsm: StateMachine,
}

impl Entity {
    /// Build an entity forced into `initial` and immediately run that
    /// state's Entry callback (the transition path only fires on real
    /// transitions, so initial entry is explicit).
    pub fn new(
        name: &str,
        kind: EntityKind,
        position: Vec2,
        collider_radius: f32,
        color: Color,
        table: StateTable,
        initial: State,
    ) -> Self {
        let mut body = Body::new(name, position, collider_radius, color);
        let mut fsm = StateMachine::new(table, initial);
        fsm.start(&mut body);
        debug!(name = %body.name, ?kind, state = ?initial, "entity spawned");
        Self { kind, body, fsm }
    }

    /// Forward an event to the active state's handler.
    pub fn dispatch(&mut self, event: Event) {
        self.fsm.dispatch(&mut self.body, event);
    }

    /// Advance the active state's per-frame simulation by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.fsm.tick(&mut self.body, dt);
    }

    /// Read-only view for the rendering collaborator.
    pub fn snapshot(&self) -> EntitySnapshot<'_> {
        EntitySnapshot {
            name: &self.body.name,
            state_name: self.fsm.current_name(),
            position: self.body.position,
            color: self.body.color,
            frame: self.body.animation.current_rect(),
            health_fraction: self.body.health_fraction(),
        }
    }
}

/// Everything a renderer needs to draw one entity: a circle, a sprite
/// frame, a position label, and a health bar.
pub struct EntitySnapshot<'a> {
    pub name: &'a str,
    pub state_name: Option<&'static str>,
    pub position: Vec2,
    pub color: Color,
    pub frame: Option<FrameRect>,
    pub health_fraction: f32,
}
