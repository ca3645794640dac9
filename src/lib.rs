//! A small player-versus-NPC skirmish simulation built around table-driven
//! finite state machines.
//!
//! Each entity owns a [`fsm::StateMachine`] whose per-state behaviors pick
//! sprite animations, integrate movement, and request transitions. Input
//! and AI both produce [`command::Command`]s, which a [`mediator::Mediator`]
//! translates into [`events::Event`]s for the bound entity. [`game::Game`]
//! runs the fixed-order frame loop and the circle-collision pass.
//!
//! Rendering, windowing, and raw input are deliberately out of scope; the
//! library exposes [`entity::EntitySnapshot`] views for a renderer to
//! consume.

pub mod ai;
pub mod animation;
pub mod behavior;
pub mod collision;
pub mod command;
pub mod entity;
pub mod events;
pub mod fsm;
pub mod game;
pub mod mediator;

pub use behavior::{Npc, Player};
pub use entity::{Body, Color, Entity, EntityKind, EntitySnapshot};
pub use fsm::{State, StateBehavior, StateMachine, StateTable};
pub use game::Game;
