//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per frame, constants expressed per tick
//! - Seeded RNG only
//! - Stable iteration order (layout order for pegs and gates)
//! - No rendering or platform dependencies

pub mod aim;
pub mod collision;
pub mod layout;
pub mod particles;
pub mod state;
pub mod tick;

pub use aim::{launch_angle, launch_power, launch_velocity, predict_trajectory};
pub use collision::{CollisionResult, coin_peg_collision, gate_at, reflect_velocity};
pub use layout::{generate_gates, generate_pegs};
pub use state::{Coin, GameEvent, GamePhase, GameState, Gate, Particle, Peg};
pub use tick::{TickInput, tick};
