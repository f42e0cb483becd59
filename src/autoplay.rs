//! Headless autoplay
//!
//! Plays a whole session by feeding synthetic pointer drags through the same
//! `Session` the browser uses, and tallies the outcome.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::session::Session;
use crate::sim::{GameEvent, GamePhase};

/// Give up if a session has not ended after this many frames
pub const MAX_FRAMES: u64 = 200_000;

/// Keeps aim choices independent of the simulation's own RNG stream
const AIM_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateTally {
    pub points: u32,
    pub hits: u32,
}

/// Result of an autoplay run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub seed: u64,
    pub final_score: u64,
    pub launches: u32,
    pub misses: u32,
    pub bounces: u64,
    pub frames: u64,
    /// False if the frame cap was hit before game over
    pub completed: bool,
    pub gates: Vec<GateTally>,
}

/// Pick a drag target below and to the left of the coin
fn random_target<R: Rng>(rng: &mut R, coin: Vec2) -> Vec2 {
    coin + Vec2::new(
        rng.random_range(-250.0f32..30.0),
        rng.random_range(20.0f32..150.0),
    )
}

/// Play one full session with random aims
pub fn run(seed: u64) -> Summary {
    let mut session = Session::new(seed);
    let mut aim_rng = Pcg32::seed_from_u64(seed ^ AIM_STREAM);

    let mut summary = Summary {
        seed,
        final_score: 0,
        launches: 0,
        misses: 0,
        bounces: 0,
        frames: 0,
        completed: false,
        gates: session
            .state
            .gates
            .iter()
            .map(|g| GateTally {
                points: g.points,
                hits: 0,
            })
            .collect(),
    };

    while summary.frames < MAX_FRAMES {
        if session.state.phase == GamePhase::Ready {
            let coin = session.state.coin.pos;
            let target = random_target(&mut aim_rng, coin);
            log::debug!("Aiming at ({:.1}, {:.1})", target.x, target.y);
            session.pointer.pointer_down(coin);
            tally(&mut summary, session.frame().events);
            session.pointer.pointer_up(target);
        }

        let outcome = session.frame();
        tally(&mut summary, outcome.events);
        summary.frames = session.frames();

        if !outcome.keep_running {
            summary.completed = true;
            break;
        }
    }

    summary.frames = session.frames();
    summary.final_score = session.state.score;
    if !summary.completed {
        log::warn!("Autoplay stopped after {} frames without finishing", MAX_FRAMES);
    }
    summary
}

fn tally(summary: &mut Summary, events: Vec<GameEvent>) {
    for event in events {
        match event {
            GameEvent::Launch => summary.launches += 1,
            GameEvent::Bounce => summary.bounces += 1,
            GameEvent::Scored { gate, .. } => {
                if let Some(t) = summary.gates.get_mut(gate) {
                    t.hits += 1;
                }
            }
            GameEvent::Miss => summary.misses += 1,
            GameEvent::GameOver { final_score } => {
                log::info!("Autoplay finished with {}", final_score);
            }
        }
    }
}
