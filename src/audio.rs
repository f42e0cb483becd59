//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! Each cue is a single oscillator with an exponential gain decay.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Coin leaves the launch pad
    Launch,
    /// Coin hits a wall or peg
    Bounce,
    /// Coin lands in a gate
    Score,
    /// Coin falls past the gates
    Miss,
}

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
    Sawtooth,
}

/// Synthesis parameters for one cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    pub wave: Waveform,
    pub start_hz: f32,
    /// Exponential sweep target and duration (seconds)
    pub sweep: Option<(f32, f64)>,
    /// Seconds for the gain to decay to silence
    pub decay: f64,
}

/// Peak gain before volume scaling
pub const CUE_GAIN: f32 = 0.3;
/// Gain floor for the exponential ramp (Web Audio cannot ramp to zero)
pub const CUE_FLOOR: f32 = 0.001;
/// Oscillators stop this long after starting
pub const CUE_STOP: f64 = 0.5;

impl SoundEffect {
    /// Cue for a simulation event, if it makes a sound
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Launch => Some(SoundEffect::Launch),
            GameEvent::Bounce => Some(SoundEffect::Bounce),
            GameEvent::Scored { .. } => Some(SoundEffect::Score),
            GameEvent::Miss => Some(SoundEffect::Miss),
            GameEvent::GameOver { .. } => None,
        }
    }

    pub fn cue(&self) -> Cue {
        match self {
            SoundEffect::Launch => Cue {
                wave: Waveform::Sine,
                start_hz: 300.0,
                sweep: Some((800.0, 0.1)),
                decay: 0.2,
            },
            SoundEffect::Bounce => Cue {
                wave: Waveform::Triangle,
                start_hz: 200.0,
                sweep: None,
                decay: 0.1,
            },
            SoundEffect::Score => Cue {
                wave: Waveform::Square,
                start_hz: 600.0,
                sweep: Some((1200.0, 0.2)),
                decay: 0.3,
            },
            SoundEffect::Miss => Cue {
                wave: Waveform::Sawtooth,
                start_hz: 200.0,
                sweep: Some((100.0, 0.3)),
                decay: 0.4,
            },
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{CUE_FLOOR, CUE_GAIN, CUE_STOP, SoundEffect, Waveform};
    use crate::settings::Settings;

    impl From<Waveform> for OscillatorType {
        fn from(wave: Waveform) -> Self {
            match wave {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Triangle => OscillatorType::Triangle,
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
            }
        }
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let cue = effect.cue();
            let Some((osc, gain)) = self.create_osc(ctx, cue.start_hz, cue.wave.into()) else {
                log::warn!("Could not build oscillator for {:?}", effect);
                return;
            };
            let t = ctx.current_time();

            if let Some((end_hz, secs)) = cue.sweep {
                osc.frequency().set_value_at_time(cue.start_hz, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(end_hz, t + secs)
                    .ok();
            }

            gain.gain().set_value_at_time(vol * CUE_GAIN, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(CUE_FLOOR, t + cue.decay)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + CUE_STOP).ok();
        }

        /// Create an oscillator routed through a gain node
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }
    }
}
