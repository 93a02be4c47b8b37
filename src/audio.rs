//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bird flaps
    Flap,
    /// Pipe passed
    Point,
    /// Bird crashed
    GameOver,
    /// New best score
    HighScore,
}

impl SoundEffect {
    /// Sound to play for a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Flapped => Some(SoundEffect::Flap),
            GameEvent::Scored { .. } => Some(SoundEffect::Point),
            GameEvent::Crashed { .. } => Some(SoundEffect::GameOver),
            GameEvent::NewBest { .. } => Some(SoundEffect::HighScore),
            GameEvent::Started | GameEvent::SpeedUp { .. } | GameEvent::Restarted => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
            }
        }

        /// Pick up volume/mute changes
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Flap => self.play_flap(ctx, vol),
                SoundEffect::Point => self.play_point(ctx, vol),
                SoundEffect::GameOver => self.play_game_over(ctx, vol),
                SoundEffect::HighScore => self.play_high_score(ctx, vol),
            }
        }

        /// Create an oscillator with gain envelope
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

        /// Flap - short upward chirp
        fn play_flap(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(700.0, t + 0.08)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        /// Point - two-note ding
        fn play_point(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [880.0, 1320.0].iter().enumerate() {
                let delay = i as f64 * 0.07;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.2).ok();
                }
            }
        }

        /// Game over - falling saw, then a sad descent
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            if let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sawtooth) {
                let t = ctx.current_time();
                gain.gain().set_value_at_time(vol * 0.15, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                    .ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(80.0, t + 0.4)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.5).ok();
            }

            for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
                let delay = 0.5 + i as f64 * 0.2;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.4).ok();
                }
            }
        }

        /// High score - celebratory
        fn play_high_score(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [500.0, 600.0, 700.0, 800.0, 1000.0].iter().enumerate() {
                // After the game-over jingle
                let delay = 1.4 + i as f64 * 0.08;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.3).ok();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::CrashCause;

    #[test]
    fn test_event_sounds() {
        assert_eq!(SoundEffect::for_event(&GameEvent::Flapped), Some(SoundEffect::Flap));
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Crashed {
                cause: CrashCause::Pipe,
                score: 3
            }),
            Some(SoundEffect::GameOver)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::Started), None);
        assert_eq!(SoundEffect::for_event(&GameEvent::SpeedUp { speed: 1.6 }), None);
    }
}
