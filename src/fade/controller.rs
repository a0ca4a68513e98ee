//! Timer-driven screen fade.
//!
//! Opacity moves at [`FADE_RATE`] units per second of tick delta, so every
//! half of a transition lasts one second. A fade-out carries a
//! [`TransitionCue`] which [`FadeController::tick`] hands back exactly once,
//! on the tick where opacity clamps to 1.

use bevy::prelude::*;
use thiserror::Error;

use crate::core::TransitionCue;

/// Opacity change per second.
pub const FADE_RATE: f32 = 1.0;

/// Where the controller is in a fade sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadePhase {
    /// Nothing running, overlay fully transparent
    Idle,
    /// Opacity rising toward 1
    FadingOut,
    /// Opacity falling toward 0
    FadingIn,
    /// Fade-out finished with `stay_faded`, overlay fully opaque
    Held,
}

/// Errors from fade requests.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FadeError {
    /// Another sequence has not finished yet.
    #[error("fade already in progress ({0:?})")]
    Busy(FadePhase),
}

/// One fade sequence at a time over a single opacity value.
#[derive(Resource, Debug, Clone)]
pub struct FadeController {
    phase: FadePhase,
    alpha: f32,
    stay_faded: bool,
    chain_fade_in: bool,
    cue: Option<TransitionCue>,
}

impl Default for FadeController {
    fn default() -> Self {
        Self {
            phase: FadePhase::Idle,
            alpha: 0.0,
            stay_faded: false,
            chain_fade_in: false,
            cue: None,
        }
    }
}

impl FadeController {
    pub fn phase(&self) -> FadePhase {
        self.phase
    }

    /// Current overlay opacity in `[0, 1]`.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// True while opacity is still moving.
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, FadePhase::FadingOut | FadePhase::FadingIn)
    }

    /// Jump to fully opaque and fade back to transparent.
    pub fn fade_in(&mut self) -> Result<(), FadeError> {
        self.ensure_ready()?;
        self.alpha = 1.0;
        self.phase = FadePhase::FadingIn;
        self.stay_faded = false;
        self.chain_fade_in = false;
        self.cue = None;
        Ok(())
    }

    /// Fade to fully opaque, then hand `cue` back from [`tick`](Self::tick).
    ///
    /// With `stay_faded` the overlay is held opaque afterwards, otherwise the
    /// controller drops straight back to `Idle` and transparent.
    pub fn fade_out(&mut self, stay_faded: bool, cue: TransitionCue) -> Result<(), FadeError> {
        self.ensure_ready()?;
        self.phase = FadePhase::FadingOut;
        self.stay_faded = stay_faded;
        self.chain_fade_in = false;
        self.cue = Some(cue);
        Ok(())
    }

    /// Fade out, hand back `cue` at full opacity, then fade in again.
    pub fn fade_out_then_in(&mut self, cue: TransitionCue) -> Result<(), FadeError> {
        self.ensure_ready()?;
        self.phase = FadePhase::FadingOut;
        self.stay_faded = false;
        self.chain_fade_in = true;
        self.cue = Some(cue);
        Ok(())
    }

    /// Abort whatever is running. Returns the cue that will now never fire.
    pub fn cancel(&mut self) -> Option<TransitionCue> {
        let cue = self.cue.take();
        *self = Self::default();
        cue
    }

    /// Advance by `dt` seconds. Returns the pending cue on the tick the
    /// fade-out completes.
    pub fn tick(&mut self, dt: f32) -> Option<TransitionCue> {
        match self.phase {
            FadePhase::FadingOut => {
                self.alpha = (self.alpha + FADE_RATE * dt).min(1.0);
                if self.alpha < 1.0 {
                    return None;
                }

                if self.chain_fade_in {
                    self.phase = FadePhase::FadingIn;
                    self.chain_fade_in = false;
                } else if self.stay_faded {
                    self.phase = FadePhase::Held;
                } else {
                    self.phase = FadePhase::Idle;
                    self.alpha = 0.0;
                }
                self.cue.take()
            }
            FadePhase::FadingIn => {
                self.alpha = (self.alpha - FADE_RATE * dt).max(0.0);
                if self.alpha <= 0.0 {
                    self.phase = FadePhase::Idle;
                }
                None
            }
            FadePhase::Idle | FadePhase::Held => None,
        }
    }

    fn ensure_ready(&self) -> Result<(), FadeError> {
        if self.is_busy() {
            Err(FadeError::Busy(self.phase))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    /// Tick for `seconds` of simulated time, collecting every cue returned.
    fn run(fade: &mut FadeController, seconds: f32) -> Vec<TransitionCue> {
        let ticks = (seconds / DT).ceil() as usize;
        (0..ticks).filter_map(|_| fade.tick(DT)).collect()
    }

    #[test]
    fn fade_out_without_hold_fires_once_and_ends_idle() {
        let mut fade = FadeController::default();
        fade.fade_out(false, TransitionCue::ReturnToMenu).unwrap();

        let cues = run(&mut fade, 1.5);

        assert_eq!(cues, vec![TransitionCue::ReturnToMenu]);
        assert_eq!(fade.phase(), FadePhase::Idle);
        assert_eq!(fade.alpha(), 0.0);
    }

    #[test]
    fn fade_out_with_hold_stays_opaque() {
        let mut fade = FadeController::default();
        fade.fade_out(true, TransitionCue::ReturnToMenu).unwrap();

        let cues = run(&mut fade, 3.0);

        assert_eq!(cues.len(), 1);
        assert_eq!(fade.phase(), FadePhase::Held);
        assert_eq!(fade.alpha(), 1.0);
    }

    #[test]
    fn cue_fires_only_at_full_opacity() {
        let mut fade = FadeController::default();
        fade.fade_out(false, TransitionCue::ReturnToMenu).unwrap();

        assert!(run(&mut fade, 0.5).is_empty());
        assert!(fade.alpha() > 0.4 && fade.alpha() < 0.6);
        assert_eq!(fade.phase(), FadePhase::FadingOut);
    }

    #[test]
    fn fade_out_then_in_fires_once_and_returns_to_transparent() {
        let mut fade = FadeController::default();
        let cue = TransitionCue::SwapLevel { level: 2 };
        fade.fade_out_then_in(cue).unwrap();

        let mut cues = Vec::new();
        let mut alpha_at_cue = None;
        for _ in 0..((2.5 / DT) as usize) {
            if let Some(c) = fade.tick(DT) {
                alpha_at_cue = Some(fade.alpha());
                cues.push(c);
            }
        }

        assert_eq!(cues, vec![cue]);
        assert_eq!(alpha_at_cue, Some(1.0));
        assert_eq!(fade.phase(), FadePhase::Idle);
        assert_eq!(fade.alpha(), 0.0);
    }

    #[test]
    fn fade_in_starts_opaque_and_clears() {
        let mut fade = FadeController::default();
        fade.fade_in().unwrap();
        assert_eq!(fade.alpha(), 1.0);

        assert!(run(&mut fade, 1.2).is_empty());
        assert_eq!(fade.phase(), FadePhase::Idle);
        assert_eq!(fade.alpha(), 0.0);
    }

    #[test]
    fn requests_while_running_are_rejected() {
        let mut fade = FadeController::default();
        fade.fade_out_then_in(TransitionCue::SwapLevel { level: 1 }).unwrap();

        let err = fade
            .fade_out_then_in(TransitionCue::SwapLevel { level: 2 })
            .unwrap_err();
        assert_eq!(err, FadeError::Busy(FadePhase::FadingOut));
        assert!(fade.fade_in().is_err());

        // The original sequence is untouched
        assert_eq!(run(&mut fade, 1.2), vec![TransitionCue::SwapLevel { level: 1 }]);
    }

    #[test]
    fn held_blackout_accepts_fade_in() {
        let mut fade = FadeController::default();
        fade.fade_out(true, TransitionCue::ReturnToMenu).unwrap();
        run(&mut fade, 1.2);

        fade.fade_in().unwrap();
        run(&mut fade, 1.2);
        assert_eq!(fade.phase(), FadePhase::Idle);
    }

    #[test]
    fn cancel_drops_pending_cue() {
        let mut fade = FadeController::default();
        fade.fade_out(false, TransitionCue::ReturnToMenu).unwrap();
        run(&mut fade, 0.3);

        assert_eq!(fade.cancel(), Some(TransitionCue::ReturnToMenu));
        assert_eq!(fade.phase(), FadePhase::Idle);
        assert_eq!(fade.alpha(), 0.0);
        assert!(run(&mut fade, 2.0).is_empty());
    }
}
