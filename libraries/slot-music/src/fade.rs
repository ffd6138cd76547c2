//! Tick-based volume fades
//!
//! Pure computation of the instantaneous volume of a running fade. The
//! owning slot clamps the result toward the limit and applies it.

use crate::types::Tick;

/// Fade state of one slot
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FadeState {
    start_volume: f32,
    limit_volume: f32,
    start_tick: Tick,
    duration: Tick,
    stop_on_zero_volume: bool,
    active: bool,
}

/// One step of a running fade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeStep {
    /// The fade raises the volume
    pub fade_in: bool,

    /// Volume before clamping toward the limit
    pub volume: f32,
}

impl FadeStep {
    /// Volume clamped so it never passes `limit`
    pub fn clamped(&self, limit: f32) -> f32 {
        if self.fade_in {
            self.volume.min(limit)
        } else {
            self.volume.max(limit)
        }
    }
}

impl FadeState {
    /// Start a fade from `current_volume` toward `limit_volume`
    ///
    /// Returns false (and leaves the state untouched) when the volume is
    /// already at the limit.
    pub fn begin(
        &mut self,
        current_volume: f32,
        limit_volume: f32,
        now: Tick,
        duration: Tick,
        stop_on_zero_volume: bool,
    ) -> bool {
        if current_volume == limit_volume {
            return false;
        }

        *self = Self {
            start_volume: current_volume,
            limit_volume,
            start_tick: now,
            duration,
            stop_on_zero_volume,
            active: true,
        };
        true
    }

    /// Volume at tick `now`
    ///
    /// Fade in adds `t * limit` to the start volume. Fade out subtracts
    /// `t * (1 - limit)`, which only interpolates linearly when starting
    /// from full volume. A zero duration yields the limit immediately.
    pub fn compute(&self, now: Tick) -> FadeStep {
        let fade_in = self.limit_volume > self.start_volume;
        if self.duration == 0 {
            return FadeStep {
                fade_in,
                volume: self.limit_volume,
            };
        }

        let elapsed = now.wrapping_sub(self.start_tick);
        let t = elapsed as f32 / self.duration as f32;
        let volume = if fade_in {
            self.start_volume + t * self.limit_volume
        } else {
            self.start_volume - t * (1.0 - self.limit_volume)
        };

        FadeStep { fade_in, volume }
    }

    /// Stop the fade
    pub fn end(&mut self) {
        self.active = false;
    }

    /// Check if a fade is in progress
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Target volume of the fade
    pub fn limit_volume(&self) -> f32 {
        self.limit_volume
    }

    /// Whether playback halts once the fade reaches silence
    pub fn stop_on_zero_volume(&self) -> bool {
        self.stop_on_zero_volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_at_limit_is_noop() {
        let mut fade = FadeState::default();
        assert!(!fade.begin(0.5, 0.5, 0, 10, false));
        assert!(!fade.is_active());
    }

    #[test]
    fn fade_in_endpoints() {
        let mut fade = FadeState::default();
        assert!(fade.begin(0.0, 1.0, 100, 50, false));

        let start = fade.compute(100);
        assert!(start.fade_in);
        assert!(start.volume.abs() < 0.001);

        let mid = fade.compute(125);
        assert!((mid.volume - 0.5).abs() < 0.001);

        let end = fade.compute(150);
        assert!((end.volume - 1.0).abs() < 0.001);
    }

    #[test]
    fn fade_out_from_full_volume() {
        let mut fade = FadeState::default();
        fade.begin(1.0, 0.0, 0, 20, true);

        let step = fade.compute(10);
        assert!(!step.fade_in);
        assert!((step.volume - 0.5).abs() < 0.001);
        assert!(fade.stop_on_zero_volume());
    }

    #[test]
    fn fade_out_keeps_asymmetric_slope() {
        // Slope is (1 - limit) per duration, independent of start volume
        let mut fade = FadeState::default();
        fade.begin(0.8, 0.2, 0, 10, false);

        let step = fade.compute(5);
        assert!((step.volume - (0.8 - 0.5 * 0.8)).abs() < 0.001);
    }

    #[test]
    fn clamp_prevents_overshoot() {
        let mut fade = FadeState::default();
        fade.begin(0.0, 0.6, 0, 10, false);
        let step = fade.compute(30);
        assert!(step.volume > 0.6);
        assert_eq!(step.clamped(0.6), 0.6);

        fade.begin(1.0, 0.25, 0, 10, false);
        let step = fade.compute(30);
        assert!(step.volume < 0.25);
        assert_eq!(step.clamped(0.25), 0.25);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let mut fade = FadeState::default();
        fade.begin(1.0, 0.3, 0, 0, false);

        let step = fade.compute(0);
        assert_eq!(step.volume, 0.3);
    }

    #[test]
    fn elapsed_survives_tick_wraparound() {
        let mut fade = FadeState::default();
        fade.begin(0.0, 1.0, Tick::MAX - 4, 10, false);

        let step = fade.compute(5);
        assert!((step.volume - 1.0).abs() < 0.001);
    }

    #[test]
    fn end_deactivates() {
        let mut fade = FadeState::default();
        fade.begin(0.0, 1.0, 0, 10, false);
        assert!(fade.is_active());

        fade.end();
        assert!(!fade.is_active());
    }
}
