//! Stepped volume ramps
//!
//! Ambience fades move in fixed increments on a fixed interval rather than
//! along a curve: every `interval_ms` the volume moves by `step` until it
//! reaches its bound.

/// Ramp parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeSettings {
    /// Volume change per interval
    pub step: f32,
    /// Milliseconds between steps
    pub interval_ms: u64,
    /// Volume a fade-in stops at
    pub max_volume: f32,
}

impl Default for FadeSettings {
    fn default() -> Self {
        Self {
            step: 0.02,
            interval_ms: 50,
            max_volume: 0.25,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RampDirection {
    In,
    Out,
}

/// One fade in progress
#[derive(Clone, Debug)]
pub struct VolumeRamp {
    direction: RampDirection,
    volume: f32,
    settings: FadeSettings,
    carry_ms: u64,
    finished: bool,
}

impl VolumeRamp {
    /// Fade from silence up to `settings.max_volume`
    pub fn fade_in(settings: FadeSettings) -> Self {
        Self {
            direction: RampDirection::In,
            volume: 0.0,
            settings,
            carry_ms: 0,
            finished: false,
        }
    }

    /// Fade from `from` down to silence
    pub fn fade_out(from: f32, settings: FadeSettings) -> Self {
        Self {
            direction: RampDirection::Out,
            volume: from.max(0.0),
            settings,
            carry_ms: 0,
            finished: false,
        }
    }

    pub fn direction(&self) -> RampDirection {
        self.direction
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance by `dt_ms`, calling `on_step` with the new volume for every
    /// interval that elapsed. Returns the number of steps taken.
    pub fn advance(&mut self, dt_ms: u64, mut on_step: impl FnMut(f32)) -> u32 {
        if self.finished || self.settings.interval_ms == 0 {
            return 0;
        }

        self.carry_ms += dt_ms;
        let mut steps = 0;
        while !self.finished && self.carry_ms >= self.settings.interval_ms {
            self.carry_ms -= self.settings.interval_ms;
            self.step();
            steps += 1;
            on_step(self.volume);
        }
        steps
    }

    fn step(&mut self) {
        match self.direction {
            RampDirection::In => {
                self.volume += self.settings.step;
                if self.volume >= self.settings.max_volume {
                    self.volume = self.settings.max_volume;
                    self.finished = true;
                }
            }
            RampDirection::Out => {
                self.volume -= self.settings.step;
                if self.volume <= 0.0 {
                    self.volume = 0.0;
                    self.finished = true;
                }
            }
        }
    }
}
