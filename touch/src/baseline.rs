//! Baseline tracking and the negative runaway guard
//!
//! The baseline is a slow low-pass estimate of the untouched reading. It is
//! evaluated once every `baseline_period_ticks` and moves by at most one count
//! per evaluation, so a real press never drags it along unless
//! `baseline_always` is set.

use crate::ButtonConfig;

/// Result of one [`BaselineTracker::step`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BaselineOutcome {
    /// Not an evaluation tick
    Waiting,
    /// The period elapsed and the baseline was evaluated
    Evaluated,
    /// The deviation has been below `-noise` for `neg_reset_periods`
    /// consecutive evaluations; the baseline should be re-seeded
    Runaway,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BaselineTracker {
    baseline: i32,
    count: u16,
    negative_resets: u32,
}

impl BaselineTracker {
    pub const fn new() -> Self {
        Self {
            baseline: 0,
            count: 0,
            negative_resets: 0,
        }
    }

    pub fn baseline(&self) -> i32 {
        self.baseline
    }

    /// Number of consecutive evaluations that saw a strongly negative deviation
    pub fn negative_resets(&self) -> u32 {
        self.negative_resets
    }

    /// Restart tracking from `value`
    pub fn seed(&mut self, value: i32) {
        self.baseline = value;
        self.count = 0;
        self.negative_resets = 0;
    }

    /// Advance the period counter and, on a period boundary, run the runaway
    /// check and nudge the baseline toward `reading`.
    ///
    /// `deviation` is the polarity adjusted difference computed by the caller
    /// for this tick.
    pub fn step(&mut self, deviation: i64, reading: i32, config: &ButtonConfig) -> BaselineOutcome {
        // A zero period is rejected by the config setters; treat it as 1 here
        // rather than dividing by zero.
        let period = config.baseline_period_ticks.max(1);
        self.count = (self.count + 1) % period;
        if self.count != 0 {
            return BaselineOutcome::Waiting;
        }

        let noise = i64::from(config.noise);
        let mut outcome = BaselineOutcome::Evaluated;

        if deviation < -noise {
            self.negative_resets = self.negative_resets.saturating_add(1);
            if self.negative_resets >= config.neg_reset_periods {
                outcome = BaselineOutcome::Runaway;
            }
        } else {
            self.negative_resets = 0;
        }

        if config.baseline_always || deviation.abs() < noise {
            if reading > self.baseline {
                self.baseline += 1;
            } else if reading < self.baseline {
                self.baseline -= 1;
            }
        }

        outcome
    }
}

impl Default for BaselineTracker {
    fn default() -> Self {
        Self::new()
    }
}
