//! Debounced on/off switch driven by the baseline deviation

use crate::{ButtonConfig, SwitchState};

/// Two-state switch gated by a bounded up/down counter.
///
/// While `Off`, every tick above `threshold + hysteresis` counts up; the
/// switch turns on when the counter reaches `debounce_ticks`. While `On`,
/// every tick below `threshold - hysteresis` counts down and the switch turns
/// off at zero. Any other tick leaves the counter alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchFilter {
    state: SwitchState,
    counter: u32,
}

impl SwitchFilter {
    pub const fn new() -> Self {
        Self {
            state: SwitchState::Off,
            counter: 0,
        }
    }

    pub fn state(&self) -> SwitchState {
        self.state
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Clear the debounce counter without changing the output state
    pub fn reset_counter(&mut self) {
        self.counter = 0;
    }

    /// Feed one deviation sample.
    ///
    /// Returns the new state if this sample committed a transition.
    pub fn step(&mut self, deviation: i64, config: &ButtonConfig) -> Option<SwitchState> {
        let threshold = i64::from(config.threshold);
        let hysteresis = i64::from(config.hysteresis);

        match self.state {
            SwitchState::Off if deviation > threshold + hysteresis => {
                if self.counter < config.debounce_ticks {
                    self.counter += 1;
                }
                if self.counter >= config.debounce_ticks {
                    self.state = SwitchState::On;
                    return Some(SwitchState::On);
                }
            }
            SwitchState::On if deviation < threshold - hysteresis => {
                self.counter = self.counter.saturating_sub(1);
                if self.counter == 0 {
                    self.state = SwitchState::Off;
                    return Some(SwitchState::Off);
                }
            }
            _ => {}
        }

        None
    }
}

impl Default for SwitchFilter {
    fn default() -> Self {
        Self::new()
    }
}
