#![cfg_attr(not(test), no_std)]

//! Adaptive-baseline debouncing for analog touch inputs.
//!
//! An [`AnalogButton`] turns one raw sample per tick from a capacitive or
//! resistive pad into a stable pressed/released state. The quiescent level
//! of the pad is tracked as a slowly moving baseline, so temperature and
//! humidity drift don't trip the button, and the instance recalibrates itself
//! if the signal runs away below the baseline or the button stays pressed
//! for too long.
//!
//! ```
//! use touch::{AnalogButton, ButtonConfig};
//!
//! let config = ButtonConfig { threshold: 100, hysteresis: 10, ..ButtonConfig::default() };
//! let mut button = AnalogButton::new(Some(&config)).unwrap();
//!
//! button.update(1000);
//! for _ in 0..config.debounce_ticks {
//!     button.update(1200);
//! }
//! assert!(button.state());
//! assert!(button.take_changed());
//! ```

pub mod baseline;
pub mod button;
pub mod error;
pub mod switch;

pub use button::{AnalogButton, RecalibrationCause};
pub use error::ConfigError;

/// Stable output of the debounced switch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchState {
    Off,
    On,
}

impl SwitchState {
    pub fn is_on(&self) -> bool {
        matches!(self, SwitchState::On)
    }
}

/// Configuration for one analog button channel
///
/// All durations are counted in ticks, i.e. calls to [`AnalogButton::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// Deviation from baseline at which the button trips. The sign selects the
    /// polarity: positive trips on a rising reading, negative inverts the
    /// baseline term before comparing.
    pub threshold: i32,
    /// The button turns on above `threshold + hysteresis` and off below
    /// `threshold - hysteresis`.
    pub hysteresis: u32,
    /// Number of ticks between baseline adjustments. Must be nonzero.
    pub baseline_period_ticks: u16,
    /// Adjust the baseline every period, regardless of the button state or
    /// the noise band
    pub baseline_always: bool,
    /// If nonzero, the maximum on time in ticks. A button held longer than
    /// this forces a recalibration.
    pub timeout_ticks: u32,
    /// Deviations smaller than this are treated as drift and folded into the
    /// baseline
    pub noise: u32,
    /// Number of consecutive baseline periods below `-noise` before the
    /// baseline is thrown away and re-seeded
    pub neg_reset_periods: u32,
    /// Number of qualifying ticks required to commit a state change
    pub debounce_ticks: u32,
}

impl ButtonConfig {
    pub const fn default() -> Self {
        Self {
            threshold: 100,
            hysteresis: 5,
            baseline_period_ticks: 32,
            baseline_always: false,
            timeout_ticks: 0,
            noise: 10,
            neg_reset_periods: 8,
            debounce_ticks: 2,
        }
    }

    /// Check the configuration for values that would break the update loop
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.baseline_period_ticks == 0 {
            return Err(ConfigError::ZeroBaselinePeriod);
        }
        Ok(())
    }
}

impl Default for ButtonConfig {
    fn default() -> Self {
        ButtonConfig::default()
    }
}

pub const DEFAULT_BUTTON_CONFIG: ButtonConfig = ButtonConfig::default();
