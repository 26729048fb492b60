use crate::baseline::{BaselineOutcome, BaselineTracker};
use crate::switch::SwitchFilter;
use crate::{ButtonConfig, ConfigError, SwitchState, DEFAULT_BUTTON_CONFIG};

/// Why the baseline was last seeded from a raw reading
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecalibrationCause {
    /// First update after construction
    Startup,
    /// Requested through [`AnalogButton::reset_baseline`]
    Manual,
    /// The reading stayed far below the baseline for too many periods
    NegativeRunaway,
    /// The button was on for longer than `timeout_ticks`
    Timeout,
}

/// A single analog touch input with an adaptive baseline.
///
/// Call [`update`](Self::update) exactly once per sampling tick. Each channel
/// owns its own instance; nothing is shared between them.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogButton {
    config: ButtonConfig,
    /// Set when the next update must re-seed the baseline
    recalibrate: Option<RecalibrationCause>,
    last_recalibration: RecalibrationCause,
    baseline: BaselineTracker,
    switch: SwitchFilter,
    changed: bool,
    last_result: i32,
    deviation: i64,
    time_on: u32,
}

impl AnalogButton {
    pub fn new(config: Option<&ButtonConfig>) -> Result<Self, ConfigError> {
        let config = *config.unwrap_or(&DEFAULT_BUTTON_CONFIG);
        config.validate()?;

        Ok(Self {
            config,
            recalibrate: Some(RecalibrationCause::Startup),
            last_recalibration: RecalibrationCause::Startup,
            baseline: BaselineTracker::new(),
            switch: SwitchFilter::new(),
            changed: false,
            last_result: 0,
            deviation: 0,
            time_on: 0,
        })
    }

    /// Process one raw sample and return the debounced state
    pub fn update(&mut self, value: i32) -> bool {
        self.last_result = value;

        if let Some(cause) = self.recalibrate.take() {
            self.seed(cause);
        }

        // With a non-positive threshold the baseline term is inverted and the
        // rest of the logic runs as though the threshold were positive.
        let polarity: i64 = if self.config.threshold > 0 { 1 } else { -1 };
        let deviation = i64::from(value) - i64::from(self.baseline.baseline()) * polarity;
        self.deviation = deviation;

        if self.baseline.step(deviation, value, &self.config) == BaselineOutcome::Runaway {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "baseline runaway: deviation {} below -{} for {} periods",
                deviation,
                self.config.noise,
                self.baseline.negative_resets()
            );
            self.schedule_recalibration(RecalibrationCause::NegativeRunaway);
        }

        if let Some(state) = self.switch.step(deviation, &self.config) {
            #[cfg(feature = "defmt")]
            defmt::trace!("switch {}: deviation {}", state, deviation);
            self.changed = true;
            if state.is_on() {
                self.time_on = 0;
            }
        }

        if self.switch.state().is_on() {
            if self.config.timeout_ticks != 0 && self.time_on > self.config.timeout_ticks {
                #[cfg(feature = "defmt")]
                defmt::warn!("switch on for {} ticks, recalibrating", self.time_on);
                self.schedule_recalibration(RecalibrationCause::Timeout);
            }
            self.time_on = self.time_on.saturating_add(1);
        }

        self.state()
    }

    fn seed(&mut self, cause: RecalibrationCause) {
        #[cfg(feature = "defmt")]
        defmt::debug!("baseline seeded at {} ({})", self.last_result, cause);

        self.baseline.seed(self.last_result);
        self.switch.reset_counter();
        self.time_on = 0;
        self.last_recalibration = cause;
    }

    fn schedule_recalibration(&mut self, cause: RecalibrationCause) {
        self.recalibrate.get_or_insert(cause);
    }

    pub fn state(&self) -> bool {
        self.switch.state().is_on()
    }

    pub fn switch_state(&self) -> SwitchState {
        self.switch.state()
    }

    /// Returns true once after each committed transition
    pub fn take_changed(&mut self) -> bool {
        core::mem::replace(&mut self.changed, false)
    }

    pub fn last_result(&self) -> i32 {
        self.last_result
    }

    pub fn baseline(&self) -> i32 {
        self.baseline.baseline()
    }

    /// Raw reading minus baseline, without the polarity adjustment
    pub fn diff(&self) -> i32 {
        self.last_result.saturating_sub(self.baseline.baseline())
    }

    /// Polarity adjusted deviation computed by the last update
    pub fn deviation(&self) -> i64 {
        self.deviation
    }

    /// False while a recalibration is pending for the next update
    pub fn is_initialized(&self) -> bool {
        self.recalibrate.is_none()
    }

    pub fn last_recalibration(&self) -> RecalibrationCause {
        self.last_recalibration
    }

    /// Re-seed the baseline from the next reading
    pub fn reset_baseline(&mut self) {
        self.schedule_recalibration(RecalibrationCause::Manual);
    }

    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    pub fn baseline_rate(&self) -> u16 {
        self.config.baseline_period_ticks
    }

    pub fn set_baseline_rate(&mut self, ticks: u16) -> Result<(), ConfigError> {
        ButtonConfig { baseline_period_ticks: ticks, ..self.config }.validate()?;
        self.config.baseline_period_ticks = ticks;
        Ok(())
    }

    pub fn hysteresis(&self) -> u32 {
        self.config.hysteresis
    }

    /// Negative values are clamped to zero
    pub fn set_hysteresis(&mut self, hysteresis: i32) {
        self.config.hysteresis = u32::try_from(hysteresis).unwrap_or(0);
    }

    pub fn timeout_ticks(&self) -> u32 {
        self.config.timeout_ticks
    }

    pub fn set_timeout_ticks(&mut self, ticks: u32) {
        self.config.timeout_ticks = ticks;
    }

    pub fn baseline_always(&self) -> bool {
        self.config.baseline_always
    }

    pub fn set_baseline_always(&mut self, always: bool) {
        self.config.baseline_always = always;
    }
}
