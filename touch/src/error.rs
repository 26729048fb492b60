/// Errors raised when building or reconfiguring an [`AnalogButton`](crate::AnalogButton)
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    #[error("baseline period must be at least one tick")]
    ZeroBaselinePeriod,
}
