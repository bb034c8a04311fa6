use std::time::Duration;

/// Default polling period.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(3);

/// Default low-charge threshold in percent.
pub const DEFAULT_WARNING_PERCENT: u8 = 10;

/// Default alert text.
pub const DEFAULT_WARNING_TEXT: &str = "Battery almost empty";

/// Configuration consumed by one poll cycle.
///
/// The scheduler holds a single value of this type and only swaps it between
/// cycles, so a poll never observes a half-applied reconfiguration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSettings {
    /// Index of the monitored battery (`BAT<index>`).
    pub battery_index: u32,
    /// Time between two polls.
    pub interval: Duration,
    /// Alert when the charge drops to or below this percentage.
    pub warning_percent: u8,
    /// Message carried by the emitted [`Alert`](crate::Alert).
    pub warning_text: String,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            battery_index:   0,
            interval:        DEFAULT_INTERVAL,
            warning_percent: DEFAULT_WARNING_PERCENT,
            warning_text:    DEFAULT_WARNING_TEXT.to_string(),
        }
    }
}
