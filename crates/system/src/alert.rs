use batmon_core::{Alert, BatteryStatus};

/// Alert controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertPhase {
    /// Waiting for the charge to drop to the threshold.
    Armed,
    /// Alert already emitted for the current low-charge episode.
    Fired,
}

/// One-shot low-battery alert with hysteresis.
///
/// Fires once when the charge drops to or below the threshold, stays quiet
/// while it remains there, and silently re-arms as soon as the charge rises
/// strictly above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertState {
    warning_threshold: u8,
    already_fired:     bool,
}

impl AlertState {
    pub fn new(warning_threshold: u8) -> Self {
        Self {
            warning_threshold: warning_threshold.min(100),
            already_fired:     false,
        }
    }

    pub fn threshold(&self) -> u8 {
        self.warning_threshold
    }

    pub fn phase(&self) -> AlertPhase {
        if self.already_fired {
            AlertPhase::Fired
        } else {
            AlertPhase::Armed
        }
    }

    /// Back to [`AlertPhase::Armed`] with a (possibly new) threshold.
    pub fn rearm(&mut self, warning_threshold: u8) {
        *self = Self::new(warning_threshold);
    }

    /// Advance the state machine with this cycle's status.
    ///
    /// An absent battery neither fires nor ends an episode.
    pub fn evaluate(
        &mut self,
        status: &BatteryStatus,
        battery_index: u32,
        message: &str,
    ) -> Option<Alert> {
        let percentage = status.percentage()?;

        if percentage > self.warning_threshold {
            self.already_fired = false;
            return None;
        }
        if self.already_fired {
            return None;
        }

        self.already_fired = true;
        Some(Alert {
            battery_index,
            percentage,
            message: message.to_string(),
        })
    }
}
