use chrono::{DateTime, Local};

/// Charging direction as reported by the power-supply source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChargeState {
    Charging,
    Discharging,
    Full,
    #[default]
    Unknown,
}

impl ChargeState {
    /// Parse the kernel's `status` attribute. Anything unrecognised
    /// (`Not charging`, `Unknown`, empty) maps to [`ChargeState::Unknown`].
    pub fn from_sysfs(raw: &str) -> Self {
        match raw.trim() {
            "Charging"    => Self::Charging,
            "Discharging" => Self::Discharging,
            "Full"        => Self::Full,
            _             => Self::Unknown,
        }
    }
}

/// One raw read of battery counters.
///
/// `charge_now` and `charge_full` share a unit (µAh or µWh); `rate` is the
/// matching per-hour unit (µA or µW) and always non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatterySnapshot {
    pub index:       u32,
    pub present:     bool,
    pub charge_now:  u64,
    pub charge_full: u64,
    pub rate:        u64,
    pub state:       ChargeState,
}

impl BatterySnapshot {
    /// Snapshot for a battery index with nothing behind it.
    pub fn absent(index: u32) -> Self {
        Self { index, ..Self::default() }
    }
}

/// Normalised status derived from a [`BatterySnapshot`].
///
/// When `present` is `false` the remaining fields carry no information and
/// must be rendered as "not available".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatteryStatus {
    pub present:           bool,
    /// Charge level, 0–100.
    pub percentage:        u8,
    pub is_charging:       bool,
    /// Seconds until full (charging) or empty (discharging); `0` = no estimate.
    pub seconds_remaining: u64,
    pub state:             ChargeState,
}

impl BatteryStatus {
    pub fn absent() -> Self {
        Self::default()
    }

    /// Percentage, or `None` when no battery is present.
    #[must_use]
    pub fn percentage(&self) -> Option<u8> {
        self.present.then_some(self.percentage)
    }

    /// Remaining time, or `None` when there is no reliable estimate.
    #[must_use]
    pub fn time_remaining(&self) -> Option<std::time::Duration> {
        (self.present && self.seconds_remaining > 0)
            .then(|| std::time::Duration::from_secs(self.seconds_remaining))
    }
}

/// Discrete battery icon bucket.
///
/// Variants are declared in ascending charge order so the derived `Ord`
/// follows the charge level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IconTier {
    Empty,
    Quarter,
    Half,
    ThreeQuarters,
    Full,
}

impl IconTier {
    /// Font Awesome battery glyph for this tier.
    pub fn glyph(self) -> char {
        match self {
            Self::Empty         => '\u{f244}',
            Self::Quarter       => '\u{f243}',
            Self::Half          => '\u{f242}',
            Self::ThreeQuarters => '\u{f241}',
            Self::Full          => '\u{f240}',
        }
    }
}

/// Low-battery alert event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub battery_index: u32,
    pub percentage:    u8,
    pub message:       String,
}

/// What the scheduler publishes after every successful poll.
#[derive(Debug, Clone, PartialEq)]
pub struct BatteryReport {
    pub battery_index:   u32,
    pub status:          BatteryStatus,
    /// `None` when no battery is present.
    pub tier:            Option<IconTier>,
    /// Threshold in effect when this report was produced.
    pub warning_percent: u8,
    pub sampled_at:      DateTime<Local>,
}

impl BatteryReport {
    /// `true` when a battery is present and at or below the warning threshold.
    #[must_use]
    pub fn is_low(&self) -> bool {
        self.status
            .percentage()
            .is_some_and(|p| p <= self.warning_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charge_state_parses_kernel_strings() {
        assert_eq!(ChargeState::from_sysfs("Charging\n"), ChargeState::Charging);
        assert_eq!(ChargeState::from_sysfs("Discharging"), ChargeState::Discharging);
        assert_eq!(ChargeState::from_sysfs("Full"), ChargeState::Full);
        assert_eq!(ChargeState::from_sysfs("Not charging"), ChargeState::Unknown);
        assert_eq!(ChargeState::from_sysfs(""), ChargeState::Unknown);
    }

    #[test]
    fn absent_status_hides_values() {
        let status = BatteryStatus { percentage: 42, seconds_remaining: 60, ..BatteryStatus::absent() };
        assert_eq!(status.percentage(), None);
        assert_eq!(status.time_remaining(), None);
    }

    #[test]
    fn tiers_order_by_charge() {
        assert!(IconTier::Empty < IconTier::Quarter);
        assert!(IconTier::ThreeQuarters < IconTier::Full);
    }
}
