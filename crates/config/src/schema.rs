use batmon_core::{
    settings::{DEFAULT_INTERVAL, DEFAULT_WARNING_PERCENT, DEFAULT_WARNING_TEXT},
    BatError, PollSettings, Result,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure parsed from `batmon.toml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatmonConfig {
    /// Which battery to watch and when to warn.
    pub battery: BatteryConfig,
    /// How the label is rendered.
    pub display: DisplayConfig,
}

impl BatmonConfig {
    /// Reject values the monitor cannot honour.
    pub fn validate(&self) -> Result<()> {
        let b = &self.battery;
        if b.warning_percent > 100 {
            return Err(BatError::Config(format!(
                "warning_percent must be within 0..=100, got {}",
                b.warning_percent
            )));
        }
        if b.interval_secs == 0 {
            return Err(BatError::Config("interval_secs must be at least 1".into()));
        }
        for (key, value) in [
            ("charging_color", &self.display.charging_color),
            ("discharging_color", &self.display.discharging_color),
        ] {
            if !is_hex_rgb(value) {
                return Err(BatError::Config(format!(
                    "{key} must look like \"#rrggbb\", got {value:?}"
                )));
            }
        }
        Ok(())
    }

    /// Settings handed to the polling scheduler.
    ///
    /// Call [`validate`](Self::validate) first; out-of-range values are
    /// clamped here rather than rejected.
    pub fn poll_settings(&self) -> PollSettings {
        let b = &self.battery;
        PollSettings {
            battery_index:   b.index,
            interval:        Duration::from_secs(b.interval_secs.max(1)),
            warning_percent: b.warning_percent.min(100) as u8,
            warning_text:    b.warning_text.clone(),
        }
    }
}

/// `[battery]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatteryConfig {
    /// Battery number, i.e. `BAT<index>`.
    pub index: u32,
    /// Seconds between two polls.
    pub interval_secs: u64,
    /// Charge level (percent) at or below which the alert fires.
    pub warning_percent: u32,
    /// Alert message.
    pub warning_text: String,
    /// Directory holding the `BAT*` power-supply entries.
    pub sysfs_root: PathBuf,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            index:           0,
            interval_secs:   DEFAULT_INTERVAL.as_secs(),
            warning_percent: u32::from(DEFAULT_WARNING_PERCENT),
            warning_text:    DEFAULT_WARNING_TEXT.to_string(),
            sysfs_root:      PathBuf::from("/sys/class/power_supply"),
        }
    }
}

/// `[display]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show the tiered battery glyph.
    pub show_icon: bool,
    /// Show the charge percentage.
    pub show_text: bool,
    /// Colour the percentage like the icon.
    pub colored_text: bool,
    /// Hex colour used while charging.
    pub charging_color: String,
    /// Hex colour used otherwise.
    pub discharging_color: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_icon:         true,
            show_text:         true,
            colored_text:      false,
            charging_color:    "#28f200".to_string(),
            discharging_color: "#ffffff".to_string(),
        }
    }
}

fn is_hex_rgb(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
