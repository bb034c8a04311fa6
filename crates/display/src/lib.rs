//! Text rendering of battery reports for an external renderer.
//!
//! Produces the panel label (Pango markup), the tooltip, and a JSON line in
//! the `text`/`tooltip`/`class`/`percentage` shape understood by status-bar
//! "custom module" protocols.

pub mod colors;
pub mod label;
pub mod tooltip;

pub use colors::Color;
pub use label::label;
pub use tooltip::tooltip;

use batmon_config::DisplayConfig;
use batmon_core::{BatteryReport, ChargeState};
use serde::Serialize;

/// Compiled display settings derived from [`DisplayConfig`].
///
/// Building a [`Style`] is infallible: invalid colour strings fall back to
/// the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    pub show_icon:    bool,
    pub show_text:    bool,
    pub colored_text: bool,
    pub charging:     Color,
    pub discharging:  Color,
}

impl Style {
    pub fn from_config(cfg: &DisplayConfig) -> Self {
        Self {
            show_icon:    cfg.show_icon,
            show_text:    cfg.show_text,
            colored_text: cfg.colored_text,
            charging:     Color::from_hex(&cfg.charging_color).unwrap_or(Color::GREEN),
            discharging:  Color::from_hex(&cfg.discharging_color).unwrap_or(Color::WHITE),
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::from_config(&DisplayConfig::default())
    }
}

/// One rendered report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendered {
    pub text:       String,
    pub tooltip:    String,
    pub class:      &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<u8>,
}

impl Rendered {
    /// Single-line JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Render a report with the given style.
pub fn render(report: &BatteryReport, style: &Style) -> Rendered {
    Rendered {
        text:       label(report, style),
        tooltip:    tooltip(report),
        class:      class(report),
        percentage: report.status.percentage(),
    }
}

/// CSS-style class for the current state.
pub fn class(report: &BatteryReport) -> &'static str {
    let status = &report.status;
    if !status.present {
        "unavailable"
    } else if status.state == ChargeState::Full {
        "full"
    } else if status.is_charging {
        "charging"
    } else if report.is_low() {
        "warning"
    } else {
        "discharging"
    }
}
