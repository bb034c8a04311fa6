use crate::Style;
use batmon_core::{BatteryReport, ChargeState};

/// Label shown when the configured battery does not exist.
pub const NOT_AVAILABLE: &str = "n.a.";
/// Label shown when both icon and text are switched off.
pub const NOTHING_SELECTED: &str = "n.s.";

/// Panel label in Pango markup.
pub fn label(report: &BatteryReport, style: &Style) -> String {
    let (Some(pct), Some(tier)) = (report.status.percentage(), report.tier) else {
        return NOT_AVAILABLE.to_string();
    };
    let plugged = report.status.is_charging || report.status.state == ChargeState::Full;
    let color = if plugged { style.charging } else { style.discharging };
    let span  = |body: &str| format!("<span color=\"{}\">{body}</span>", color.to_hex());

    let icon = tier.glyph().to_string();
    let text = format!("{pct}%");

    match (style.show_icon, style.show_text, style.colored_text) {
        (false, false, _)    => NOTHING_SELECTED.to_string(),
        (false, true, false) => text,
        (false, true, true)  => span(&text),
        (true, false, _)     => span(&icon),
        (true, true, true)   => span(&format!("{icon} {text}")),
        (true, true, false)  => format!("{} {text}", span(&icon)),
    }
}
