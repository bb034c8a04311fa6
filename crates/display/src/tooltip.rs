use batmon_core::BatteryReport;

/// Tooltip text, e.g. `Battery 0: 57% charged, 1:05 left`.
pub fn tooltip(report: &BatteryReport) -> String {
    let Some(pct) = report.status.percentage() else {
        return "No battery found".to_string();
    };

    let head = format!("Battery {}: {pct}% charged", report.battery_index);
    match report.status.time_remaining() {
        Some(left) if report.status.is_charging => {
            format!("{head}, {} until full", format_hm(left.as_secs()))
        }
        Some(left) => format!("{head}, {} left", format_hm(left.as_secs())),
        None => head,
    }
}

/// `H:MM`, minutes truncated.
fn format_hm(secs: u64) -> String {
    format!("{}:{:02}", secs / 3600, secs % 3600 / 60)
}
