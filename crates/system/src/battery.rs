use batmon_core::{BatError, BatterySnapshot, ChargeState, Result};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Anything that can sample a battery by index.
///
/// "No battery at this index" is an `Ok` snapshot with `present == false`;
/// an `Err` means the read itself failed and should be retried later.
pub trait BatterySource {
    fn read(&self, index: u32) -> Result<BatterySnapshot>;
}

/// Counter families exposed by the kernel power-supply class:
/// `(now, full, full_design, rate)`.
const COUNTER_FAMILIES: [[&str; 4]; 2] = [
    ["charge_now", "charge_full", "charge_full_design", "current_now"],
    ["energy_now", "energy_full", "energy_full_design", "power_now"],
];

/// Reads `BAT<index>` entries under the Linux sysfs power-supply directory.
#[derive(Debug, Clone)]
pub struct SysfsSource {
    root: PathBuf,
}

impl SysfsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn battery_dir(&self, index: u32) -> PathBuf {
        self.root.join(format!("BAT{index}"))
    }

    fn read_dir(&self, index: u32, dir: &Path) -> io::Result<BatterySnapshot> {
        if read_attr(dir, "present")?.is_some_and(|p| p == "0") {
            return Ok(BatterySnapshot::absent(index));
        }

        let state = read_attr(dir, "status")?
            .map(|s| ChargeState::from_sysfs(&s))
            .unwrap_or_default();

        let (charge_now, charge_full, rate) = match read_counters(dir)? {
            Some(counters) => counters,
            // Some firmwares only expose the kernel's own percentage.
            None => match read_number(dir, "capacity")? {
                Some(capacity) => (clamp_unsigned(capacity), 100, 0),
                None => return Ok(BatterySnapshot::absent(index)),
            },
        };

        Ok(BatterySnapshot {
            index,
            present: true,
            charge_now,
            charge_full,
            rate,
            state,
        })
    }
}

impl Default for SysfsSource {
    fn default() -> Self {
        Self::new("/sys/class/power_supply")
    }
}

impl BatterySource for SysfsSource {
    fn read(&self, index: u32) -> Result<BatterySnapshot> {
        let dir = self.battery_dir(index);
        let sensor_error = |source: io::Error| BatError::Sensor { index, source };

        if !is_battery_dir(&dir).map_err(sensor_error)? {
            return Ok(BatterySnapshot::absent(index));
        }
        self.read_dir(index, &dir).map_err(sensor_error)
    }
}

/// `Ok(false)` when nothing is there; a failed `stat` is an error, not absence.
fn is_battery_dir(dir: &Path) -> io::Result<bool> {
    match std::fs::metadata(dir) {
        Ok(meta) => Ok(meta.is_dir()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

fn read_counters(dir: &Path) -> io::Result<Option<(u64, u64, u64)>> {
    for [now, full, design, rate] in COUNTER_FAMILIES {
        let Some(now) = read_number(dir, now)? else {
            continue;
        };
        let full = match read_number(dir, full)? {
            Some(full) => full,
            None => read_number(dir, design)?.unwrap_or(0),
        };
        // Several drivers report a negative current while discharging.
        let rate = read_number(dir, rate)?.map_or(0, i64::unsigned_abs);
        return Ok(Some((clamp_unsigned(now), clamp_unsigned(full), rate)));
    }
    Ok(None)
}

/// Read one attribute. A missing file is `Ok(None)`; any other failure is an error.
fn read_attr(dir: &Path, name: &str) -> io::Result<Option<String>> {
    match std::fs::read_to_string(dir.join(name)) {
        Ok(raw) => Ok(Some(raw.trim().to_string())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Garbage in a numeric attribute reads as 0 (a degraded, not absent, battery).
fn read_number(dir: &Path, name: &str) -> io::Result<Option<i64>> {
    Ok(read_attr(dir, name)?.map(|raw| {
        raw.parse().unwrap_or_else(|e| {
            debug!("Ignoring unparseable {name}={raw:?}: {e}");
            0
        })
    }))
}

fn clamp_unsigned(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fake_battery(attrs: &[(&str, &str)]) -> (TempDir, SysfsSource) {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("BAT0");
        fs::create_dir_all(&dir).unwrap();
        for (name, value) in attrs {
            fs::write(dir.join(name), format!("{value}\n")).unwrap();
        }
        let source = SysfsSource::new(root.path());
        (root, source)
    }

    #[test]
    fn missing_battery_is_absent_not_error() {
        let (_root, source) = fake_battery(&[]);
        let snapshot = source.read(3).unwrap();
        assert!(!snapshot.present);
        assert_eq!(snapshot.index, 3);
        assert_eq!(snapshot.state, ChargeState::Unknown);
    }

    #[test]
    fn reads_charge_counters() {
        let (_root, source) = fake_battery(&[
            ("status", "Discharging"),
            ("charge_now", "2500000"),
            ("charge_full", "5000000"),
            ("current_now", "1250000"),
        ]);
        let snapshot = source.read(0).unwrap();
        assert_eq!(
            snapshot,
            BatterySnapshot {
                index:       0,
                present:     true,
                charge_now:  2_500_000,
                charge_full: 5_000_000,
                rate:        1_250_000,
                state:       ChargeState::Discharging,
            }
        );
    }

    #[test]
    fn reads_energy_counters_with_design_fallback_and_negative_rate() {
        let (_root, source) = fake_battery(&[
            ("status", "Charging"),
            ("energy_now", "30000000"),
            ("energy_full_design", "60000000"),
            ("power_now", "-15000000"),
        ]);
        let snapshot = source.read(0).unwrap();
        assert_eq!(snapshot.charge_full, 60_000_000);
        assert_eq!(snapshot.rate, 15_000_000);
        assert_eq!(snapshot.state, ChargeState::Charging);
    }

    #[test]
    fn capacity_only_battery_is_degraded() {
        let (_root, source) = fake_battery(&[("status", "Full"), ("capacity", "97")]);
        let snapshot = source.read(0).unwrap();
        assert!(snapshot.present);
        assert_eq!((snapshot.charge_now, snapshot.charge_full, snapshot.rate), (97, 100, 0));
    }

    #[test]
    fn present_zero_means_absent() {
        let (_root, source) = fake_battery(&[("present", "0"), ("charge_now", "1")]);
        assert!(!source.read(0).unwrap().present);
    }

    #[test]
    fn garbage_numbers_read_as_zero() {
        let (_root, source) = fake_battery(&[
            ("status", "Discharging"),
            ("charge_now", "12"),
            ("charge_full", "n/a"),
        ]);
        let snapshot = source.read(0).unwrap();
        assert!(snapshot.present);
        assert_eq!(snapshot.charge_full, 0);
        assert_eq!(snapshot.rate, 0);
    }

    #[test]
    fn non_directory_entry_is_absent() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("BAT0"), "").unwrap();
        assert!(!SysfsSource::new(root.path()).read(0).unwrap().present);
    }

    #[test]
    fn failed_stat_is_a_sensor_error_not_absence() {
        // A regular file used as the root makes `stat` fail with ENOTDIR,
        // which is not NotFound, even when running as root.
        let root = TempDir::new().unwrap();
        let bogus_root = root.path().join("power_supply");
        fs::write(&bogus_root, "").unwrap();

        let err = SysfsSource::new(&bogus_root).read(0).unwrap_err();
        assert!(matches!(err, BatError::Sensor { index: 0, .. }));
    }

    #[test]
    fn unreadable_attribute_is_a_sensor_error() {
        // A directory where a file is expected makes read_to_string fail
        // with something other than NotFound, whatever user runs the test.
        let (root, source) = fake_battery(&[]);
        fs::create_dir_all(root.path().join("BAT0").join("status")).unwrap();

        let err = source.read(0).unwrap_err();
        assert!(matches!(err, BatError::Sensor { index: 0, .. }));
        assert!(err.is_transient());
    }
}
