use batmon_core::{BatterySnapshot, BatteryStatus, ChargeState};

const SECS_PER_HOUR: u128 = 3600;

/// Derive percentage, charging direction and time remaining from one snapshot.
///
/// Pure: the result depends on `snapshot` only. Degraded readings (zero full
/// capacity, zero rate, unknown state) still yield a status, just without a
/// time estimate.
pub fn estimate(snapshot: &BatterySnapshot) -> BatteryStatus {
    if !snapshot.present {
        return BatteryStatus::absent();
    }

    let now  = u128::from(snapshot.charge_now);
    let full = u128::from(snapshot.charge_full);
    let rate = u128::from(snapshot.rate);

    let percentage = match snapshot.state {
        ChargeState::Full => 100,
        _ => percent(now, full),
    };

    let seconds = match snapshot.state {
        // Sensor noise can push `now` past `full`; saturate to "nothing left to charge".
        ChargeState::Charging if rate > 0 && full > 0 => {
            full.saturating_sub(now) * SECS_PER_HOUR / rate
        }
        ChargeState::Discharging if rate > 0 && full > 0 && percentage < 100 => {
            now * SECS_PER_HOUR / rate
        }
        _ => 0,
    };

    BatteryStatus {
        present:           true,
        percentage,
        is_charging:       snapshot.state == ChargeState::Charging,
        seconds_remaining: u64::try_from(seconds).unwrap_or(u64::MAX),
        state:             snapshot.state,
    }
}

/// `round(100 * now / full)` clamped to `0..=100`; `0` when `full` is zero.
fn percent(now: u128, full: u128) -> u8 {
    if full == 0 {
        return 0;
    }
    let rounded = (now * 200 + full) / (full * 2);
    rounded.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn snapshot(state: ChargeState, now: u64, full: u64, rate: u64) -> BatterySnapshot {
        BatterySnapshot {
            index: 0,
            present: true,
            charge_now: now,
            charge_full: full,
            rate,
            state,
        }
    }

    #[test]
    fn absent_short_circuits() {
        let status = estimate(&BatterySnapshot::absent(1));
        assert!(!status.present);
        assert_eq!(status, BatteryStatus::absent());
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(estimate(&snapshot(ChargeState::Discharging, 1, 3, 0)).percentage, 33);
        assert_eq!(estimate(&snapshot(ChargeState::Discharging, 2, 3, 0)).percentage, 67);
        assert_eq!(estimate(&snapshot(ChargeState::Discharging, 1, 200, 0)).percentage, 1);
    }

    #[test]
    fn zero_full_capacity_is_degraded_not_absent() {
        let status = estimate(&snapshot(ChargeState::Discharging, 500, 0, 100));
        assert!(status.present);
        assert_eq!(status.percentage, 0);
        assert_eq!(status.seconds_remaining, 0);
    }

    #[test]
    fn full_state_forces_hundred_and_not_charging() {
        let status = estimate(&snapshot(ChargeState::Full, 4_800, 5_000, 300));
        assert_eq!(status.percentage, 100);
        assert!(!status.is_charging);
        assert_eq!(status.seconds_remaining, 0);
    }

    #[test]
    fn charging_estimates_time_to_full() {
        let status = estimate(&snapshot(ChargeState::Charging, 25_000, 50_000, 25_000));
        assert!(status.is_charging);
        assert_eq!(status.percentage, 50);
        assert_eq!(status.seconds_remaining, 3_600);
    }

    #[test]
    fn discharging_estimates_time_to_empty() {
        let status = estimate(&snapshot(ChargeState::Discharging, 25_000, 50_000, 12_500));
        assert!(!status.is_charging);
        assert_eq!(status.seconds_remaining, 7_200);
    }

    #[test]
    fn no_estimate_without_rate_or_direction() {
        assert_eq!(estimate(&snapshot(ChargeState::Charging, 10, 100, 0)).seconds_remaining, 0);
        assert_eq!(estimate(&snapshot(ChargeState::Discharging, 10, 100, 0)).seconds_remaining, 0);
        assert_eq!(estimate(&snapshot(ChargeState::Unknown, 10, 100, 50)).seconds_remaining, 0);
    }

    #[test]
    fn discharging_at_hundred_percent_has_no_estimate() {
        let status = estimate(&snapshot(ChargeState::Discharging, 5_000, 5_000, 100));
        assert_eq!(status.percentage, 100);
        assert_eq!(status.seconds_remaining, 0);
    }

    #[test]
    fn overcharged_reading_clamps() {
        let status = estimate(&snapshot(ChargeState::Charging, 5_200, 5_000, 100));
        assert_eq!(status.percentage, 100);
        assert_eq!(status.seconds_remaining, 0);
    }

    #[test]
    fn huge_counters_do_not_overflow() {
        let status = estimate(&snapshot(ChargeState::Discharging, u64::MAX - 1, u64::MAX, 1));
        assert_eq!(status.percentage, 100);
        assert_eq!(status.seconds_remaining, 0);

        let status = estimate(&snapshot(ChargeState::Discharging, u64::MAX / 2, u64::MAX, 1));
        assert_eq!(status.seconds_remaining, u64::MAX);
    }

    fn any_state() -> impl Strategy<Value = ChargeState> {
        prop_oneof![
            Just(ChargeState::Charging),
            Just(ChargeState::Discharging),
            Just(ChargeState::Full),
            Just(ChargeState::Unknown),
        ]
    }

    proptest! {
        #[test]
        fn percentage_stays_in_range(
            state in any_state(),
            now in any::<u64>(),
            full in 1..=u64::MAX,
            rate in any::<u64>(),
        ) {
            let snap = snapshot(state, now, full, rate);
            let status = estimate(&snap);
            prop_assert!(status.present);
            prop_assert!(status.percentage <= 100);
            prop_assert_eq!(status, estimate(&snap));
        }
    }
}
