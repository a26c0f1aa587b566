use allowance_core::config::SyncConfig;
use allowance_core::models::SyncState;
use allowance_sync::{decide, DecisionReason};
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap()
}

fn state(last: u32, pushed_secs_ago: i64) -> SyncState {
    SyncState::pushed(t0() - Duration::seconds(pushed_secs_ago), last)
}

proptest! {
    #[test]
    fn increase_always_pushes(
        last in 0u32..1_440,
        bump in 1u32..600,
        ago in 0i64..100_000,
    ) {
        let cfg = SyncConfig::default();
        let s = state(last, ago);
        let d = decide(Some(&s), last + bump, t0(), &cfg);
        prop_assert!(d.push);
        prop_assert_eq!(d.reason, DecisionReason::Increase);
    }

    #[test]
    fn exhaustion_always_pushes(last in 1u32..1_440, ago in 0i64..100_000) {
        let cfg = SyncConfig::default();
        let s = state(last, ago);
        let d = decide(Some(&s), 0, t0(), &cfg);
        prop_assert!(d.push);
        prop_assert_eq!(d.reason, DecisionReason::Exhausted);
    }

    #[test]
    fn decide_is_idempotent(
        last in 0u32..1_440,
        new in 0u32..1_440,
        ago in 0i64..100_000,
        never in any::<bool>(),
    ) {
        let cfg = SyncConfig::default();
        let s = if never {
            SyncState { last_pushed_minutes: last, last_push_time: None }
        } else {
            state(last, ago)
        };
        let first = decide(Some(&s), new, t0(), &cfg);
        let second = decide(Some(&s), new, t0(), &cfg);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn steady_state_above_threshold_waits(
        minutes in 30u32..1_440,
        ago in 0i64..3_600,
    ) {
        let cfg = SyncConfig::default();
        let s = state(minutes, ago);
        let d = decide(Some(&s), minutes, t0(), &cfg);
        prop_assert!(!d.push);
        prop_assert_eq!(d.reason, DecisionReason::NotDue);
    }

    #[test]
    fn decrease_never_pushes_before_aggressive_window(
        (last, new) in (2u32..1_440).prop_flat_map(|l| (Just(l), 1..l)),
        ago in 0i64..600,
    ) {
        let cfg = SyncConfig::default();
        let s = state(last, ago);
        let d = decide(Some(&s), new, t0(), &cfg);
        prop_assert!(!d.push);
    }
}
