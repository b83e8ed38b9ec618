#[path = "../src/model.rs"]
mod model;
#[path = "../src/calc.rs"]
mod calc;

use calc::{attendance_percentage, attendance_stats, can_bunk, need_to_attend, AttendanceStatus};
use proptest::prelude::*;

/// `attended / conducted >= target / 100` without floating point.
fn meets(attended: u64, conducted: u64, target: u64) -> bool {
    100 * attended >= target * conducted
}

const TARGETS: [u32; 4] = [60, 75, 80, 90];

proptest! {
    #[test]
    fn percentage_stays_in_range(conducted in 0u32..5000, frac in 0.0f64..=1.0) {
        let attended = (f64::from(conducted) * frac).floor() as u32;
        let p = attendance_percentage(attended, conducted);
        prop_assert!((0.0..=100.0).contains(&p));
        prop_assert!(p.is_finite());
    }

    #[test]
    fn attending_need_to_attend_lectures_reaches_target(
        conducted in 0u32..2000,
        frac in 0.0f64..=1.0,
        t_idx in 0usize..4,
    ) {
        let target = TARGETS[t_idx];
        let attended = (f64::from(conducted) * frac).floor() as u32;
        let n = need_to_attend(attended, conducted, target).expect("reachable below 100%");
        let (a, c, t) = (u64::from(attended), u64::from(conducted), u64::from(target));
        prop_assert!(meets(a + u64::from(n), c + u64::from(n), t));
        if n > 0 {
            // One fewer is not enough.
            prop_assert!(!meets(a + u64::from(n) - 1, c + u64::from(n) - 1, t));
        }
    }

    #[test]
    fn can_bunk_is_tight(
        conducted in 0u32..2000,
        frac in 0.0f64..=1.0,
        t_idx in 0usize..4,
    ) {
        let target = TARGETS[t_idx];
        let attended = (f64::from(conducted) * frac).floor() as u32;
        let k = can_bunk(attended, conducted, target);
        let (a, c, t) = (u64::from(attended), u64::from(conducted), u64::from(target));
        if k > 0 {
            prop_assert!(meets(a, c + u64::from(k), t));
        }
        if meets(a, c, t) {
            prop_assert!(!meets(a, c + u64::from(k) + 1, t));
        } else {
            prop_assert_eq!(k, 0);
        }
    }

    #[test]
    fn stats_never_produce_nan(attended in 0u32..10_000, conducted in 0u32..10_000, target in 0u32..=100) {
        let s = attendance_stats(attended, conducted, target);
        prop_assert!(s.percentage.is_finite());
        prop_assert!(s.percentage >= 0.0);
    }
}

#[test]
fn zero_over_zero_is_zero_percent() {
    assert_eq!(attendance_percentage(0, 0), 0.0);
    let s = attendance_stats(0, 0, 75);
    assert_eq!(s.can_bunk, 0);
    assert_eq!(s.need_to_attend, Some(0));
    // A fresh record reads as 0% and is below target, with nothing to catch up on.
    assert!(s.below_target);
    assert_eq!(s.status, AttendanceStatus::Danger);
}

#[test]
fn ten_conducted_six_attended_at_seventy_five() {
    let s = attendance_stats(6, 10, 75);
    assert_eq!(s.percentage, 60.0);
    assert_eq!(s.need_to_attend, Some(6));
    assert_eq!(s.can_bunk, 0);
    assert_eq!(s.status, AttendanceStatus::Warning);
    assert!(s.below_target);
    // Attending six straight: 12/16 is exactly 75%, five is not enough.
    assert_eq!(attendance_percentage(12, 16), 75.0);
    assert!(attendance_percentage(11, 15) < 75.0);
    // Twelve more also clears the bar (18/22), just not minimally.
    assert!(attendance_percentage(18, 22) >= 75.0);
}

#[test]
fn safe_record_reports_bunkable_lectures() {
    // 18/20 at 75%: 18 / 0.75 = 24, minus 20 conducted.
    let s = attendance_stats(18, 20, 75);
    assert_eq!(s.can_bunk, 4);
    assert_eq!(s.need_to_attend, Some(0));
    assert_eq!(s.status, AttendanceStatus::Safe);
    assert!(attendance_percentage(18, 24) >= 75.0);
    assert!(attendance_percentage(18, 25) < 75.0);
}

#[test]
fn sixty_percent_target_uses_exact_arithmetic() {
    // 3 attended at 60% covers exactly 5 conducted.
    assert_eq!(can_bunk(3, 4, 60), 1);
    assert_eq!(can_bunk(3, 5, 60), 0);
}
