use crate::model::{MarksEntry, Subject};
use serde::Serialize;
use std::collections::HashMap;

pub const PASS_PERCENT: f64 = 35.0;
pub const DISTINCTION_PERCENT: f64 = 75.0;
/// Below the target but at or above this, a record is shown as a warning rather than danger.
pub const WARNING_PERCENT: f64 = 60.0;
/// The dashboard headline uses a fixed bar, independent of the configured target.
pub const DASHBOARD_ON_TRACK_PERCENT: f64 = 75.0;

/// 1-decimal rounding for display values: `Int(10*x + 0.5) / 10`.
pub fn round_off_1_decimal(x: f64) -> f64 {
    ((10.0 * x) + 0.5).floor() / 10.0
}

pub fn attendance_percentage(attended: u32, conducted: u32) -> f64 {
    if conducted == 0 {
        return 0.0;
    }
    100.0 * f64::from(attended) / f64::from(conducted)
}

/// Lectures that can still be skipped while staying at or above `target`,
/// assuming no further lectures are conducted: `floor(A / (T/100) - C)`.
pub fn can_bunk(attended: u32, conducted: u32, target: u32) -> u32 {
    if target == 0 {
        return 0;
    }
    let a = i64::from(attended);
    let c = i64::from(conducted);
    let t = i64::from(target);
    let slack = 100 * a - t * c;
    if slack <= 0 {
        return 0;
    }
    u32::try_from(slack / t).unwrap_or(u32::MAX)
}

/// Consecutive lectures to attend before the percentage reaches `target`:
/// `ceil((T*C - 100*A) / (100 - T))`. `None` when the target can never be reached
/// (a 100% target with a lecture already missed).
pub fn need_to_attend(attended: u32, conducted: u32, target: u32) -> Option<u32> {
    let a = i64::from(attended);
    let c = i64::from(conducted);
    let t = i64::from(target);
    let deficit = t * c - 100 * a;
    if deficit <= 0 {
        return Some(0);
    }
    if target >= 100 {
        return None;
    }
    let denom = 100 - t;
    let n = (deficit + denom - 1) / denom;
    Some(u32::try_from(n).unwrap_or(u32::MAX))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Safe,
    Warning,
    Danger,
}

pub fn attendance_status(percentage: f64, target: u32) -> AttendanceStatus {
    if percentage >= f64::from(target) {
        AttendanceStatus::Safe
    } else if percentage >= WARNING_PERCENT {
        AttendanceStatus::Warning
    } else {
        AttendanceStatus::Danger
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStats {
    pub percentage: f64,
    pub can_bunk: u32,
    pub need_to_attend: Option<u32>,
    pub status: AttendanceStatus,
    pub below_target: bool,
}

pub fn attendance_stats(attended: u32, conducted: u32, target: u32) -> AttendanceStats {
    let percentage = attendance_percentage(attended, conducted);
    AttendanceStats {
        percentage,
        can_bunk: can_bunk(attended, conducted, target),
        need_to_attend: need_to_attend(attended, conducted, target),
        status: attendance_status(percentage, target),
        below_target: percentage < f64::from(target),
    }
}

/// Aggregate over all subjects: `sum(attended) / max(1, sum(conducted))`.
pub fn overall_attendance<I>(counts: I) -> f64
where
    I: IntoIterator<Item = (u32, u32)>,
{
    let mut any = false;
    let mut attended: u64 = 0;
    let mut conducted: u64 = 0;
    for (a, c) in counts {
        any = true;
        attended += u64::from(a);
        conducted += u64::from(c);
    }
    if !any {
        return 0.0;
    }
    100.0 * attended as f64 / conducted.max(1) as f64
}

pub fn marks_obtained(entry: &MarksEntry) -> f64 {
    [
        entry.internal,
        entry.unit_test,
        entry.external,
        entry.term_work,
        entry.practical,
        entry.oral,
    ]
    .iter()
    .map(|v| v.unwrap_or(0.0))
    .sum()
}

pub fn marks_maximum(subject: &Subject) -> f64 {
    subject.max_theory
        + subject.max_internal
        + subject.max_unit_test
        + subject.max_term_work
        + subject.max_practical
        + subject.max_oral
}

pub fn marks_percentage(obtained: f64, maximum: f64) -> f64 {
    if maximum > 0.0 {
        100.0 * obtained / maximum
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectResult {
    pub code: String,
    pub name: String,
    pub obtained: f64,
    pub maximum: f64,
    pub percentage: f64,
    pub passed: bool,
    pub distinction: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterResult {
    pub subjects: Vec<SubjectResult>,
    pub total_obtained: f64,
    pub total_maximum: f64,
    pub percentage: f64,
    pub passed: bool,
    pub distinction: bool,
}

pub fn subject_result(subject: &Subject, entry: Option<&MarksEntry>) -> SubjectResult {
    let obtained = entry.map(marks_obtained).unwrap_or(0.0);
    let maximum = marks_maximum(subject);
    let percentage = marks_percentage(obtained, maximum);
    SubjectResult {
        code: subject.code.clone(),
        name: subject.name.clone(),
        obtained,
        maximum,
        percentage,
        passed: percentage >= PASS_PERCENT,
        distinction: percentage >= DISTINCTION_PERCENT,
    }
}

/// Marksheet over every subject of the catalog; subjects without entries score 0.
pub fn semester_result(subjects: &[Subject], entries: &HashMap<String, MarksEntry>) -> SemesterResult {
    let rows: Vec<SubjectResult> = subjects
        .iter()
        .map(|s| subject_result(s, entries.get(&s.code)))
        .collect();
    let total_obtained: f64 = rows.iter().map(|r| r.obtained).sum();
    let total_maximum: f64 = rows.iter().map(|r| r.maximum).sum();
    let percentage = marks_percentage(total_obtained, total_maximum);
    SemesterResult {
        subjects: rows,
        total_obtained,
        total_maximum,
        percentage,
        passed: percentage >= PASS_PERCENT,
        distinction: percentage >= DISTINCTION_PERCENT,
    }
}

/// Form input as typed: anything that is not a finite number counts as 0.
pub fn parse_score_input(raw: &serde_json::Value) -> f64 {
    let v = match raw {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
