use crate::calc::{self, AttendanceStats, DASHBOARD_ON_TRACK_PERCENT};
use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{get_counter, get_optional_u32, get_required_str};
use crate::ipc::types::{AppState, Request};
use crate::model::AttendanceRecord;
use serde_json::json;

fn advice(stats: &AttendanceStats) -> serde_json::Value {
    if stats.below_target {
        json!({ "kind": "attend", "lectures": stats.need_to_attend })
    } else {
        json!({ "kind": "bunk", "lectures": stats.can_bunk })
    }
}

fn record_row(record: &AttendanceRecord, target: u32) -> serde_json::Value {
    let stats = calc::attendance_stats(record.attended, record.conducted, target);
    json!({
        "id": record.id,
        "subjectName": record.subject_name,
        "conducted": record.conducted,
        "attended": record.attended,
        "missed": record.conducted.saturating_sub(record.attended),
        "percentageDisplay": calc::round_off_1_decimal(stats.percentage),
        "stats": stats,
        "advice": advice(&stats),
    })
}

fn attendance_list(state: &AppState) -> serde_json::Value {
    let target = state.settings.attendance_target;
    let rows: Vec<serde_json::Value> = state
        .attendance
        .iter()
        .map(|r| record_row(r, target))
        .collect();
    json!({ "target": target, "records": rows })
}

fn attendance_update(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let id = get_required_str(params, "id")?;
    let conducted = get_counter(params, "conducted")?;
    let attended = get_counter(params, "attended")?;
    let Some(record) = state.attendance.iter_mut().find(|r| r.id == id) else {
        return Err(HandlerErr::not_found(format!("no attendance record for {}", id)));
    };
    if attended > conducted {
        tracing::debug!(%id, attended, conducted, "attended exceeds conducted");
    }
    record.conducted = conducted;
    record.attended = attended;
    let row = record_row(record, state.settings.attendance_target);
    state.persist_attendance();
    Ok(json!({ "record": row }))
}

fn attendance_stats(
    state: &AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let conducted = get_counter(params, "conducted")?;
    let attended = get_counter(params, "attended")?;
    let target = get_optional_u32(params, "target")?.unwrap_or(state.settings.attendance_target);
    if target > 100 {
        return Err(HandlerErr::bad_params("target must be between 0 and 100"));
    }
    let stats = calc::attendance_stats(attended, conducted, target);
    Ok(json!({ "target": target, "stats": stats, "advice": advice(&stats) }))
}

fn dashboard_summary(state: &AppState) -> serde_json::Value {
    let overall = calc::overall_attendance(state.attendance.iter().map(|r| (r.attended, r.conducted)));
    let attended: u64 = state.attendance.iter().map(|r| u64::from(r.attended)).sum();
    let conducted: u64 = state.attendance.iter().map(|r| u64::from(r.conducted)).sum();
    json!({
        "profile": state.profile,
        "overallAttendance": overall,
        "overallDisplay": calc::round_off_1_decimal(overall),
        "onTrack": overall >= DASHBOARD_ON_TRACK_PERCENT,
        "totalAttended": attended,
        "totalConducted": conducted,
        "subjectCount": state.attendance.len(),
    })
}

fn handle_attendance_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    respond(&req.id, Ok(attendance_list(state)))
}

fn handle_attendance_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let result = attendance_update(state, &req.params);
    respond(&req.id, result)
}

fn handle_attendance_stats(state: &mut AppState, req: &Request) -> serde_json::Value {
    respond(&req.id, attendance_stats(state, &req.params))
}

fn handle_dashboard_summary(state: &mut AppState, req: &Request) -> serde_json::Value {
    respond(&req.id, Ok(dashboard_summary(state)))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "attendance.list" => Some(handle_attendance_list(state, req)),
        "attendance.update" => Some(handle_attendance_update(state, req)),
        "attendance.stats" => Some(handle_attendance_stats(state, req)),
        "dashboard.summary" => Some(handle_dashboard_summary(state, req)),
        _ => None,
    }
}
