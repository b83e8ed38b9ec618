use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{get_optional_str, get_optional_u32};
use crate::ipc::types::{AppState, Request};
use crate::model::{Theme, ATTENDANCE_TARGETS};
use serde_json::json;

fn settings_result(state: &AppState) -> serde_json::Value {
    json!({
        "settings": state.settings,
        "targetOptions": ATTENDANCE_TARGETS,
        "themeOptions": [Theme::Light, Theme::Dark, Theme::System],
        "profile": state.profile,
    })
}

fn settings_update(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let patch = params.get("patch").unwrap_or(params);
    let mut next = state.settings.clone();
    if let Some(raw) = get_optional_str(patch, "theme") {
        next.theme =
            Theme::parse(raw).ok_or_else(|| HandlerErr::bad_params(format!("unknown theme: {}", raw)))?;
    }
    if let Some(target) = get_optional_u32(patch, "attendanceTarget")? {
        if !ATTENDANCE_TARGETS.contains(&target) {
            return Err(HandlerErr {
                code: "bad_params",
                message: format!("attendanceTarget must be one of {:?}", ATTENDANCE_TARGETS),
                details: Some(json!({ "allowed": ATTENDANCE_TARGETS })),
            });
        }
        next.attendance_target = target;
    }
    if next != state.settings {
        state.settings = next;
        state.persist_settings();
    }
    Ok(settings_result(state))
}

fn handle_settings_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    respond(&req.id, Ok(settings_result(state)))
}

fn handle_settings_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let result = settings_update(state, &req.params);
    respond(&req.id, result)
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "settings.get" => Some(handle_settings_get(state, req)),
        "settings.update" => Some(handle_settings_update(state, req)),
        _ => None,
    }
}
