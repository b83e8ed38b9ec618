use crate::catalog::{self, INTRO_SLIDES};
use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{get_optional_str, get_optional_u32};
use crate::ipc::types::{AppState, Request};
use crate::model::Scheme;
use serde_json::json;

fn syllabus_list(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let semester = get_optional_u32(params, "semester")?
        .map(|s| u8::try_from(s).map_err(|_| HandlerErr::bad_params("semester out of range")))
        .transpose()?;
    let scheme = match get_optional_str(params, "scheme") {
        Some(raw) => Some(
            Scheme::parse(raw)
                .ok_or_else(|| HandlerErr::bad_params(format!("unknown scheme: {}", raw)))?,
        ),
        None => None,
    };
    let subjects = catalog::filter_subjects(state.subjects.clone(), semester, scheme);
    Ok(json!({ "subjects": subjects, "count": subjects.len() }))
}

fn handle_syllabus_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    respond(&req.id, syllabus_list(state, &req.params))
}

fn handle_courses(_state: &mut AppState, req: &Request) -> serde_json::Value {
    respond(&req.id, Ok(json!({ "courses": catalog::course_labels() })))
}

fn handle_slides(_state: &mut AppState, req: &Request) -> serde_json::Value {
    respond(&req.id, Ok(json!({ "slides": INTRO_SLIDES })))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "syllabus.list" => Some(handle_syllabus_list(state, req)),
        "catalog.courses" => Some(handle_courses(state, req)),
        "catalog.slides" => Some(handle_slides(state, req)),
        _ => None,
    }
}
