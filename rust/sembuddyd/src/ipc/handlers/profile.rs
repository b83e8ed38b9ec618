use crate::catalog;
use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::handlers::navigation::session_snapshot;
use crate::ipc::helpers::{get_optional_str, get_optional_u32};
use crate::ipc::types::{AppState, Request};
use crate::model::{Course, Scheme, StudentProfile, StudyYear, MAX_SEMESTER, MIN_SEMESTER};
use serde_json::json;

enum Registration {
    Complete(StudentProfile),
    Incomplete(Vec<&'static str>),
}

fn text_field(form: &serde_json::Value, key: &str) -> String {
    get_optional_str(form, key).unwrap_or("").trim().to_string()
}

fn parse_registration(form: &serde_json::Value) -> Result<Registration, HandlerErr> {
    if !form.is_object() {
        return Err(HandlerErr::bad_params("profile must be an object"));
    }

    let name = text_field(form, "name");
    let course_raw = text_field(form, "course");
    let mut missing = Vec::new();
    if name.is_empty() {
        missing.push("name");
    }
    if course_raw.is_empty() {
        missing.push("course");
    }
    if !missing.is_empty() {
        return Ok(Registration::Incomplete(missing));
    }

    let course = Course::parse(&course_raw)
        .ok_or_else(|| HandlerErr::bad_params(format!("unknown course: {}", course_raw)))?;
    let year = match get_optional_str(form, "year") {
        Some(raw) => StudyYear::parse(raw)
            .ok_or_else(|| HandlerErr::bad_params(format!("unknown year: {}", raw)))?,
        None => StudyYear::default(),
    };
    let scheme = match get_optional_str(form, "scheme") {
        Some(raw) => Scheme::parse(raw)
            .ok_or_else(|| HandlerErr::bad_params(format!("unknown scheme: {}", raw)))?,
        None => Scheme::default(),
    };
    let semester = get_optional_u32(form, "semester")?.unwrap_or(u32::from(MIN_SEMESTER));
    let semester = u8::try_from(semester)
        .ok()
        .filter(|s| (MIN_SEMESTER..=MAX_SEMESTER).contains(s))
        .ok_or_else(|| {
            HandlerErr::bad_params(format!(
                "semester must be between {} and {}",
                MIN_SEMESTER, MAX_SEMESTER
            ))
        })?;

    Ok(Registration::Complete(StudentProfile {
        name,
        college: text_field(form, "college"),
        phone: text_field(form, "phone"),
        email: text_field(form, "email"),
        course,
        year,
        scheme,
        semester,
    }))
}

fn profile_register(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let form = params.get("profile").unwrap_or(params);
    let profile = match parse_registration(form)? {
        Registration::Complete(p) => p,
        Registration::Incomplete(missing) => {
            return Ok(json!({
                "registered": false,
                "missingFields": missing,
            }));
        }
    };

    tracing::info!(course = profile.course.label(), semester = profile.semester, "profile registered");
    state.profile = Some(profile);
    state.persist_profile();
    // A new registration always starts from a clean attendance sheet.
    state.attendance = catalog::seed_attendance(&state.subjects);
    state.persist_attendance();
    state.nav.registered();

    Ok(json!({
        "registered": true,
        "profile": state.profile,
        "session": session_snapshot(state),
    }))
}

fn handle_profile_register(state: &mut AppState, req: &Request) -> serde_json::Value {
    let result = profile_register(state, &req.params);
    respond(&req.id, result)
}

fn handle_profile_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    respond(&req.id, Ok(json!({ "profile": state.profile })))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "profile.get" => Some(handle_profile_get(state, req)),
        "profile.register" => Some(handle_profile_register(state, req)),
        _ => None,
    }
}
