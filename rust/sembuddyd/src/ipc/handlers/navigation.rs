use crate::catalog::INTRO_SLIDES;
use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::get_required_str;
use crate::ipc::types::{AppState, Request};
use crate::session::{Screen, Transition};
use serde_json::json;

pub fn session_snapshot(state: &AppState) -> serde_json::Value {
    let screen = state.nav.screen();
    let mut v = json!({
        "screen": screen,
        "registered": state.has_profile(),
    });
    if screen == Screen::Onboarding {
        let idx = state.nav.slide();
        v["slide"] = json!({
            "index": idx,
            "count": INTRO_SLIDES.len(),
            "isLast": idx + 1 == INTRO_SLIDES.len(),
            "content": INTRO_SLIDES.get(idx),
        });
    }
    v
}

fn transition_result(state: &AppState, t: Transition) -> serde_json::Value {
    let mut v = session_snapshot(state);
    v["from"] = json!(t.from);
    v["redirected"] = json!(t.redirected);
    v
}

fn handle_session_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    respond(&req.id, Ok(session_snapshot(state)))
}

fn handle_splash_complete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let has_profile = state.has_profile();
    let t = state.nav.splash_complete(has_profile);
    state.ensure_attendance_seeded();
    respond(&req.id, Ok(transition_result(state, t)))
}

fn handle_onboarding_next(state: &mut AppState, req: &Request) -> serde_json::Value {
    let has_profile = state.has_profile();
    let t = state.nav.onboarding_next(has_profile);
    respond(&req.id, Ok(transition_result(state, t)))
}

fn nav_goto(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let raw = get_required_str(params, "screen")?;
    let target = Screen::parse(&raw)
        .ok_or_else(|| HandlerErr::bad_params(format!("unknown screen: {}", raw)))?;
    let has_profile = state.has_profile();
    let t = state.nav.goto(target, has_profile);
    if t.redirected {
        tracing::debug!(requested = ?target, landed = ?t.to, "navigation redirected");
    }
    Ok(transition_result(state, t))
}

fn handle_nav_goto(state: &mut AppState, req: &Request) -> serde_json::Value {
    let result = nav_goto(state, &req.params);
    respond(&req.id, result)
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "session.get" => Some(handle_session_get(state, req)),
        "nav.splashComplete" => Some(handle_splash_complete(state, req)),
        "nav.onboardingNext" => Some(handle_onboarding_next(state, req)),
        "nav.goto" => Some(handle_nav_goto(state, req)),
        _ => None,
    }
}
