use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::get_required_str;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn chat_send(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let text = get_required_str(params, "text")?;
    let outcome = state.chat.send(&*state.relay, &state.chat_model, &text);
    Ok(json!({
        "exchange": outcome,
        "history": state.chat.history(),
    }))
}

fn handle_chat_send(state: &mut AppState, req: &Request) -> serde_json::Value {
    let result = chat_send(state, &req.params);
    respond(&req.id, result)
}

fn handle_chat_history(state: &mut AppState, req: &Request) -> serde_json::Value {
    respond(
        &req.id,
        Ok(json!({
            "messages": state.chat.history(),
            "model": state.chat_model,
        })),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "chat.history" => Some(handle_chat_history(state, req)),
        "chat.send" => Some(handle_chat_send(state, req)),
        _ => None,
    }
}
