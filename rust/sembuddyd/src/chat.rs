//! Study-assistant chat: a linear message history plus a single-shot relay to a
//! hosted text-generation model.

use crate::model::{ChatMessage, Sender};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const SYSTEM_INSTRUCTION: &str = "You are SemBuddy, a friendly and helpful engineering tutor assistant. You help students with their studies, syllabus queries, and marks calculations. Keep answers concise and encouraging.";

pub const GREETING: &str = "Hi! I'm SemBuddy AI. I can help you understand your syllabus, explain complex engineering topics, or just chat about your studies. How can I help today?";
pub const EMPTY_REPLY_FALLBACK: &str = "Sorry, I couldn't generate a response right now.";
pub const FAILURE_MESSAGE: &str =
    "I'm having trouble connecting to the network. Please check your internet or API key.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub system_instruction: &'a str,
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// A backend that turns one prompt into one reply. An empty string means the
/// service answered without text.
pub trait ChatRelay {
    fn complete(&self, req: &ChatRequest<'_>) -> Result<String, RelayError>;
}

pub struct GeminiRelay {
    client: reqwest::blocking::Client,
    api_base: String,
    api_key: Option<String>,
}

impl GeminiRelay {
    pub fn new(api_base: &str, api_key: Option<String>) -> Result<Self, RelayError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("sembuddyd/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Text of the first candidate, parts concatenated.
fn reply_text(body: GenerateResponse) -> String {
    body.candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default()
}

impl ChatRelay for GeminiRelay {
    fn complete(&self, req: &ChatRequest<'_>) -> Result<String, RelayError> {
        let Some(key) = self.api_key.as_deref() else {
            return Err(RelayError::MissingApiKey);
        };
        let url = format!("{}/models/{}:generateContent", self.api_base, req.model);
        let payload = json!({
            "systemInstruction": { "parts": [{ "text": req.system_instruction }] },
            "contents": [{ "role": "user", "parts": [{ "text": req.prompt }] }],
        });
        let resp = self
            .client
            .post(url)
            .header("x-goog-api-key", key)
            .json(&payload)
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(RelayError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let body: GenerateResponse = resp
            .json()
            .map_err(|e| RelayError::MalformedResponse(e.to_string()))?;
        Ok(reply_text(body))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum SendOutcome {
    /// Blank input; nothing was sent.
    Ignored,
    Answered {
        user: ChatMessage,
        reply: ChatMessage,
        failed: bool,
    },
}

pub struct ChatSession {
    history: Vec<ChatMessage>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

fn message(text: impl Into<String>, sender: Sender) -> ChatMessage {
    ChatMessage {
        id: uuid::Uuid::new_v4().to_string(),
        text: text.into(),
        sender,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            history: vec![message(GREETING, Sender::Ai)],
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Forward `text` verbatim and append the exchange. Relay failures end up in
    /// the history as one fixed assistant message.
    ///
    /// The call blocks until the relay answers; the request loop handles one
    /// line at a time, so a second send cannot start while this one runs.
    pub fn send(&mut self, relay: &dyn ChatRelay, model: &str, text: &str) -> SendOutcome {
        if text.trim().is_empty() {
            return SendOutcome::Ignored;
        }

        let user = message(text, Sender::User);
        self.history.push(user.clone());
        let result = relay.complete(&ChatRequest {
            model,
            prompt: text,
            system_instruction: SYSTEM_INSTRUCTION,
        });

        let (reply_text, failed) = match result {
            Ok(t) if t.is_empty() => (EMPTY_REPLY_FALLBACK.to_string(), false),
            Ok(t) => (t, false),
            Err(e) => {
                tracing::warn!(error = %e, model, "chat relay failed");
                (FAILURE_MESSAGE.to_string(), true)
            }
        };
        let reply = message(reply_text, Sender::Ai);
        self.history.push(reply.clone());
        SendOutcome::Answered {
            user,
            reply,
            failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct ScriptedRelay {
        reply: Result<&'static str, ()>,
        seen: RefCell<Vec<(String, String, String)>>,
    }

    impl ChatRelay for ScriptedRelay {
        fn complete(&self, req: &ChatRequest<'_>) -> Result<String, RelayError> {
            self.seen.borrow_mut().push((
                req.model.to_string(),
                req.prompt.to_string(),
                req.system_instruction.to_string(),
            ));
            match self.reply {
                Ok(t) => Ok(t.to_string()),
                Err(()) => Err(RelayError::MissingApiKey),
            }
        }
    }

    fn relay(reply: Result<&'static str, ()>) -> ScriptedRelay {
        ScriptedRelay {
            reply,
            seen: RefCell::new(Vec::new()),
        }
    }

    #[test]
    fn history_starts_with_greeting() {
        let s = ChatSession::new();
        assert_eq!(s.history().len(), 1);
        assert_eq!(s.history()[0].text, GREETING);
        assert_eq!(s.history()[0].sender, Sender::Ai);
    }

    #[test]
    fn prompt_is_forwarded_verbatim_with_system_instruction() {
        let r = relay(Ok("Paging splits memory into frames."));
        let mut s = ChatSession::new();
        let out = s.send(&r, DEFAULT_MODEL, "  what is paging?");
        let SendOutcome::Answered { reply, failed, .. } = out else {
            panic!("expected an answer");
        };
        assert!(!failed);
        assert_eq!(reply.text, "Paging splits memory into frames.");
        let seen = r.seen.borrow();
        assert_eq!(seen[0].0, DEFAULT_MODEL);
        assert_eq!(seen[0].1, "  what is paging?");
        assert_eq!(seen[0].2, SYSTEM_INSTRUCTION);
        assert_eq!(s.history().len(), 3);
    }

    #[test]
    fn blank_input_is_ignored() {
        let r = relay(Ok("unused"));
        let mut s = ChatSession::new();
        assert_eq!(s.send(&r, DEFAULT_MODEL, "   "), SendOutcome::Ignored);
        assert!(r.seen.borrow().is_empty());
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn empty_reply_and_failure_use_fixed_text() {
        let mut s = ChatSession::new();
        s.send(&relay(Ok("")), DEFAULT_MODEL, "hi");
        assert_eq!(s.history().last().map(|m| m.text.as_str()), Some(EMPTY_REPLY_FALLBACK));

        let out = s.send(&relay(Err(())), DEFAULT_MODEL, "hi again");
        assert!(matches!(out, SendOutcome::Answered { failed: true, .. }));
        assert_eq!(s.history().last().map(|m| m.text.as_str()), Some(FAILURE_MESSAGE));
    }

    #[test]
    fn reply_text_joins_parts_of_first_candidate() {
        let body: GenerateResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Hello" }, { "text": " there" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))
        .expect("parse");
        assert_eq!(reply_text(body), "Hello there");
        let empty: GenerateResponse = serde_json::from_value(json!({})).expect("parse");
        assert_eq!(reply_text(empty), "");
    }

    #[test]
    fn relay_without_key_fails_before_network() {
        let r = GeminiRelay::new(DEFAULT_API_BASE, Some("  ".to_string())).expect("client");
        let err = r
            .complete(&ChatRequest {
                model: DEFAULT_MODEL,
                prompt: "hi",
                system_instruction: SYSTEM_INSTRUCTION,
            })
            .expect_err("no key");
        assert!(matches!(err, RelayError::MissingApiKey));
    }
}
