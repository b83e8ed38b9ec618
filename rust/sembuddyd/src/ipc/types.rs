use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use serde::Deserialize;

use crate::catalog;
use crate::chat::{ChatRelay, ChatSession};
use crate::db;
use crate::model::{AppSettings, AttendanceRecord, MarksEntry, StudentProfile, Subject};
use crate::session::Navigator;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Everything a session knows. Owned by the request loop and handed to each
/// handler by `&mut`.
pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub db: Option<Connection>,
    pub profile: Option<StudentProfile>,
    pub settings: AppSettings,
    pub attendance: Vec<AttendanceRecord>,
    pub subjects: Vec<Subject>,
    /// Calculator entries keyed by subject code; never persisted.
    pub marks: HashMap<String, MarksEntry>,
    pub nav: Navigator,
    pub chat: ChatSession,
    pub relay: Box<dyn ChatRelay>,
    pub chat_model: String,
}

impl AppState {
    pub fn new(relay: Box<dyn ChatRelay>, chat_model: String) -> Self {
        Self {
            workspace: None,
            db: None,
            profile: None,
            settings: AppSettings::default(),
            attendance: Vec::new(),
            subjects: catalog::active_subjects(),
            marks: HashMap::new(),
            nav: Navigator::new(),
            chat: ChatSession::new(),
            relay,
            chat_model,
        }
    }

    pub fn has_profile(&self) -> bool {
        self.profile.is_some()
    }

    /// Open (or create) the store under `path` and load the three entries from it.
    pub fn open_workspace(&mut self, path: &Path) -> anyhow::Result<()> {
        let conn = db::open_db(path)?;
        self.profile = db::load_profile(&conn);
        self.settings = db::load_settings(&conn);
        self.attendance = db::load_attendance(&conn);
        self.workspace = Some(path.to_path_buf());
        self.db = Some(conn);
        tracing::info!(
            workspace = %path.display(),
            registered = self.profile.is_some(),
            subjects = self.attendance.len(),
            "workspace opened"
        );
        self.ensure_attendance_seeded();
        // The loaded profile may differ from the one the current screen was guarded on.
        let current = self.nav.screen();
        let has_profile = self.has_profile();
        self.nav.goto(current, has_profile);
        Ok(())
    }

    /// A registered profile with no attendance list gets one zeroed record per subject.
    pub fn ensure_attendance_seeded(&mut self) {
        if self.profile.is_some() && self.attendance.is_empty() {
            self.attendance = catalog::seed_attendance(&self.subjects);
            self.persist_attendance();
        }
    }

    pub fn persist_profile(&self) {
        if let (Some(conn), Some(p)) = (self.db.as_ref(), self.profile.as_ref()) {
            db::save_profile(conn, p);
        }
    }

    pub fn persist_settings(&self) {
        if let Some(conn) = self.db.as_ref() {
            db::save_settings(conn, &self.settings);
        }
    }

    pub fn persist_attendance(&self) {
        if let Some(conn) = self.db.as_ref() {
            db::save_attendance(conn, &self.attendance);
        }
    }

    /// Drop every store entry and all in-memory session state. The workspace stays open.
    pub fn reset_all(&mut self) {
        if let Some(conn) = self.db.as_ref() {
            db::clear_all(conn);
        }
        self.profile = None;
        self.settings = AppSettings::default();
        self.attendance.clear();
        self.marks.clear();
        self.chat = ChatSession::new();
        self.nav.reset();
    }
}
