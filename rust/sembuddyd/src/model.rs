use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Course {
    #[serde(rename = "Computer Engineering")]
    ComputerEngineering,
    #[serde(rename = "Information Technology")]
    InformationTechnology,
    #[serde(rename = "Civil Engineering")]
    CivilEngineering,
    #[serde(rename = "Mechanical Engineering")]
    MechanicalEngineering,
    #[serde(rename = "Electronics")]
    Electronics,
}

impl Course {
    pub const ALL: [Course; 5] = [
        Course::ComputerEngineering,
        Course::InformationTechnology,
        Course::CivilEngineering,
        Course::MechanicalEngineering,
        Course::Electronics,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Course::ComputerEngineering => "Computer Engineering",
            Course::InformationTechnology => "Information Technology",
            Course::CivilEngineering => "Civil Engineering",
            Course::MechanicalEngineering => "Mechanical Engineering",
            Course::Electronics => "Electronics",
        }
    }

    pub fn parse(raw: &str) -> Option<Course> {
        let t = raw.trim();
        Course::ALL.into_iter().find(|c| c.label() == t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StudyYear {
    #[default]
    FE,
    SE,
    TE,
    BE,
}

impl StudyYear {
    pub fn parse(raw: &str) -> Option<StudyYear> {
        match raw.trim() {
            "FE" => Some(StudyYear::FE),
            "SE" => Some(StudyYear::SE),
            "TE" => Some(StudyYear::TE),
            "BE" => Some(StudyYear::BE),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Scheme {
    #[default]
    I,
    K,
}

impl Scheme {
    pub fn parse(raw: &str) -> Option<Scheme> {
        match raw.trim() {
            "I" => Some(Scheme::I),
            "K" => Some(Scheme::K),
            _ => None,
        }
    }
}

pub const MIN_SEMESTER: u8 = 1;
pub const MAX_SEMESTER: u8 = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub name: String,
    #[serde(default)]
    pub college: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    pub course: Course,
    pub year: StudyYear,
    pub scheme: Scheme,
    pub semester: u8,
}

/// Static catalog entry. Component caps of 0 mean the component does not apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub code: String,
    pub name: String,
    pub semester: u8,
    pub scheme: Scheme,
    #[serde(default)]
    pub has_practical: bool,
    #[serde(default)]
    pub max_theory: f64,
    #[serde(default)]
    pub max_internal: f64,
    #[serde(default)]
    pub max_unit_test: f64,
    #[serde(default)]
    pub max_term_work: f64,
    #[serde(default)]
    pub max_practical: f64,
    #[serde(default)]
    pub max_oral: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syllabus_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub subject_name: String,
    pub conducted: u32,
    pub attended: u32,
}

impl AttendanceRecord {
    pub fn blank_for(subject: &Subject) -> Self {
        Self {
            id: subject.code.clone(),
            subject_name: subject.name.clone(),
            conducted: 0,
            attended: 0,
        }
    }
}

/// Raw scores typed into the calculator for one subject. Unset components count as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarksEntry {
    #[serde(default)]
    pub internal: Option<f64>,
    #[serde(default)]
    pub unit_test: Option<f64>,
    #[serde(default)]
    pub external: Option<f64>,
    #[serde(default)]
    pub term_work: Option<f64>,
    #[serde(default)]
    pub practical: Option<f64>,
    #[serde(default)]
    pub oral: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarksField {
    Internal,
    UnitTest,
    External,
    TermWork,
    Practical,
    Oral,
}

impl MarksField {
    pub fn parse(raw: &str) -> Option<MarksField> {
        match raw.trim() {
            "internal" => Some(MarksField::Internal),
            "unitTest" => Some(MarksField::UnitTest),
            "external" => Some(MarksField::External),
            "termWork" => Some(MarksField::TermWork),
            "practical" => Some(MarksField::Practical),
            "oral" => Some(MarksField::Oral),
            _ => None,
        }
    }
}

impl MarksEntry {
    pub fn set(&mut self, field: MarksField, value: f64) {
        let slot = match field {
            MarksField::Internal => &mut self.internal,
            MarksField::UnitTest => &mut self.unit_test,
            MarksField::External => &mut self.external,
            MarksField::TermWork => &mut self.term_work,
            MarksField::Practical => &mut self.practical,
            MarksField::Oral => &mut self.oral,
        };
        *slot = Some(value);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

impl Theme {
    pub fn parse(raw: &str) -> Option<Theme> {
        match raw.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "system" => Some(Theme::System),
            _ => None,
        }
    }
}

/// Attendance targets offered on the settings screen.
pub const ATTENDANCE_TARGETS: [u32; 4] = [60, 75, 80, 90];
pub const DEFAULT_ATTENDANCE_TARGET: u32 = 75;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_target")]
    pub attendance_target: u32,
}

fn default_target() -> u32 {
    DEFAULT_ATTENDANCE_TARGET
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            attendance_target: DEFAULT_ATTENDANCE_TARGET,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: String,
}
