use crate::model::{AttendanceRecord, Course, Scheme, Subject};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntroSlide {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

pub const INTRO_SLIDES: [IntroSlide; 3] = [
    IntroSlide {
        id: 1,
        title: "Track Attendance",
        description: "Never fall below 75%. Calculate bunkable lectures instantly.",
        icon: "CheckCircle",
    },
    IntroSlide {
        id: 2,
        title: "Calculate Marks",
        description: "Predict your pointer. MSBTE style marksheet generation.",
        icon: "Calculator",
    },
    IntroSlide {
        id: 3,
        title: "Access Syllabus",
        description: "Subject details, codes, and syllabus copies in your pocket.",
        icon: "BookOpen",
    },
];

fn sem5_subject(code: &str, name: &str, max_practical: f64) -> Subject {
    Subject {
        code: code.to_string(),
        name: name.to_string(),
        semester: 5,
        scheme: Scheme::I,
        has_practical: true,
        max_theory: 70.0,
        max_internal: 30.0,
        max_unit_test: 20.0,
        max_term_work: 25.0,
        max_practical,
        max_oral: 0.0,
        syllabus_url: Some("#".to_string()),
    }
}

/// The subject catalog every screen works from. There is a single built-in
/// catalog; profiles for other semesters still see it.
pub fn active_subjects() -> Vec<Subject> {
    vec![
        sem5_subject("22516", "Operating System", 25.0),
        sem5_subject("22517", "Advanced Java", 50.0),
        sem5_subject("22518", "Software Testing", 0.0),
        sem5_subject("22519", "Client Side Scripting", 25.0),
    ]
}

pub fn find_subject<'a>(subjects: &'a [Subject], code: &str) -> Option<&'a Subject> {
    subjects.iter().find(|s| s.code == code)
}

pub fn filter_subjects(
    subjects: Vec<Subject>,
    semester: Option<u8>,
    scheme: Option<Scheme>,
) -> Vec<Subject> {
    subjects
        .into_iter()
        .filter(|s| semester.map(|v| s.semester == v).unwrap_or(true))
        .filter(|s| scheme.map(|v| s.scheme == v).unwrap_or(true))
        .collect()
}

/// Fresh attendance list: one zeroed record per catalog subject, in catalog order.
pub fn seed_attendance(subjects: &[Subject]) -> Vec<AttendanceRecord> {
    subjects.iter().map(AttendanceRecord::blank_for).collect()
}

pub fn course_labels() -> Vec<&'static str> {
    Course::ALL.iter().map(|c| c.label()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_matches_semester_five_caps() {
        let subjects = active_subjects();
        assert_eq!(subjects.len(), 4);
        let java = find_subject(&subjects, "22517").expect("advanced java");
        assert_eq!(java.max_practical, 50.0);
        let testing = find_subject(&subjects, "22518").expect("software testing");
        assert_eq!(testing.max_practical, 0.0);
        assert!(subjects.iter().all(|s| s.max_oral == 0.0));
    }

    #[test]
    fn seeded_attendance_is_zeroed_and_ordered() {
        let records = seed_attendance(&active_subjects());
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["22516", "22517", "22518", "22519"]);
        assert!(records.iter().all(|r| r.conducted == 0 && r.attended == 0));
    }

    #[test]
    fn filter_by_scheme_excludes_everything_for_k() {
        assert!(filter_subjects(active_subjects(), None, Some(Scheme::K)).is_empty());
        assert_eq!(filter_subjects(active_subjects(), Some(5), Some(Scheme::I)).len(), 4);
        assert!(filter_subjects(active_subjects(), Some(3), None).is_empty());
    }
}
