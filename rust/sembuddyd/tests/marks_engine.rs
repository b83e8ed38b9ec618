#[path = "../src/model.rs"]
mod model;
#[path = "../src/calc.rs"]
mod calc;
#[path = "../src/catalog.rs"]
mod catalog;

use calc::{semester_result, subject_result};
use model::{MarksEntry, Scheme, Subject};
use std::collections::HashMap;

fn subject(code: &str, theory: f64, internal: f64) -> Subject {
    Subject {
        code: code.to_string(),
        name: format!("Subject {}", code),
        semester: 5,
        scheme: Scheme::I,
        has_practical: false,
        max_theory: theory,
        max_internal: internal,
        max_unit_test: 0.0,
        max_term_work: 0.0,
        max_practical: 0.0,
        max_oral: 0.0,
        syllabus_url: None,
    }
}

#[test]
fn single_subject_distinction_scenario() {
    let subjects = vec![subject("A", 70.0, 30.0)];
    let mut entries = HashMap::new();
    entries.insert(
        "A".to_string(),
        MarksEntry {
            internal: Some(25.0),
            external: Some(60.0),
            ..MarksEntry::default()
        },
    );
    let r = semester_result(&subjects, &entries);
    assert_eq!(r.total_obtained, 85.0);
    assert_eq!(r.total_maximum, 100.0);
    assert_eq!(r.percentage, 85.0);
    assert!(r.passed);
    assert!(r.distinction);
}

#[test]
fn over_entry_is_allowed_and_exceeds_hundred() {
    let s = subject("A", 70.0, 30.0);
    let entry = MarksEntry {
        external: Some(95.0),
        internal: Some(40.0),
        ..MarksEntry::default()
    };
    let r = subject_result(&s, Some(&entry));
    assert_eq!(r.obtained, 135.0);
    assert!(r.percentage > 100.0);
    assert!(r.percentage.is_finite());
    assert!(r.distinction);
}

#[test]
fn subjects_without_entries_count_as_zero() {
    let subjects = vec![subject("A", 70.0, 30.0), subject("B", 70.0, 30.0)];
    let mut entries = HashMap::new();
    entries.insert(
        "A".to_string(),
        MarksEntry {
            external: Some(70.0),
            internal: Some(30.0),
            ..MarksEntry::default()
        },
    );
    let r = semester_result(&subjects, &entries);
    assert_eq!(r.total_obtained, 100.0);
    assert_eq!(r.total_maximum, 200.0);
    assert_eq!(r.percentage, 50.0);
    assert!(r.passed);
    assert!(!r.distinction);
    assert!(!r.subjects[1].passed);
    assert_eq!(r.subjects[1].obtained, 0.0);
}

#[test]
fn pass_and_distinction_boundaries_are_inclusive() {
    let s = subject("A", 100.0, 0.0);
    let at_pass = MarksEntry { external: Some(35.0), ..MarksEntry::default() };
    let below_pass = MarksEntry { external: Some(34.9), ..MarksEntry::default() };
    let at_distinction = MarksEntry { external: Some(75.0), ..MarksEntry::default() };
    assert!(subject_result(&s, Some(&at_pass)).passed);
    assert!(!subject_result(&s, Some(&below_pass)).passed);
    assert!(subject_result(&s, Some(&at_distinction)).distinction);
}

#[test]
fn empty_catalog_scores_zero_without_nan() {
    let r = semester_result(&[], &HashMap::new());
    assert_eq!(r.percentage, 0.0);
    assert!(!r.passed);
    assert!(r.subjects.is_empty());
}

#[test]
fn built_in_catalog_maximums() {
    let subjects = catalog::active_subjects();
    let r = semester_result(&subjects, &HashMap::new());
    let maxima: Vec<f64> = r.subjects.iter().map(|s| s.maximum).collect();
    assert_eq!(maxima, vec![170.0, 195.0, 145.0, 170.0]);
    assert_eq!(r.total_maximum, 680.0);
}
