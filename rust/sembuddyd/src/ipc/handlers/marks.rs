use crate::calc::{self, SemesterResult};
use crate::catalog::find_subject;
use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::get_required_str;
use crate::ipc::types::{AppState, Request};
use crate::model::{MarksEntry, MarksField, Subject};
use serde_json::json;
use std::collections::HashMap;

/// Inputs the calculator shows for a subject. Practical only when the subject
/// has one, oral only when it carries marks.
fn form_fields(subject: &Subject) -> Vec<serde_json::Value> {
    let mut fields = vec![
        json!({ "field": MarksField::Internal, "label": "Internal", "max": subject.max_internal }),
        json!({ "field": MarksField::UnitTest, "label": "Unit Test", "max": subject.max_unit_test }),
        json!({ "field": MarksField::External, "label": "External", "max": subject.max_theory }),
        json!({ "field": MarksField::TermWork, "label": "Term Work", "max": subject.max_term_work }),
    ];
    if subject.has_practical {
        fields.push(json!({ "field": MarksField::Practical, "label": "Practical", "max": subject.max_practical }));
    }
    if subject.max_oral > 0.0 {
        fields.push(json!({ "field": MarksField::Oral, "label": "Oral", "max": subject.max_oral }));
    }
    fields
}

fn result_json(result: &SemesterResult) -> serde_json::Value {
    let mut v = json!(result);
    v["verdict"] = json!(if result.passed { "PASSED" } else { "FAILED" });
    v["percentageDisplay"] = json!(calc::round_off_1_decimal(result.percentage));
    v
}

fn marks_form(state: &AppState) -> serde_json::Value {
    let subjects: Vec<serde_json::Value> = state
        .subjects
        .iter()
        .map(|s| {
            json!({
                "code": s.code,
                "name": s.name,
                "fields": form_fields(s),
                "entry": state.marks.get(&s.code).copied().unwrap_or_default(),
            })
        })
        .collect();
    json!({ "subjects": subjects })
}

fn marks_set(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let code = get_required_str(params, "subjectCode")?;
    let field_raw = get_required_str(params, "field")?;
    let field = MarksField::parse(&field_raw)
        .ok_or_else(|| HandlerErr::bad_params(format!("unknown marks field: {}", field_raw)))?;
    let value = calc::parse_score_input(params.get("value").unwrap_or(&serde_json::Value::Null));

    let Some(subject) = find_subject(&state.subjects, &code) else {
        return Err(HandlerErr::not_found(format!("unknown subject: {}", code)));
    };
    let entry = state.marks.entry(code).or_default();
    entry.set(field, value);
    let row = calc::subject_result(subject, Some(&*entry));
    Ok(json!({ "entry": *entry, "subject": row }))
}

/// One subject's typed components. Components read like `marks.set` input:
/// anything non-numeric is 0, null or absent leaves the component unset.
fn entry_from_json(code: &str, raw: &serde_json::Value) -> Result<MarksEntry, HandlerErr> {
    let Some(obj) = raw.as_object() else {
        return Err(HandlerErr::bad_params(format!("entries.{} must be an object", code)));
    };
    let mut entry = MarksEntry::default();
    for (key, v) in obj {
        if v.is_null() {
            continue;
        }
        if let Some(field) = MarksField::parse(key) {
            entry.set(field, calc::parse_score_input(v));
        }
    }
    Ok(entry)
}

fn marks_calculate(params: &serde_json::Value, catalog: &[Subject]) -> Result<serde_json::Value, HandlerErr> {
    let entries: HashMap<String, MarksEntry> = match params.get("entries") {
        None | Some(serde_json::Value::Null) => HashMap::new(),
        Some(serde_json::Value::Object(map)) => map
            .iter()
            .map(|(code, raw)| entry_from_json(code, raw).map(|e| (code.clone(), e)))
            .collect::<Result<_, HandlerErr>>()?,
        Some(_) => return Err(HandlerErr::bad_params("entries must be an object keyed by subject code")),
    };
    let custom: Option<Vec<Subject>> = match params.get("subjects") {
        None | Some(serde_json::Value::Null) => None,
        Some(v) => Some(
            serde_json::from_value(v.clone())
                .map_err(|e| HandlerErr::bad_params(format!("invalid subjects: {}", e)))?,
        ),
    };
    let subjects = custom.as_deref().unwrap_or(catalog);
    Ok(result_json(&calc::semester_result(subjects, &entries)))
}

fn handle_marks_form(state: &mut AppState, req: &Request) -> serde_json::Value {
    respond(&req.id, Ok(marks_form(state)))
}

fn handle_marks_set(state: &mut AppState, req: &Request) -> serde_json::Value {
    let result = marks_set(state, &req.params);
    respond(&req.id, result)
}

fn handle_marks_result(state: &mut AppState, req: &Request) -> serde_json::Value {
    let result = calc::semester_result(&state.subjects, &state.marks);
    respond(&req.id, Ok(result_json(&result)))
}

fn handle_marks_reset(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.marks.clear();
    respond(&req.id, Ok(json!({ "ok": true })))
}

fn handle_marks_calculate(state: &mut AppState, req: &Request) -> serde_json::Value {
    respond(&req.id, marks_calculate(&req.params, &state.subjects))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "marks.form" => Some(handle_marks_form(state, req)),
        "marks.set" => Some(handle_marks_set(state, req)),
        "marks.result" => Some(handle_marks_result(state, req)),
        "marks.reset" => Some(handle_marks_reset(state, req)),
        "marks.calculate" => Some(handle_marks_calculate(state, req)),
        _ => None,
    }
}
