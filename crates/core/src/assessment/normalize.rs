//! Normalization of raw questionnaire submissions.
//!
//! The frontend may deliver answers either as the canonical 13-field object
//! or as an array of `{ questionId, answer }` items. This module turns the
//! array form into a validated [`AssessmentAnswers`]: unknown question ids
//! are collected as warnings (never fatal), string `"true"`/`"false"`
//! literals are mapped to booleans, and any missing or mistyped field is a
//! [`CoreError::Validation`] -- shape errors are rejected, never defaulted.

use serde::Deserialize;
use serde_json::Value;

use super::answers::{AssessmentAnswers, ExperienceLevel};
use crate::error::CoreError;

/// One raw answer item as submitted by the questionnaire frontend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerItem {
    pub question_id: String,
    pub answer: Value,
}

/// Raw submission shape: either the canonical object or the item array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawAnswers {
    Structured(AssessmentAnswers),
    Items(Vec<AnswerItem>),
}

/// Result of normalizing a raw submission.
///
/// `warnings` lists unrecognized question ids that were skipped; the caller
/// decides how to surface them (the API layer logs them).
#[derive(Debug)]
pub struct Normalized {
    pub answers: AssessmentAnswers,
    pub warnings: Vec<String>,
}

/// The experience-level question ids, paired with their field selectors.
const LEVEL_QUESTIONS: &[&str] = &[
    "htmlCssJsKnowledge",
    "reactNextJsKnowledge",
    "databaseKnowledge",
    "expressHonoKnowledge",
    "laravelKnowledge",
    "golangKnowledge",
];

/// The boolean capability question ids.
const FLAG_QUESTIONS: &[&str] = &[
    "canBuildCrudApp",
    "canImplementAuth",
    "canImplementGoogleAuth",
    "canBuildAuthenticatedApi",
    "canDocumentApi",
    "canBuildGoApi",
    "canDeployApps",
];

/// Normalize a raw submission into a complete answer set.
///
/// The structured form passes through unchanged (serde already enforced
/// completeness). The array form is folded field by field and then checked
/// for completeness; the error message names every missing field.
pub fn normalize(raw: RawAnswers) -> Result<Normalized, CoreError> {
    match raw {
        RawAnswers::Structured(answers) => Ok(Normalized {
            answers,
            warnings: Vec::new(),
        }),
        RawAnswers::Items(items) => normalize_items(&items),
    }
}

fn normalize_items(items: &[AnswerItem]) -> Result<Normalized, CoreError> {
    let mut warnings = Vec::new();
    let mut fields = serde_json::Map::new();

    for item in items {
        let id = item.question_id.as_str();
        if LEVEL_QUESTIONS.contains(&id) {
            let level = parse_level(&item.answer).ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid experience level for '{id}': expected one of none, basic, \
                     intermediate, advanced"
                ))
            })?;
            fields.insert(id.to_string(), serde_json::to_value(level).unwrap_or_default());
        } else if FLAG_QUESTIONS.contains(&id) {
            let flag = parse_flag(&item.answer).ok_or_else(|| {
                CoreError::Validation(format!("Invalid boolean answer for '{id}'"))
            })?;
            fields.insert(id.to_string(), Value::Bool(flag));
        } else {
            warnings.push(id.to_string());
        }
    }

    let missing: Vec<&str> = LEVEL_QUESTIONS
        .iter()
        .chain(FLAG_QUESTIONS.iter())
        .filter(|id| !fields.contains_key(**id))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(CoreError::Validation(format!(
            "Incomplete assessment: missing answers for {}",
            missing.join(", ")
        )));
    }

    let answers: AssessmentAnswers = serde_json::from_value(Value::Object(fields))
        .map_err(|e| CoreError::Validation(format!("Malformed assessment answers: {e}")))?;

    Ok(Normalized { answers, warnings })
}

fn parse_level(value: &Value) -> Option<ExperienceLevel> {
    value.as_str().and_then(ExperienceLevel::from_str_value)
}

/// Accepts JSON booleans plus the literal strings `"true"` and `"false"`,
/// which some form clients submit for yes/no questions.
fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s == "true" => Some(true),
        Value::String(s) if s == "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn item(id: &str, answer: Value) -> AnswerItem {
        AnswerItem {
            question_id: id.to_string(),
            answer,
        }
    }

    fn complete_items() -> Vec<AnswerItem> {
        vec![
            item("htmlCssJsKnowledge", "basic".into()),
            item("reactNextJsKnowledge", "intermediate".into()),
            item("databaseKnowledge", "basic".into()),
            item("expressHonoKnowledge", "none".into()),
            item("laravelKnowledge", "none".into()),
            item("golangKnowledge", "none".into()),
            item("canBuildCrudApp", Value::Bool(true)),
            item("canImplementAuth", Value::String("false".into())),
            item("canImplementGoogleAuth", Value::Bool(false)),
            item("canBuildAuthenticatedApi", Value::Bool(false)),
            item("canDocumentApi", Value::Bool(false)),
            item("canBuildGoApi", Value::Bool(false)),
            item("canDeployApps", Value::String("true".into())),
        ]
    }

    #[test]
    fn test_array_form_normalizes() {
        let normalized = normalize(RawAnswers::Items(complete_items())).unwrap();
        assert!(normalized.warnings.is_empty());

        let a = normalized.answers;
        assert_eq!(a.react_next_js_knowledge, ExperienceLevel::Intermediate);
        assert!(a.can_build_crud_app);
        // String literals map to booleans.
        assert!(!a.can_implement_auth);
        assert!(a.can_deploy_apps);
    }

    #[test]
    fn test_unknown_question_id_is_warned_not_fatal() {
        let mut items = complete_items();
        items.push(item("favoriteEditor", "vim".into()));

        let normalized = normalize(RawAnswers::Items(items)).unwrap();
        assert_eq!(normalized.warnings, vec!["favoriteEditor".to_string()]);
    }

    #[test]
    fn test_missing_field_is_a_validation_error() {
        let items: Vec<AnswerItem> = complete_items()
            .into_iter()
            .filter(|i| i.question_id != "golangKnowledge")
            .collect();

        let err = normalize(RawAnswers::Items(items)).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("golangKnowledge"));
    }

    #[test]
    fn test_out_of_domain_level_is_rejected() {
        let mut items = complete_items();
        items[0].answer = "expert".into();

        let err = normalize(RawAnswers::Items(items)).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("htmlCssJsKnowledge"));
    }

    #[test]
    fn test_mistyped_flag_is_rejected() {
        let mut items = complete_items();
        // "yes" is not an accepted boolean literal.
        items[7].answer = "yes".into();

        let err = normalize(RawAnswers::Items(items)).unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn test_structured_form_passes_through() {
        let value = serde_json::json!({
            "htmlCssJsKnowledge": "none",
            "reactNextJsKnowledge": "none",
            "canBuildCrudApp": false,
            "canImplementAuth": false,
            "canImplementGoogleAuth": false,
            "databaseKnowledge": "none",
            "expressHonoKnowledge": "none",
            "canBuildAuthenticatedApi": false,
            "canDocumentApi": false,
            "laravelKnowledge": "none",
            "golangKnowledge": "none",
            "canBuildGoApi": false,
            "canDeployApps": false,
        });

        let raw: RawAnswers = serde_json::from_value(value).unwrap();
        assert_matches!(raw, RawAnswers::Structured(_));

        let normalized = normalize(raw).unwrap();
        assert!(normalized.warnings.is_empty());
        assert!(!normalized.answers.can_build_crud_app);
    }
}
