//! Schema coercion and checks for candidate event objects.
//!
//! Missing and `null` fields are violations. Nothing is defaulted here; the
//! model is instructed to emit `""` or `0` itself.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domains::scouting::models::{District, EventRecord};

pub const MAX_SUMMARY_WORDS: usize = 20;
pub const INFLUENCE_SCORE_MAX: u32 = 100;
pub const CONFIDENCE_SCORE_MAX: u32 = 10;

/// A single schema problem, reported back to the caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

type FieldResult<T> = Result<T, Vec<FieldViolation>>;

/// Validate a candidate object and build the record, or list every violation.
pub fn validate_event(candidate: &Map<String, Value>) -> Result<EventRecord, Vec<FieldViolation>> {
    let event_name = string_field(candidate, "eventName").and_then(|name| {
        if name.is_empty() {
            Err(vec![FieldViolation::new("eventName", "must not be empty")])
        } else {
            Ok(name)
        }
    });
    let venue_name = string_field(candidate, "venueName");
    let district = district_field(candidate, "district");
    let vibe_profile = tags_field(candidate, "vibeProfile");
    let influence_score = score_field(candidate, "influenceScore", INFLUENCE_SCORE_MAX);
    let confidence_score = score_field(candidate, "confidenceScore", CONFIDENCE_SCORE_MAX);
    let summary = summary_field(candidate, "summary");

    match (
        event_name,
        venue_name,
        district,
        vibe_profile,
        influence_score,
        confidence_score,
        summary,
    ) {
        (
            Ok(event_name),
            Ok(venue_name),
            Ok(district),
            Ok(vibe_profile),
            Ok(influence),
            Ok(confidence),
            Ok(summary),
        ) => Ok(EventRecord::new(
            event_name,
            venue_name,
            district,
            vibe_profile,
            influence,
            confidence,
            summary,
        )),
        (a, b, c, d, e, f, g) => Err([
            a.err(),
            b.err(),
            c.err(),
            d.err(),
            e.err(),
            f.err(),
            g.err(),
        ]
        .into_iter()
        .flatten()
        .flatten()
        .collect()),
    }
}

fn lookup<'a>(candidate: &'a Map<String, Value>, field: &str) -> FieldResult<&'a Value> {
    match candidate.get(field) {
        None => Err(vec![FieldViolation::new(field, "missing required field")]),
        Some(Value::Null) => Err(vec![FieldViolation::new(field, "must not be null")]),
        Some(value) => Ok(value),
    }
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn string_field(candidate: &Map<String, Value>, field: &str) -> FieldResult<String> {
    let value = lookup(candidate, field)?;
    coerce_string(value).ok_or_else(|| vec![FieldViolation::new(field, "expected a string")])
}

fn district_field(candidate: &Map<String, Value>, field: &str) -> FieldResult<District> {
    let raw = string_field(candidate, field)?;
    District::parse_loose(&raw).ok_or_else(|| {
        let allowed: Vec<&str> = District::ALL.iter().map(District::as_str).collect();
        vec![FieldViolation::new(
            field,
            format!("must be one of {}", allowed.join(", ")),
        )]
    })
}

fn tags_field(candidate: &Map<String, Value>, field: &str) -> FieldResult<Vec<String>> {
    match lookup(candidate, field)? {
        Value::Array(items) => {
            let mut tags = Vec::with_capacity(items.len());
            let mut violations = Vec::new();
            for (idx, item) in items.iter().enumerate() {
                match coerce_string(item) {
                    Some(tag) if tag.is_empty() => {}
                    Some(tag) => tags.push(tag),
                    None => violations.push(FieldViolation::new(
                        format!("{}[{}]", field, idx),
                        "expected a string",
                    )),
                }
            }
            if violations.is_empty() {
                Ok(tags)
            } else {
                Err(violations)
            }
        }
        Value::String(s) => Ok(s
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()),
        _ => Err(vec![FieldViolation::new(field, "expected an array of strings")]),
    }
}

fn score_field(candidate: &Map<String, Value>, field: &str, max: u32) -> FieldResult<f64> {
    let value = match lookup(candidate, field)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| vec![FieldViolation::new(field, "expected a number")])?;

    if !value.is_finite() {
        return Err(vec![FieldViolation::new(field, "expected a finite number")]);
    }
    if !(0.0..=f64::from(max)).contains(&value) {
        return Err(vec![FieldViolation::new(
            field,
            format!("out of range 0-{}", max),
        )]);
    }
    Ok(value)
}

fn summary_field(candidate: &Map<String, Value>, field: &str) -> FieldResult<String> {
    let summary = string_field(candidate, field)?;
    if summary.split_whitespace().count() > MAX_SUMMARY_WORDS {
        return Err(vec![FieldViolation::new(
            field,
            format!("must be at most {} words", MAX_SUMMARY_WORDS),
        )]);
    }
    Ok(summary)
}
