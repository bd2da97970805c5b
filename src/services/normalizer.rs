//! Turns free-form model output into a JSON object ready for typed construction.
//!
//! The pipeline has two phases. [`extract_json`] does the tolerant text
//! surgery (error-page detection, brace scanning, fenced-block fallback, strict
//! parse). [`ensure_identifiers`] then fills in any entity identifiers the model
//! left out. Neither function validates field types or business rules.

use serde_json::{Map, Value};
use uuid::Uuid;

/// Inputs and candidates shorter than this are rejected outright.
pub const MIN_CONTENT_LEN: usize = 5;

const FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("empty or truncated response ({len} chars)")]
    EmptyResponse { label: String, len: usize },

    #[error("upstream returned {kind} instead of model content")]
    UpstreamFormat { label: String, kind: &'static str },

    #[error("no JSON object found in response")]
    NoJsonFound { label: String },

    #[error("invalid JSON: {source}")]
    JsonDecode {
        label: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Extracts the JSON object embedded in `raw`. `label` only feeds diagnostics.
pub fn extract_json(raw: &str, label: &str) -> Result<Map<String, Value>, NormalizeError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < MIN_CONTENT_LEN {
        tracing::warn!(label, len = trimmed.len(), "Model response too short");
        return Err(NormalizeError::EmptyResponse {
            label: label.to_string(),
            len: trimmed.len(),
        });
    }

    let lowered = trimmed.to_lowercase();
    if lowered.starts_with("<!doctype") || lowered.starts_with("<html") {
        tracing::error!(label, "Model response is an HTML page");
        return Err(NormalizeError::UpstreamFormat {
            label: label.to_string(),
            kind: "an HTML error page",
        });
    }
    // Best-effort only: legitimate content that talks about errors and
    // exceptions will trip this as well.
    if lowered.contains("error") && (lowered.contains("exception") || lowered.contains("traceback")) {
        tracing::error!(label, "Model response looks like an error trace");
        return Err(NormalizeError::UpstreamFormat {
            label: label.to_string(),
            kind: "an error trace",
        });
    }

    let candidate = match brace_span(raw) {
        Some(span) => {
            tracing::debug!(label, branch = "direct_braces", len = span.len(), "JSON candidate located");
            span
        }
        None => {
            let span = fenced_block(raw).and_then(brace_span).ok_or_else(|| {
                tracing::warn!(label, "No JSON object in model response");
                NormalizeError::NoJsonFound {
                    label: label.to_string(),
                }
            })?;
            tracing::debug!(label, branch = "fenced_block", len = span.len(), "JSON candidate located");
            span
        }
    };

    if candidate.trim().chars().count() < MIN_CONTENT_LEN {
        tracing::warn!(label, len = candidate.len(), "JSON candidate too short");
        return Err(NormalizeError::NoJsonFound {
            label: label.to_string(),
        });
    }

    let value: Value = serde_json::from_str(candidate).map_err(|source| {
        tracing::error!(label, error = %source, "Failed to decode JSON candidate");
        NormalizeError::JsonDecode {
            label: label.to_string(),
            source,
        }
    })?;

    match value {
        Value::Object(map) => {
            tracing::debug!(label, keys = ?map.keys().collect::<Vec<_>>(), "Parsed model JSON");
            Ok(map)
        }
        _ => Err(NormalizeError::NoJsonFound {
            label: label.to_string(),
        }),
    }
}

/// Slice from the first `{` to the last `}` inclusive.
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Body of the first "```json" fence, up to the closing fence or end of text.
/// Only consulted when the whole text has no brace pair, so in practice it
/// cannot produce an object either; fenced replies are served by `brace_span`.
fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find(FENCE_OPEN)? + FENCE_OPEN.len();
    let body = &text[open..];
    Some(match body.find(FENCE_CLOSE) {
        Some(close) => &body[..close],
        None => body,
    })
}

#[derive(Debug, Clone, Copy)]
enum Fallback {
    Uuid,
    /// Prefix plus 1-based list position, e.g. `q3`.
    Positional(&'static str),
    Fixed(&'static str),
}

#[derive(Debug, Clone, Copy)]
enum Shape {
    Object,
    List,
}

struct Slot {
    key: &'static str,
    id_field: &'static str,
    shape: Shape,
    fallback: Fallback,
    children: &'static [Slot],
}

const SCENARIO_OPTIONS: &[Slot] = &[
    Slot {
        key: "option_a",
        id_field: "option_id",
        shape: Shape::Object,
        fallback: Fallback::Fixed("option_a"),
        children: &[],
    },
    Slot {
        key: "option_b",
        id_field: "option_id",
        shape: Shape::Object,
        fallback: Fallback::Fixed("option_b"),
        children: &[],
    },
];

const fn object(key: &'static str, id_field: &'static str) -> Slot {
    Slot {
        key,
        id_field,
        shape: Shape::Object,
        fallback: Fallback::Uuid,
        children: &[],
    }
}

const ENTITY_SLOTS: &[Slot] = &[
    object("passage", "passage_id"),
    object("reply_passage", "passage_id"),
    Slot {
        key: "questions",
        id_field: "question_id",
        shape: Shape::List,
        fallback: Fallback::Positional("q"),
        children: &[],
    },
    Slot {
        key: "conversations",
        id_field: "conversation_id",
        shape: Shape::List,
        fallback: Fallback::Uuid,
        children: &[],
    },
    object("conversation", "conversation_id"),
    object("news_item", "news_id"),
    object("discussion", "discussion_id"),
    object("viewpoint", "viewpoint_id"),
    Slot {
        key: "scenario",
        id_field: "scenario_id",
        shape: Shape::Object,
        fallback: Fallback::Uuid,
        children: SCENARIO_OPTIONS,
    },
    object("survey", "survey_id"),
];

/// Adds any missing entity identifiers in place. Existing non-empty ids and
/// every other field are left untouched, so repeated calls are no-ops.
pub fn ensure_identifiers(record: &mut Map<String, Value>) {
    let mut added = Vec::new();
    if fill_id(record, "task_id", || Uuid::new_v4().to_string()) {
        added.push("task_id".to_string());
    }
    apply_slots(record, ENTITY_SLOTS, "", &mut added);
    if !added.is_empty() {
        tracing::debug!(added = ?added, "Synthesized missing identifiers");
    }
}

fn apply_slots(record: &mut Map<String, Value>, slots: &[Slot], path: &str, added: &mut Vec<String>) {
    for slot in slots {
        match (slot.shape, record.get_mut(slot.key)) {
            (Shape::Object, Some(Value::Object(entity))) => {
                let here = format!("{path}{}", slot.key);
                if fill_id(entity, slot.id_field, || synthesize(slot.fallback, 0)) {
                    added.push(format!("{here}.{}", slot.id_field));
                }
                apply_slots(entity, slot.children, &format!("{here}."), added);
            }
            (Shape::List, Some(Value::Array(items))) => {
                for (index, item) in items.iter_mut().enumerate() {
                    if let Value::Object(entity) = item {
                        if fill_id(entity, slot.id_field, || synthesize(slot.fallback, index)) {
                            added.push(format!("{path}{}[{index}].{}", slot.key, slot.id_field));
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

fn synthesize(fallback: Fallback, index: usize) -> String {
    match fallback {
        Fallback::Uuid => Uuid::new_v4().to_string(),
        Fallback::Positional(prefix) => format!("{prefix}{}", index + 1),
        Fallback::Fixed(id) => id.to_string(),
    }
}

fn fill_id(entity: &mut Map<String, Value>, field: &str, make: impl FnOnce() -> String) -> bool {
    let missing = match entity.get(field) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    };
    if missing {
        entity.insert(field.to_string(), Value::String(make()));
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn extracts_clean_object() {
        let map = extract_json(r#"{"a": 1, "b": [1,2,3]}"#, "clean").unwrap();
        assert_eq!(Value::Object(map), json!({"a": 1, "b": [1, 2, 3]}));
    }

    #[test]
    fn fenced_object_is_found_by_the_brace_scan() {
        let raw = "Sure, here you go:\n```json\n{\"x\": true}\n```\nLet me know if you need more.";
        let map = extract_json(raw, "fenced").unwrap();
        assert_eq!(Value::Object(map), json!({"x": true}));
    }

    #[test]
    fn fence_without_an_object_is_no_json() {
        let raw = "Here is the task:\n```json\n[1, 2, 3]\n```";
        let err = extract_json(raw, "fence").unwrap_err();
        assert!(matches!(err, NormalizeError::NoJsonFound { .. }));

        assert_eq!(fenced_block("```json\n{\"x\": 1}\n```"), Some("\n{\"x\": 1}\n"));
        assert_eq!(fenced_block("```json\n{\"x\": 1}"), Some("\n{\"x\": 1}"));
    }

    #[test]
    fn rejects_html_error_page() {
        let raw = "<!DOCTYPE html><html><body>502 Bad Gateway</body></html>";
        let err = extract_json(raw, "html").unwrap_err();
        assert!(matches!(err, NormalizeError::UpstreamFormat { .. }));

        let err = extract_json("  <HTML><body>oops</body></HTML>", "html").unwrap_err();
        assert!(matches!(err, NormalizeError::UpstreamFormat { .. }));
    }

    #[test]
    fn rejects_echoed_stack_trace() {
        let raw = "Internal Error\nTraceback (most recent call last):\n  File \"x\", line 1 {\"a\": 1}";
        let err = extract_json(raw, "trace").unwrap_err();
        assert!(matches!(err, NormalizeError::UpstreamFormat { .. }));
    }

    #[test]
    fn rejects_malformed_json_with_parser_message() {
        let err = extract_json(r#"{"a": }"#, "broken").unwrap_err();
        match err {
            NormalizeError::JsonDecode { label, source } => {
                assert_eq!(label, "broken");
                assert!(!source.to_string().is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_short_input_as_empty() {
        assert!(matches!(
            extract_json("", "empty").unwrap_err(),
            NormalizeError::EmptyResponse { .. }
        ));
        assert!(matches!(
            extract_json("abc", "short").unwrap_err(),
            NormalizeError::EmptyResponse { .. }
        ));
        assert!(matches!(
            extract_json("   \n\t  ", "blank").unwrap_err(),
            NormalizeError::EmptyResponse { .. }
        ));
    }

    #[test]
    fn rejects_text_without_json() {
        let err = extract_json("Sorry, I cannot help with that request.", "refusal").unwrap_err();
        assert!(matches!(err, NormalizeError::NoJsonFound { .. }));
    }

    #[test]
    fn rejects_trivial_fragment() {
        let err = extract_json("The answer is {} and nothing else.", "tiny").unwrap_err();
        assert!(matches!(err, NormalizeError::NoJsonFound { .. }));
    }

    #[test]
    fn rejects_non_object_json() {
        let err = extract_json("```json\n[1, 2, 3, 4, 5, 6]\n```", "array").unwrap_err();
        assert!(matches!(err, NormalizeError::NoJsonFound { .. }));
    }

    #[test]
    fn end_to_end_fenced_record_gets_identifiers() {
        let raw = "Here is the result:\n```json\n{\"task_id\": null, \"passage\": {\"title\": \"Hi\"}, \"questions\": [{\"question_text\": \"Q1\"}, {\"question_text\": \"Q2\"}]}\n```\nThanks!";
        let mut record = extract_json(raw, "e2e").unwrap();
        ensure_identifiers(&mut record);

        let task_id = record["task_id"].as_str().unwrap();
        assert!(Uuid::parse_str(task_id).is_ok());
        assert!(!record["passage"]["passage_id"].as_str().unwrap().is_empty());
        assert_eq!(record["passage"]["title"], "Hi");
        assert_eq!(record["questions"][0]["question_id"], "q1");
        assert_eq!(record["questions"][1]["question_id"], "q2");
        assert_eq!(record["questions"][0]["question_text"], "Q1");
        assert_eq!(record["questions"][1]["question_text"], "Q2");
    }

    #[test]
    fn identifier_injection_is_idempotent() {
        let mut record = obj(json!({
            "passage": {"title": "t"},
            "reply_passage": {"content": "c"},
            "questions": [{"question_text": "a"}, {"question_id": "", "question_text": "b"}],
            "conversations": [{"title": "one"}, {"title": "two"}],
            "scenario": {"title": "s", "option_a": {"title": "A"}, "option_b": {"option_id": "keep"}},
            "survey": {"title": "v"}
        }));
        ensure_identifiers(&mut record);
        let once = record.clone();
        ensure_identifiers(&mut record);
        assert_eq!(once, record);
    }

    #[test]
    fn every_entity_slot_gets_an_identifier() {
        let mut record = obj(json!({
            "passage": {},
            "reply_passage": {},
            "questions": [{}, {}, {}],
            "conversations": [{}, {}],
            "conversation": {},
            "news_item": {},
            "discussion": {},
            "viewpoint": {},
            "scenario": {"option_a": {}, "option_b": {}},
            "survey": {}
        }));
        ensure_identifiers(&mut record);

        let non_empty = |v: &Value| v.as_str().is_some_and(|s| !s.is_empty());
        assert!(non_empty(&record["task_id"]));
        assert!(non_empty(&record["passage"]["passage_id"]));
        assert!(non_empty(&record["reply_passage"]["passage_id"]));
        assert_eq!(record["questions"][2]["question_id"], "q3");
        assert!(non_empty(&record["conversations"][0]["conversation_id"]));
        assert_ne!(
            record["conversations"][0]["conversation_id"],
            record["conversations"][1]["conversation_id"]
        );
        assert!(non_empty(&record["conversation"]["conversation_id"]));
        assert!(non_empty(&record["news_item"]["news_id"]));
        assert!(non_empty(&record["discussion"]["discussion_id"]));
        assert!(non_empty(&record["viewpoint"]["viewpoint_id"]));
        assert!(non_empty(&record["scenario"]["scenario_id"]));
        assert_eq!(record["scenario"]["option_a"]["option_id"], "option_a");
        assert_eq!(record["scenario"]["option_b"]["option_id"], "option_b");
        assert!(non_empty(&record["survey"]["survey_id"]));
    }

    #[test]
    fn existing_identifiers_and_other_fields_are_preserved() {
        let original = json!({
            "task_id": "task-7",
            "difficulty_level": "advanced",
            "passage": {"passage_id": "p-1", "content": "text"},
            "questions": [{"question_id": "custom", "options": ["A", "B"]}, "not an object"],
            "scenario": "plain string scenario",
            "extra": {"nested": [1, 2, 3]}
        });
        let mut record = obj(original.clone());
        ensure_identifiers(&mut record);
        assert_eq!(Value::Object(record), original);
    }
}
