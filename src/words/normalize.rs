//! Thesaurus payload normalization.
//!
//! Turns the loosely structured thesaurus response into a [`WordRecord`].
//! Everything here is pure: the same payload always yields the same record.
//!
//! Example sentences arrive in several shapes (plain strings, JSON encoded
//! strings, `{"t": ...}` objects, arrays of those) and carry inline markup.
//! Text is first decoded to a plain string and then run through
//! [`CLEANING_PASSES`] in order.

use serde_json::Value;
use crate::error::{ErrorKind, VocabError};
use super::model::WordRecord;

/// Object fields that may carry example text, in priority order
const TEXT_FIELDS: [&str; 3] = ["t", "text", "example"];

/// Nested JSON-in-JSON is decoded at most this deep
const MAX_DECODE_DEPTH: usize = 4;

/// Longest `{tag}` name treated as markup
const MAX_TAG_LEN: usize = 12;

pub type CleaningPass = fn(&str) -> String;

/// Example cleanup, applied in this order
pub const CLEANING_PASSES: [(&str, CleaningPass); 5] = [
    ("unwrap_t_wrapper", unwrap_t_wrapper),
    ("strip_inline_tags", strip_inline_tags),
    ("unescape_quotes", unescape_quotes),
    ("strip_brackets_and_stray_quotes", strip_brackets_and_stray_quotes),
    ("collapse_whitespace", collapse_whitespace),
];

/// Normalize a full thesaurus response (an array of entries).
///
/// Only the first entry is used. A response made of plain strings is the
/// thesaurus' "did you mean" list and maps to `WordNotFound`.
pub fn normalize(payload: &Value) -> Result<WordRecord, VocabError> {
    let entries = payload
        .as_array()
        .ok_or_else(|| VocabError::malformed("Response is not an array of entries"))?;
    let first = entries
        .first()
        .ok_or_else(|| VocabError::malformed("Response contains no entries"))?;

    if first.is_string() {
        let suggestions: Vec<&str> = entries.iter().filter_map(Value::as_str).take(10).collect();
        return Err(VocabError::new(ErrorKind::WordNotFound, "Word not found", "normalize")
            .with_context(format!("suggestions: {}", suggestions.join(", "))));
    }

    normalize_entry(first)
}

/// Normalize a single entry object
pub fn normalize_entry(entry: &Value) -> Result<WordRecord, VocabError> {
    if !entry.is_object() {
        return Err(VocabError::malformed("Entry is not an object"));
    }

    let raw_id = entry
        .pointer("/meta/id")
        .and_then(Value::as_str)
        .ok_or_else(|| VocabError::malformed("Missing word identifier in response"))?;
    let word = normalize_id(raw_id);
    if word.is_empty() {
        return Err(VocabError::malformed("Empty word identifier in response")
            .with_context(format!("meta.id: {:?}", raw_id)));
    }

    let examples = collect_raw_examples(entry)
        .into_iter()
        .filter_map(clean_example)
        .collect();

    Ok(WordRecord {
        part_of_speech: entry.get("fl").and_then(Value::as_str).unwrap_or("").trim().to_string(),
        definitions: string_list(entry.get("shortdef")),
        synonyms: flatten_one_level(entry.pointer("/meta/syns")),
        antonyms: flatten_one_level(entry.pointer("/meta/ants")),
        examples,
        date: entry.get("date").and_then(Value::as_str).unwrap_or("").to_string(),
        offensive: entry.pointer("/meta/offensive").and_then(Value::as_bool).unwrap_or(false),
        word,
    })
}

/// `"Happy:2"` -> `"happy"`
fn normalize_id(raw: &str) -> String {
    raw.split(':').next().unwrap_or("").trim().to_lowercase()
}

/// Non-blank strings of an array; anything else is skipped
fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// `[["a", "b"], ["c"]]` -> `["a", "b", "c"]`; bare strings are kept as-is
fn flatten_one_level(value: Option<&Value>) -> Vec<String> {
    let Some(groups) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for group in groups {
        match group {
            Value::Array(_) => out.extend(string_list(Some(group))),
            Value::String(s) if !s.trim().is_empty() => out.push(s.trim().to_string()),
            _ => {}
        }
    }
    out
}

/// Walk `def[].sseq` and collect every verbal illustration (`vis`) item
fn collect_raw_examples(entry: &Value) -> Vec<&Value> {
    let mut out = Vec::new();
    let defs = entry.get("def").and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[]);
    for def in defs {
        let sseq = def.get("sseq").and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[]);
        for sense_group in sseq {
            if let Some(items) = sense_group.as_array() {
                collect_from_senses(items, &mut out);
            }
        }
    }
    out
}

fn collect_from_senses<'a>(items: &'a [Value], out: &mut Vec<&'a Value>) {
    for item in items {
        let Some(pair) = item.as_array() else { continue };
        let (Some(label), Some(body)) = (pair.first().and_then(Value::as_str), pair.get(1)) else {
            continue;
        };
        match label {
            "sense" => collect_from_dt(body, out),
            // parenthesized sense sequence: nested ["sense", {...}] items
            "pseq" => {
                if let Some(nested) = body.as_array() {
                    collect_from_senses(nested, out);
                }
            }
            _ => {}
        }
    }
}

fn collect_from_dt<'a>(sense: &'a Value, out: &mut Vec<&'a Value>) {
    let Some(dt) = sense.get("dt").and_then(Value::as_array) else { return };
    for chunk in dt {
        let Some(pair) = chunk.as_array() else { continue };
        if pair.first().and_then(Value::as_str) != Some("vis") {
            continue;
        }
        match pair.get(1) {
            Some(Value::Array(visuals)) => out.extend(visuals.iter()),
            Some(other) => out.push(other),
            None => {}
        }
    }
}

/// Decode and clean one raw example. `None` when nothing usable remains.
pub fn clean_example(raw: &Value) -> Option<String> {
    let text = decode_example(raw, 0)?;
    let cleaned = clean_example_text(&text);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Extract the text of an example, decoding nested JSON on the way
pub fn decode_example(raw: &Value, depth: usize) -> Option<String> {
    match raw {
        Value::String(s) => {
            if depth < MAX_DECODE_DEPTH {
                match serde_json::from_str::<Value>(s) {
                    Ok(decoded @ (Value::String(_) | Value::Array(_) | Value::Object(_))) => {
                        return decode_example(&decoded, depth + 1);
                    }
                    _ => {}
                }
            }
            Some(s.clone())
        }
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| decode_example(item, depth + 1))
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(" "))
            }
        }
        Value::Object(map) => TEXT_FIELDS
            .iter()
            .find_map(|field| map.get(*field))
            .and_then(|value| decode_example(value, depth + 1)),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(_) | Value::Null => None,
    }
}

/// Run every cleaning pass in order
pub fn clean_example_text(text: &str) -> String {
    CLEANING_PASSES
        .iter()
        .fold(text.to_string(), |acc, (_, pass)| pass(&acc))
}

/// Drop `{t:` openers together with the brace that closes them.
/// Unmatched closing braces are dropped as well.
pub fn unwrap_t_wrapper(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    // true = brace opened by a {t: wrapper
    let mut open: Vec<bool> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '{' if chars.get(i + 1) == Some(&'t') && chars.get(i + 2) == Some(&':') => {
                open.push(true);
                i += 3;
                continue;
            }
            '{' => {
                open.push(false);
                out.push('{');
            }
            '}' => match open.pop() {
                Some(false) => out.push('}'),
                Some(true) | None => {}
            },
            c => out.push(c),
        }
        i += 1;
    }
    out
}

/// Remove formatting tokens such as `{it}`, `{/it}`, `{wi}`, `{bc}`.
/// `{ldquo}` and `{rdquo}` become plain double quotes.
pub fn strip_inline_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) if is_tag_name(&after[..end]) => {
                match &after[..end] {
                    "ldquo" | "rdquo" => out.push('"'),
                    _ => {}
                }
                rest = &after[end + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn is_tag_name(name: &str) -> bool {
    let name = name.strip_prefix('/').unwrap_or(name);
    !name.is_empty()
        && name.len() <= MAX_TAG_LEN
        && name.chars().all(|c| c.is_ascii_lowercase() || c == '_')
}

/// `\"` -> `"` and `\'` -> `'`
pub fn unescape_quotes(text: &str) -> String {
    text.replace("\\\"", "\"").replace("\\'", "'")
}

/// Remove square brackets, wrapping double quotes and unbalanced quotes
pub fn strip_brackets_and_stray_quotes(text: &str) -> String {
    let without_brackets: String = text.chars().filter(|c| *c != '[' && *c != ']').collect();
    let unwrapped = without_brackets.trim().trim_matches('"').trim();
    if unwrapped.matches('"').count() % 2 == 1 {
        unwrapped.chars().filter(|c| *c != '"').collect()
    } else {
        unwrapped.to_string()
    }
}

/// Collapse runs of whitespace to a single space and trim
pub fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut last_was_whitespace = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !last_was_whitespace {
                collapsed.push(' ');
                last_was_whitespace = true;
            }
        } else {
            collapsed.push(ch);
            last_was_whitespace = false;
        }
    }
    collapsed.trim().to_string()
}
