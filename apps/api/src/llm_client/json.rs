//! Helpers for pulling structured JSON out of free-text completions.

use serde_json::Value;

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Finds a JSON array in a completion that may carry prose around it.
///
/// A bare array (optionally fenced) is parsed directly. Otherwise every `[`
/// is tried in order and the first balanced span that parses as a non-empty
/// array of objects wins, so bracketed prose like `[5]` is skipped.
pub fn extract_json_array(text: &str) -> Option<Vec<Value>> {
    let text = strip_json_fences(text);

    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(text) {
        return Some(items);
    }

    text.char_indices()
        .filter(|&(_, c)| c == '[')
        .filter_map(|(start, _)| balanced_span(&text[start..]))
        .find_map(|span| match serde_json::from_str::<Value>(span) {
            Ok(Value::Array(items))
                if !items.is_empty() && items.iter().all(Value::is_object) =>
            {
                Some(items)
            }
            _ => None,
        })
}

/// Returns the prefix of `text` (which must start with `[`) up to its matching
/// `]`, skipping brackets inside string literals.
fn balanced_span(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[..=idx]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_bare_array() {
        let items = extract_json_array(r#"[{"name": "A"}, {"name": "B"}]"#).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_extract_array_surrounded_by_prose() {
        let text = r#"Here you go: [{"name":"A","title":"B"}] thanks"#;
        let items = extract_json_array(text).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["name"], "A");
    }

    #[test]
    fn test_extract_fenced_array_with_preamble() {
        let text = "Sure!\n```json\n[{\"name\": \"A\"}]\n```\nLet me know if you need more.";
        let items = extract_json_array(text).unwrap();
        assert_eq!(items[0]["name"], "A");
    }

    #[test]
    fn test_extract_skips_brackets_inside_strings() {
        let text = r#"Result: [{"name": "A [Lead]", "note": "uses ] and \" quotes"}] done [x]"#;
        let items = extract_json_array(text).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["name"], "A [Lead]");
    }

    #[test]
    fn test_extract_skips_non_json_bracketed_prose() {
        let text = r#"Contacts [generated] below: [{"name": "A"}]"#;
        let items = extract_json_array(text).unwrap();
        assert_eq!(items[0]["name"], "A");
    }

    #[test]
    fn test_extract_skips_bracketed_numbers_before_objects() {
        let text = r#"Here are [5] contacts: [{"name": "A"}]"#;
        let items = extract_json_array(text).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["name"], "A");
    }

    #[test]
    fn test_extract_returns_none_without_array() {
        assert!(extract_json_array("I could not find anyone, sorry.").is_none());
        assert!(extract_json_array(r#"{"name": "A"}"#).is_none());
        assert!(extract_json_array("[unterminated").is_none());
        assert!(extract_json_array("").is_none());
    }

    #[test]
    fn test_balanced_span_handles_nesting() {
        assert_eq!(balanced_span("[[1], [2]] tail"), Some("[[1], [2]]"));
        assert_eq!(balanced_span("[1, [2]"), None);
    }
}
