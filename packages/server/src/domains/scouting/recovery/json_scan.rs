//! Locate top-level JSON objects embedded in free text.

/// Every top-level brace-balanced `{...}` span in `text`, in order of appearance.
///
/// Braces inside JSON string literals (including escaped quotes) do not count.
/// A `{` that is never closed does not swallow the rest of the text: scanning
/// resumes right after it, so objects following a stray brace are still found.
/// Spans are not guaranteed to be valid JSON; the caller parses them.
pub fn json_object_spans(text: &str) -> Vec<&str> {
    let mut spans = Vec::new();
    let mut from = 0;
    while let Some(unclosed) = scan_from(text, from, &mut spans) {
        from = unclosed + 1;
    }
    spans
}

/// Scan `text[from..]`, pushing closed spans. Returns the byte offset of the
/// outermost `{` still open at the end, if any.
fn scan_from<'a>(text: &'a str, from: usize, spans: &mut Vec<&'a str>) -> Option<usize> {
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[from..].char_indices() {
        let idx = from + offset;

        if depth == 0 {
            if ch == '{' {
                start = idx;
                depth = 1;
            }
            continue;
        }

        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    spans.push(&text[start..=idx]);
                }
            }
            _ => {}
        }
    }

    (depth > 0).then_some(start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_objects_in_order() {
        let text = r#"Here you go: {"a": 1} and then {"b": 2}"#;
        assert_eq!(json_object_spans(text), vec![r#"{"a": 1}"#, r#"{"b": 2}"#]);
    }

    #[test]
    fn test_nested_objects_are_one_span() {
        let text = r#"{"outer": {"inner": {"x": 1}}, "y": 2}"#;
        assert_eq!(json_object_spans(text), vec![text]);
    }

    #[test]
    fn test_braces_in_strings_are_ignored() {
        let text = r#"{"summary": "a } tricky { value", "q": "say \"}\""}"#;
        assert_eq!(json_object_spans(text), vec![text]);
    }

    #[test]
    fn test_code_fences_and_unclosed_tail() {
        let text = "```json\n{\"eventName\": \"Fence\"}\n```\n{\"unfinished\": ";
        assert_eq!(json_object_spans(text), vec!["{\"eventName\": \"Fence\"}"]);
    }

    #[test]
    fn test_multibyte_text_around_objects() {
        let text = "Veranstaltung in Neukölln → {\"district\": \"Neukölln\"} ✓";
        assert_eq!(json_object_spans(text), vec!["{\"district\": \"Neukölln\"}"]);
    }

    #[test]
    fn test_stray_open_brace_before_answer() {
        let text = "Reasoning: prices listed as {TBA on the page.\n{\"eventName\": \"Y\"}";
        assert_eq!(json_object_spans(text), vec!["{\"eventName\": \"Y\"}"]);
    }

    #[test]
    fn test_stray_brace_with_quote_does_not_hide_later_objects() {
        let text = r#"{"a": 1} then a { stray "quote and {"b": 2}"#;
        assert_eq!(json_object_spans(text), vec![r#"{"a": 1}"#, r#"{"b": 2}"#]);
    }

    #[test]
    fn test_no_objects() {
        assert!(json_object_spans("nothing here } {").is_empty());
        assert!(json_object_spans("").is_empty());
    }
}
