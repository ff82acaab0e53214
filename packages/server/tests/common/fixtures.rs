//! Candidate objects and agent outputs shared across tests.

use scout_core::domains::scouting::RawAgentOutput;
use serde_json::{json, Value};

/// A candidate that passes validation, named `event_name`.
pub fn valid_event(event_name: &str) -> Value {
    json!({
        "eventName": event_name,
        "venueName": "Berghain",
        "district": "Friedrichshain",
        "vibeProfile": ["techno", "late-night"],
        "influenceScore": 90,
        "confidenceScore": 7,
        "summary": "Marathon techno weekend in a former power plant."
    })
}

/// Agent output whose final text carries `value` after a chatty preamble.
pub fn text_output(preamble: &str, value: &Value) -> RawAgentOutput {
    RawAgentOutput::default().with_text(format!("{}\n{}", preamble, value))
}

/// The page the stub site serves at `/site/event`.
pub const EVENT_PAGE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Nachtflohmarkt</title>
  <style>body { font-family: sans-serif; }</style>
  <script type="text/javascript">
    window.dataLayer = [{ "tracking": "<b>noise</b>" }];
  </script>
</head>
<body>
  <h1>Nachtflohmarkt</h1>
  <p>Friday night flea market at the <strong>Arena Berlin</strong>, Kreuzberg.</p>
</body>
</html>"#;

/// Sanitized text of [`EVENT_PAGE_HTML`].
pub const EVENT_PAGE_TEXT: &str =
    "Nachtflohmarkt Nachtflohmarkt Friday night flea market at the Arena Berlin , Kreuzberg.";
