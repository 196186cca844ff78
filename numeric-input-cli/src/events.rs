//! JSON-lines event protocol.
//!
//! Each input line is one field event:
//!
//! ```text
//! {"event": "key", "key": "1"}
//! {"event": "paste", "text": "12"}
//! {"event": "change", "text": "10"}
//! ```
//!
//! Each output line answers the event on the same position. Intent events
//! carry a `decision`; every answer carries the field text and verdict after
//! the event. Unparsable lines are answered with `{"error": ...}` and do not
//! stop the stream.

use std::io::{BufRead, Write};

use anyhow::Result;
use numeric_input::{Decision, NumericConfig, NumericField, Verdict, Violation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One event forwarded by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum FieldEvent {
    /// A character about to be typed at the end of the text
    Key { key: char },
    /// Clipboard text about to be pasted at the end of the text
    Paste { text: String },
    /// The host set the whole text itself
    Change { text: String },
}

/// Answer to one event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<Decision>,
    pub text: String,
    pub verdict: Verdict,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
}

/// Apply one event to the field.
pub fn handle_event(field: &mut NumericField, event: FieldEvent) -> EventOutcome {
    let decision = match event {
        FieldEvent::Key { key } => Some(field.key(key)),
        FieldEvent::Paste { text } => Some(field.paste(&text)),
        FieldEvent::Change { text } => {
            field.set_text(text);
            None
        }
    };
    EventOutcome {
        decision,
        text: field.text().to_string(),
        verdict: field.verdict(),
        violations: field.violations(),
    }
}

/// Drive a field from JSON-lines events on `input`, writing one JSON answer
/// per line to `output`. Returns the number of events handled.
pub fn run_events<R: BufRead, W: Write>(
    config: NumericConfig,
    input: R,
    mut output: W,
) -> Result<usize> {
    let mut field = NumericField::new(config);
    let mut handled = 0;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let answer = match serde_json::from_str::<FieldEvent>(line) {
            Ok(event) => {
                debug!(?event, "field event");
                handled += 1;
                serde_json::to_string(&handle_event(&mut field, event))?
            }
            Err(e) => {
                warn!(error = %e, line, "unreadable field event");
                serde_json::json!({ "error": e.to_string() }).to_string()
            }
        };
        output.write_all(answer.as_bytes())?;
        output.write_all(b"\n")?;
    }

    output.flush()?;
    Ok(handled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn run(config: NumericConfig, input: &str) -> Vec<Value> {
        let mut out = Vec::new();
        run_events(config, input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn parses_events() {
        let event: FieldEvent = serde_json::from_str(r#"{"event":"key","key":"-"}"#).unwrap();
        assert_eq!(event, FieldEvent::Key { key: '-' });
        let event: FieldEvent =
            serde_json::from_str(r#"{"event":"change","text":"10"}"#).unwrap();
        assert_eq!(
            event,
            FieldEvent::Change {
                text: "10".into()
            }
        );
    }

    #[test]
    fn typing_session() {
        let answers = run(
            NumericConfig::new().with_min(5.0),
            "{\"event\":\"key\",\"key\":\"-\"}\n{\"event\":\"key\",\"key\":\"4\"}\n",
        );
        assert_eq!(answers.len(), 2);
        assert_eq!(answers[0]["decision"], "deny");
        assert_eq!(answers[0]["verdict"]["pristine"], true);
        assert_eq!(answers[1]["decision"], "allow");
        assert_eq!(answers[1]["text"], "4");
        assert_eq!(answers[1]["verdict"]["valid"], "INVALID");
        assert_eq!(answers[1]["violations"][0]["kind"], "below-min");
    }

    #[test]
    fn paste_and_change() {
        let answers = run(
            NumericConfig::new(),
            "{\"event\":\"paste\",\"text\":\"e123e123\"}\n\n{\"event\":\"change\",\"text\":\"10\"}\n",
        );
        assert_eq!(answers.len(), 2);
        assert_eq!(answers[0]["decision"], "deny");
        assert_eq!(answers[0]["text"], "");
        assert!(answers[1].get("decision").is_none());
        assert_eq!(
            answers[1]["verdict"],
            serde_json::json!({"value": 10.0, "pristine": false, "valid": "VALID"})
        );
    }

    #[test]
    fn bad_lines_do_not_stop_the_stream() {
        let mut out = Vec::new();
        let handled = run_events(
            NumericConfig::new(),
            "not json\n{\"event\":\"key\",\"key\":\"7\"}\n".as_bytes(),
            &mut out,
        )
        .unwrap();
        assert_eq!(handled, 1);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].contains("error"));
        assert!(lines[1].contains("\"text\":\"7\""));
    }
}
