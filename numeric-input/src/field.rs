//! NumericField: an in-process host for one numeric text field.
//!
//! Owns the field text and the latest verdict, and wires the pure entry
//! points together the way a rendering layer would: gate the intent, apply
//! the edit when allowed, then re-validate the full text.

use std::ops::Range;

use tracing::debug;

use crate::gate::{allow_edit, apply_edit, on_key_intent, on_paste_intent};
use crate::types::{Decision, NumericConfig, Verdict};
use crate::validate::{explain, on_value_changed, Violation};

/// A numeric text field: configuration, current text, latest verdict.
#[derive(Debug, Clone)]
pub struct NumericField {
    config: NumericConfig,
    text: String,
    verdict: Verdict,
}

impl NumericField {
    /// Create a field holding `config.value` (or nothing).
    ///
    /// The seeded text is validated but not gated, like any programmatic set.
    pub fn new(config: NumericConfig) -> Self {
        let text = config.value.clone().unwrap_or_default();
        let verdict = on_value_changed(&text, &config);
        Self {
            config,
            text,
            verdict,
        }
    }

    pub fn config(&self) -> &NumericConfig {
        &self.config
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Verdict for the current text.
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Failed constraints for the current text.
    pub fn violations(&self) -> Vec<Violation> {
        explain(&self.text, &self.config)
    }

    /// Type `key` at the end of the text.
    pub fn key(&mut self, key: char) -> Decision {
        let decision = on_key_intent(key, &self.text, &self.config);
        if decision.is_allowed() {
            self.text.push(key);
            self.revalidate();
        }
        decision
    }

    /// Paste `clipboard_text` at the end of the text.
    pub fn paste(&mut self, clipboard_text: &str) -> Decision {
        let decision = on_paste_intent(clipboard_text, &self.text, &self.config);
        if decision.is_allowed() && !clipboard_text.is_empty() {
            self.text.push_str(clipboard_text);
            self.revalidate();
        }
        decision
    }

    /// Replace `selection` (char indices) with `inserted`, gated.
    pub fn edit(&mut self, selection: Range<usize>, inserted: &str) -> Decision {
        let decision = allow_edit(&self.text, selection.clone(), inserted, &self.config);
        if decision.is_allowed() {
            self.text = apply_edit(&self.text, selection, inserted);
            self.revalidate();
        }
        decision
    }

    /// Remove `selection` (char indices). Deletions are never gated, only
    /// validated.
    pub fn delete(&mut self, selection: Range<usize>) -> Verdict {
        self.text = apply_edit(&self.text, selection, "");
        self.revalidate()
    }

    /// Replace the whole text programmatically. Not gated, only validated.
    pub fn set_text(&mut self, text: impl Into<String>) -> Verdict {
        self.text = text.into();
        self.revalidate()
    }

    /// Empty the field.
    pub fn clear(&mut self) -> Verdict {
        self.set_text(String::new())
    }

    fn revalidate(&mut self) -> Verdict {
        self.verdict = on_value_changed(&self.text, &self.config);
        debug!(text = %self.text, verdict = ?self.verdict, "field updated");
        self.verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Validity;

    fn type_all(field: &mut NumericField, keys: &str) {
        for key in keys.chars() {
            assert_eq!(field.key(key), Decision::Allow, "key {key:?}");
        }
    }

    #[test]
    fn new_field_is_pristine() {
        let field = NumericField::new(NumericConfig::new().with_min(5.0));
        assert_eq!(field.text(), "");
        assert_eq!(field.verdict(), Verdict::pristine());
    }

    #[test]
    fn seeded_value_is_validated() {
        let field = NumericField::new(NumericConfig::new().with_min(5.0).with_value("4"));
        assert_eq!(field.text(), "4");
        assert_eq!(field.verdict().valid, Validity::Invalid);
        assert_eq!(field.verdict().value, Some(4.0));
    }

    #[test]
    fn typing_updates_verdict() {
        let mut field = NumericField::new(
            NumericConfig::new()
                .accepting_float()
                .with_decimals(2, Some(4)),
        );
        type_all(&mut field, "1.1");
        assert_eq!(field.verdict(), Verdict::parsed(1.1, false));
        type_all(&mut field, "2");
        assert_eq!(field.verdict(), Verdict::parsed(1.12, true));
    }

    #[test]
    fn denied_key_leaves_text_alone() {
        let mut field = NumericField::new(NumericConfig::new().with_value("10"));
        let before = field.verdict();
        assert_eq!(field.key('.'), Decision::Deny);
        assert_eq!(field.text(), "10");
        assert_eq!(field.verdict(), before);
    }

    #[test]
    fn denied_paste_leaves_text_alone() {
        let mut field = NumericField::new(NumericConfig::new());
        assert_eq!(field.paste("e123e123"), Decision::Deny);
        assert_eq!(field.text(), "");
        assert_eq!(field.paste("12"), Decision::Allow);
        assert_eq!(field.text(), "12");
        assert_eq!(field.verdict(), Verdict::parsed(12.0, true));
    }

    #[test]
    fn edit_inserts_at_caret() {
        let mut field = NumericField::new(NumericConfig::new().with_value("15"));
        assert_eq!(field.edit(0..0, "-"), Decision::Allow);
        assert_eq!(field.text(), "-15");
        assert_eq!(field.verdict().value, Some(-15.0));
    }

    #[test]
    fn delete_and_clear_revalidate() {
        let mut field = NumericField::new(NumericConfig::new().with_max(15.0).with_value("20"));
        assert_eq!(field.verdict().valid, Validity::Invalid);
        assert_eq!(field.delete(0..1).value, Some(0.0));
        assert!(field.verdict().is_valid());
        assert_eq!(field.clear(), Verdict::pristine());
    }

    #[test]
    fn set_text_skips_the_gate() {
        let mut field = NumericField::new(NumericConfig::new());
        let verdict = field.set_text("1.5");
        assert_eq!(field.text(), "1.5");
        assert_eq!(verdict.valid, Validity::Invalid);
        assert!(!field.violations().is_empty());
    }
}
