//! Keystroke and paste gatekeeping.
//!
//! The gatekeeper answers allow/deny before the host mutates its text. It
//! builds the text the edit would produce and checks it against the shape
//! grammar in [`crate::shape`]; it never parses the value. A deny means the
//! host must suppress its default insertion. An allow needs no action.
//!
//! Digits are always allowed. When the current text was set by the host and
//! is not shaped like a number, there is no proposed text to match, so each
//! keystroke is judged by the per-character rules alone.

use std::ops::Range;

use tracing::{debug, trace};

use crate::shape::is_numeric_shape;
use crate::types::{Decision, NumericConfig};

/// Decide whether typing `key` at the end of `current_text` may proceed.
pub fn on_key_intent(key: char, current_text: &str, config: &NumericConfig) -> Decision {
    let decision = if key.is_ascii_digit() {
        Decision::Allow
    } else if is_numeric_shape(current_text, config) {
        let mut buf = [0u8; 4];
        let end = current_text.chars().count();
        allow_edit(current_text, end..end, key.encode_utf8(&mut buf), config)
    } else {
        Decision::from(symbol_fits(key, current_text, config))
    };
    if !decision.is_allowed() {
        debug!(%key, current = current_text, "keystroke denied");
    }
    decision
}

/// Decide whether pasting `clipboard_text` at the end of `current_text` may
/// proceed.
///
/// The clipboard text is judged as one unit: a single bad character or a
/// malformed result denies the whole paste.
pub fn on_paste_intent(
    clipboard_text: &str,
    current_text: &str,
    config: &NumericConfig,
) -> Decision {
    let end = current_text.chars().count();
    let decision = allow_edit(current_text, end..end, clipboard_text, config);
    if !decision.is_allowed() {
        debug!(
            clipboard = clipboard_text,
            current = current_text,
            "paste denied"
        );
    }
    decision
}

/// Decide whether replacing `selection` (char indices into `current_text`)
/// with `inserted` leaves text that is still shaped like a number.
///
/// An empty insertion over an empty selection changes nothing and is allowed.
pub fn allow_edit(
    current_text: &str,
    selection: Range<usize>,
    inserted: &str,
    config: &NumericConfig,
) -> Decision {
    if inserted.is_empty() && selection.is_empty() {
        return Decision::Allow;
    }
    let proposed = apply_edit(current_text, selection, inserted);
    let allowed = is_numeric_shape(&proposed, config);
    trace!(proposed = %proposed, allowed, "edit checked");
    Decision::from(allowed)
}

/// Rules 1 to 6 for a non-digit `key` typed after `current_text`, without
/// reference to the grammar.
fn symbol_fits(key: char, current_text: &str, config: &NumericConfig) -> bool {
    let has_exponent = current_text.contains(['e', 'E']);
    match key {
        '-' => current_text.is_empty() && config.permits_negative(),
        '.' => config.accept_float && !current_text.contains('.') && !has_exponent,
        'e' | 'E' => config.accept_float && !has_exponent,
        '+' => config.accept_float && current_text.ends_with(['e', 'E']),
        _ => false,
    }
}

/// The text produced by replacing `selection` (char indices, clamped to the
/// text) with `inserted`.
pub fn apply_edit(current_text: &str, selection: Range<usize>, inserted: &str) -> String {
    let start = byte_offset(current_text, selection.start);
    let end = byte_offset(current_text, selection.end.max(selection.start));
    let mut text = String::with_capacity(current_text.len() + inserted.len());
    text.push_str(&current_text[..start]);
    text.push_str(inserted);
    text.push_str(&current_text[end..]);
    text
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(offset, _)| offset)
}
