//! Translation of raw input method callbacks into [`PrimitiveSignal`]s.
//!
//! A physical backspace may reach us either as a surrounding-text delete request or as a raw
//! `Delete` key event, depending on the keyboard. Each path is treated as authoritative on its
//! own; well-behaved keyboards only ever use one of them for a given key press, and nothing here
//! tries to correlate the two.
//!
//! Everything in this module is a pure function of its input.

use std::iter::FusedIterator;
use std::str::Chars;

use crate::input::{KeyAction, Keycode, RawKeyEvent};
use crate::signal::PrimitiveSignal;

/// The signals produced by a text commit, in order.
///
/// Each line feed becomes [`PrimitiveSignal::Submit`], every other character becomes one
/// [`PrimitiveSignal::CharacterInput`]. Characters after a line feed keep being processed.
#[inline]
pub fn commit_signals(text: &str) -> CommitSignals<'_> {
    CommitSignals { chars: text.chars() }
}

/// Iterator returned by [`commit_signals`].
#[derive(Debug, Clone)]
pub struct CommitSignals<'a> {
    chars: Chars<'a>,
}

impl Iterator for CommitSignals<'_> {
    type Item = PrimitiveSignal;

    fn next(&mut self) -> Option<Self::Item> {
        self.chars.next().map(|ch| match ch {
            '\n' => PrimitiveSignal::Submit,
            ch => PrimitiveSignal::CharacterInput(ch),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chars.size_hint()
    }
}

impl DoubleEndedIterator for CommitSignals<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.chars.next_back().map(|ch| match ch {
            '\n' => PrimitiveSignal::Submit,
            ch => PrimitiveSignal::CharacterInput(ch),
        })
    }
}

impl FusedIterator for CommitSignals<'_> {}

/// The signal produced by a surrounding-text delete request.
///
/// Any positive `before` count collapses to a single [`PrimitiveSignal::DeleteBackward`].
/// Forward deletion is not supported, so `after` is never acted upon.
#[inline]
pub fn delete_signal(before: usize, _after: usize) -> Option<PrimitiveSignal> {
    (before > 0).then_some(PrimitiveSignal::DeleteBackward)
}

/// What a raw key event translates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTranslation {
    /// Forward this signal; the key is consumed.
    Signal(PrimitiveSignal),
    /// Dismiss the soft keyboard; the key is consumed and nothing is forwarded.
    ///
    /// A raw enter key means "done editing", not "submit line". Only line feeds inside
    /// committed text produce [`PrimitiveSignal::Submit`].
    HideKeyboard,
    /// Not ours; the platform should apply its default handling.
    Unhandled,
}

impl KeyTranslation {
    /// Whether further platform processing of the key should be suppressed.
    #[inline]
    pub fn is_handled(&self) -> bool {
        !matches!(self, KeyTranslation::Unhandled)
    }
}

/// Translate a raw key event.
pub fn translate_key(event: &RawKeyEvent) -> KeyTranslation {
    match (event.action, event.keycode) {
        (KeyAction::Down, Keycode::Delete) => {
            KeyTranslation::Signal(PrimitiveSignal::DeleteBackward)
        },
        (KeyAction::Down, Keycode::Enter) => KeyTranslation::HideKeyboard,
        _ => KeyTranslation::Unhandled,
    }
}

/// The difference between two snapshots of an editor's text.
///
/// Some platforms report input as the editor's full contents instead of commit and delete
/// callbacks. The edit is `deleted` characters removed from the end of the previous snapshot,
/// followed by `inserted` appended to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEdit<'a> {
    pub deleted: usize,
    pub inserted: &'a str,
}

impl TextEdit<'_> {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.deleted == 0 && self.inserted.is_empty()
    }
}

/// Compute the edit turning `previous` into `current`.
///
/// Both snapshots share the longest common prefix; everything in `previous` past it counts as
/// deleted and everything in `current` past it as inserted. Counts are in characters.
pub fn text_edit<'a>(previous: &str, current: &'a str) -> TextEdit<'a> {
    let prefix = previous
        .char_indices()
        .zip(current.chars())
        .find(|((_, old), new)| old != new)
        .map(|((index, _), _)| index)
        .unwrap_or_else(|| previous.len().min(current.len()));
    // `prefix` is a char boundary in both strings since the characters before it are equal.
    TextEdit { deleted: previous[prefix..].chars().count(), inserted: &current[prefix..] }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::PrimitiveSignal::{CharacterInput, DeleteBackward, Submit};

    fn commit(text: &str) -> Vec<PrimitiveSignal> {
        commit_signals(text).collect()
    }

    #[test]
    fn plain_text_is_forwarded_in_order() {
        assert_eq!(commit("ab"), [CharacterInput('a'), CharacterInput('b')]);
        assert!(!commit("hello world").contains(&Submit));
    }

    #[test]
    fn lone_line_feed_submits() {
        assert_eq!(commit("\n"), [Submit]);
    }

    #[test]
    fn line_feed_in_the_middle_keeps_order() {
        assert_eq!(commit("a\nb"), [CharacterInput('a'), Submit, CharacterInput('b')]);
        assert_eq!(commit("\n\n"), [Submit, Submit]);
    }

    #[test]
    fn multibyte_characters_are_single_signals() {
        assert_eq!(
            commit("é字🦀"),
            [CharacterInput('é'), CharacterInput('字'), CharacterInput('🦀')]
        );
    }

    #[test]
    fn carriage_return_is_just_a_character() {
        assert_eq!(commit("\r"), [CharacterInput('\r')]);
    }

    #[test]
    fn empty_commit_emits_nothing() {
        assert!(commit("").is_empty());
    }

    #[test]
    fn delete_collapses_magnitude() {
        assert_eq!(delete_signal(1, 0), Some(DeleteBackward));
        assert_eq!(delete_signal(12, 3), Some(DeleteBackward));
        assert_eq!(delete_signal(0, 5), None);
        assert_eq!(delete_signal(0, 0), None);
    }

    #[test]
    fn delete_key_press() {
        let translation = translate_key(&RawKeyEvent::press(Keycode::Delete));
        assert_eq!(translation, KeyTranslation::Signal(DeleteBackward));
        assert!(translation.is_handled());

        let translation = translate_key(&RawKeyEvent::release(Keycode::Delete));
        assert_eq!(translation, KeyTranslation::Unhandled);
        assert!(!translation.is_handled());
    }

    #[test]
    fn enter_key_press_hides_without_submitting() {
        let translation = translate_key(&RawKeyEvent::press(Keycode::Enter));
        assert_eq!(translation, KeyTranslation::HideKeyboard);
        assert!(translation.is_handled());
        assert_eq!(translate_key(&RawKeyEvent::release(Keycode::Enter)), KeyTranslation::Unhandled);
    }

    #[test]
    fn other_keys_pass_through() {
        for event in [
            RawKeyEvent::press(Keycode::Other(29)),
            RawKeyEvent::new(KeyAction::Multiple, Keycode::Delete),
            RawKeyEvent::new(KeyAction::Multiple, Keycode::Enter),
        ] {
            assert_eq!(translate_key(&event), KeyTranslation::Unhandled);
        }
    }

    #[test]
    fn text_edit_appends() {
        assert_eq!(text_edit("", "a"), TextEdit { deleted: 0, inserted: "a" });
        assert_eq!(text_edit("he", "hello"), TextEdit { deleted: 0, inserted: "llo" });
        assert_eq!(text_edit("a", "a\n"), TextEdit { deleted: 0, inserted: "\n" });
    }

    #[test]
    fn text_edit_deletes_in_characters() {
        assert_eq!(text_edit("abc", "ab"), TextEdit { deleted: 1, inserted: "" });
        assert_eq!(text_edit("né字", ""), TextEdit { deleted: 3, inserted: "" });
    }

    #[test]
    fn text_edit_replaces_tail() {
        assert_eq!(text_edit("teh", "the"), TextEdit { deleted: 2, inserted: "he" });
        assert_eq!(text_edit("é", "ê"), TextEdit { deleted: 1, inserted: "ê" });
    }

    #[test]
    fn text_edit_unchanged_is_empty() {
        assert!(text_edit("same", "same").is_empty());
        assert!(text_edit("", "").is_empty());
    }
}
